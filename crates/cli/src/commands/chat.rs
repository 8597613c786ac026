//! `fieldlog chat` — Interactive or single-message chat mode.

use std::sync::Arc;

use fieldlog_client::HttpAgentClient;
use fieldlog_config::AppConfig;
use fieldlog_core::store::DraftStore;
use fieldlog_core::transcript::ChatRole;
use fieldlog_session::{Session, SubmitOutcome};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::render;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let backend = Arc::new(HttpAgentClient::from_config(&config.agent));
    let store = Arc::new(DraftStore::new());
    let mut session = Session::new(backend, store.clone())
        .with_announce_follow_up(config.session.announce_follow_up)
        .with_clear_input_on_failure(config.session.clear_input_on_failure);

    if let Some(msg) = message {
        // Single message mode: send, print the responses, dump the draft.
        session.set_input(&msg);
        session.submit().await?;

        for entry in session.transcript().entries() {
            if entry.role == ChatRole::Assistant {
                println!("{}", entry.text);
            }
        }

        let draft = session.draft();
        if !draft.is_empty() {
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║      FieldLog — Log HCP Interaction          ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Agent:   {}", config.agent.base_url);
    println!();
    println!("  Describe the interaction in free text, e.g.");
    println!("  \"Met Dr. Smith, discussed Product-X efficacy...\"");
    println!();
    println!("  Commands: /draft  show the interaction record");
    println!("            /clear  reset the interaction record");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    // Entries already echoed to the terminal
    let mut printed = 0;

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();

        match line.as_str() {
            "" => {
                prompt()?;
                continue;
            }
            "exit" | "quit" | "/exit" | "/quit" | ":q" => break,
            "/draft" => {
                println!();
                println!("{}", render::render_draft(&store.current()));
            }
            "/clear" => {
                session.clear_draft();
                println!("  Draft cleared.");
            }
            _ => {
                session.set_input(&line);

                eprint!("  ...");
                let outcome = session.submit().await;
                eprint!("\r     \r");

                match outcome {
                    Ok(outcome) => {
                        let entries = session.transcript().entries();
                        for entry in &entries[printed..] {
                            if entry.role == ChatRole::Assistant {
                                println!();
                                for text_line in entry.text.lines() {
                                    println!("  Assistant > {text_line}");
                                }
                            }
                        }
                        printed = entries.len();

                        if matches!(outcome, SubmitOutcome::Applied { .. })
                            && !store.current().is_empty()
                        {
                            println!();
                            println!("{}", render::render_draft(&store.current()));
                        }
                    }
                    Err(e) => {
                        eprintln!("  [Error] {e}");
                    }
                }
                println!();
            }
        }

        prompt()?;
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    use std::io::Write;
    print!("  You > ");
    std::io::stdout().flush()
}
