//! `fieldlog status` — Show effective configuration.

use fieldlog_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("📋 FieldLog Status");
    println!("==================");
    println!("  Config dir:        {}", AppConfig::config_dir().display());
    println!("  Agent endpoint:    {}", config.agent.base_url);
    println!("  Request timeout:   {}s", config.agent.timeout_secs);
    println!(
        "  Follow-up notice:  {}",
        if config.session.announce_follow_up { "announced" } else { "silent" }
    );
    println!(
        "  Input on failure:  {}",
        if config.session.clear_input_on_failure { "cleared" } else { "kept" }
    );

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `fieldlog onboard` first");
    }

    Ok(())
}
