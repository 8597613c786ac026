//! `fieldlog onboard` — First-time setup.

use fieldlog_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("📋 FieldLog — First-Time Setup");
    println!("==============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if !config_path.exists() {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created default config: {}", config_path.display());
    } else {
        println!("  Config file exists: {}", config_path.display());
    }

    println!();
    println!("Next steps:");
    println!("  1. Point AGENT_BASE_URL (or agent.base_url in config.toml)");
    println!("     at your agent backend");
    println!("  2. Run `fieldlog chat` to start logging interactions");
    println!();

    Ok(())
}
