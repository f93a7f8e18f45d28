use anyhow::Result;

use crate::core::config::AppConfig;

pub fn init() -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        eprintln!("Remove it first if you want to regenerate.");
        return Ok(());
    }

    let path = AppConfig::default().save()?;
    println!("Generated config at {}", path.display());
    println!("  Set [aws] profile/region there to override the environment.");
    Ok(())
}

pub fn check() -> Result<()> {
    let path = AppConfig::config_path();
    if !path.exists() {
        println!("No config file at {} (using defaults)", path.display());
        return Ok(());
    }

    let config = AppConfig::load()?;
    let issues = config.validate();
    if issues.is_empty() {
        println!("Config OK: {}", path.display());
        return Ok(());
    }

    eprintln!("Config has {} issue(s):", issues.len());
    for issue in &issues {
        eprintln!("  - {}", issue);
    }
    std::process::exit(1);
}

pub fn path() {
    println!("{}", AppConfig::config_path().display());
}
