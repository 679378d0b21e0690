use std::path::Path;

use anyhow::Result;
use codolio_core::CodolioConfig;
use owo_colors::OwoColorize;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => CodolioConfig::config_path()?,
    };
    let config = CodolioConfig::load(config_path)?;

    println!("{}", "Paths".bold());
    println!(
        "  Config:  {}{}",
        path.display(),
        if path.exists() { "" } else { " (not found, using defaults)" }
    );
    println!("  Output:  {}", config.output_path().display());

    println!("\n{}", "Effective configuration".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
