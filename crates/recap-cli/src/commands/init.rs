//! The `init` command.

use console::style;
use recap_core::{paths, Config};

/// Write a default configuration and create data directories.
pub fn run(force: bool) -> anyhow::Result<()> {
    let config_path = paths::config_file()?;

    if config_path.exists() && !force {
        anyhow::bail!(
            "configuration already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    paths::ensure_dirs()?;
    Config::default().save(&config_path)?;

    println!(
        "{} configuration written to {}",
        style("Initialized").green().bold(),
        config_path.display()
    );
    println!("Set OPENAI_API_KEY in your environment before processing recordings.");

    Ok(())
}
