//! Recap command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use recap_core::Config;

/// Recap - meeting recording insights
#[derive(Parser)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "RECAP_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Process a local audio recording
    Process(commands::process::ProcessArgs),

    /// Search stored meetings
    Search(commands::search::SearchArgs),

    /// List stored meetings
    List,

    /// Show one meeting in full
    Show {
        /// Meeting id
        id: String,
    },

    /// Show cross-meeting insights
    Insights,

    /// Initialize Recap configuration
    Init {
        /// Overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

/// Load the effective config, honoring an explicit `--config` path.
fn load_config(path: &Option<std::path::PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(p) => Config::load(p)?,
        None => Config::load_or_default()?,
    };
    config.validate()?;
    Ok(config)
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve(args) => {
            let config = load_config(&cli.config)?;
            commands::serve::run(args, config).await
        }
        Commands::Process(args) => {
            let config = load_config(&cli.config)?;
            commands::process::run(args, config).await
        }
        Commands::Search(args) => {
            let config = load_config(&cli.config)?;
            commands::search::run(args, config).await
        }
        Commands::List => {
            let config = load_config(&cli.config)?;
            commands::meetings::run_list(config).await
        }
        Commands::Show { id } => {
            let config = load_config(&cli.config)?;
            commands::meetings::run_show(config, &id).await
        }
        Commands::Insights => {
            let config = load_config(&cli.config)?;
            commands::insights::run(config).await
        }
        Commands::Init { force } => commands::init::run(force),
        Commands::Version => {
            println!("recap {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_version() {
        let cli = Cli::try_parse_from(["recap", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["recap", "serve", "--port", "9090"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(9090)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::try_parse_from([
            "recap",
            "process",
            "standup.mp3",
            "--title",
            "Monday standup",
            "--attendees",
            "kim,lee",
        ])
        .unwrap();
        match cli.command {
            Commands::Process(args) => {
                assert_eq!(args.file.to_string_lossy(), "standup.mp3");
                assert_eq!(args.title.as_deref(), Some("Monday standup"));
                assert_eq!(args.attendees, vec!["kim", "lee"]);
            }
            _ => panic!("Expected Process command"),
        }
    }

    #[test]
    fn test_parse_search() {
        let cli =
            Cli::try_parse_from(["recap", "search", "budget planning", "--limit", "3"]).unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "budget planning");
                assert_eq!(args.limit, Some(3));
                assert!(args.min_score.is_none());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["recap", "show", "abc-123"]).unwrap();
        match cli.command {
            Commands::Show { id } => assert_eq!(id, "abc-123"),
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_parse_init_force() {
        let cli = Cli::try_parse_from(["recap", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }
}
