//! CLI argument routing integration tests.
//!
//! These tests parse argument vectors through the real CLI definition to
//! verify top-level command routing and flag handling.

use clap::Parser;
use recap_cli::{Cli, Commands};

#[test]
fn test_route_version() {
    let cli = Cli::try_parse_from(["recap", "version"]).unwrap();
    assert!(matches!(cli.command, Commands::Version));
}

#[test]
fn test_route_serve_defaults() {
    let cli = Cli::try_parse_from(["recap", "serve"]).unwrap();
    match cli.command {
        Commands::Serve(args) => {
            assert!(args.port.is_none());
            assert!(!args.lan);
            assert!(!args.no_backfill);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_route_serve_flags() {
    let cli =
        Cli::try_parse_from(["recap", "serve", "--port", "9000", "--lan", "--no-backfill"])
            .unwrap();
    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.port, Some(9000));
            assert!(args.lan);
            assert!(args.no_backfill);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_route_search_with_floor() {
    let cli = Cli::try_parse_from([
        "recap",
        "search",
        "hiring plans",
        "--min-score",
        "0.25",
    ])
    .unwrap();
    match cli.command {
        Commands::Search(args) => {
            assert_eq!(args.query, "hiring plans");
            assert_eq!(args.min_score, Some(0.25));
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn test_route_process_attendee_list() {
    let cli = Cli::try_parse_from([
        "recap",
        "process",
        "sync.wav",
        "--attendees",
        "kim,lee,sam",
    ])
    .unwrap();
    match cli.command {
        Commands::Process(args) => {
            assert_eq!(args.attendees, vec!["kim", "lee", "sam"]);
        }
        _ => panic!("Expected Process command"),
    }
}

#[test]
fn test_global_config_flag() {
    let cli = Cli::try_parse_from(["recap", "--config", "/tmp/alt.json5", "list"]).unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/alt.json5"))
    );
    assert!(matches!(cli.command, Commands::List));
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["recap", "frobnicate"]).is_err());
}

#[test]
fn test_verbose_flag_counts() {
    let cli = Cli::try_parse_from(["recap", "-vv", "list"]).unwrap();
    assert_eq!(cli.verbose, 2);
}
