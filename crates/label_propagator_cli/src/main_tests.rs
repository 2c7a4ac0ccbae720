use super::*;
use clap::CommandFactory;
use secrecy::ExposeSecret;
use std::path::PathBuf;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_cli_parses_explicit_flags() {
    let cli = Cli::try_parse_from([
        "label-propagator",
        "--github-token",
        "ghp_test_token_value",
        "--event-path",
        "/tmp/event.json",
        "--repository",
        "acme/widgets",
        "--api-url",
        "https://ghe.example.com/api/v3",
        "--config",
        "label-propagator.toml",
        "--dry-run",
    ])
    .expect("flags parse");

    assert_eq!(cli.args.github_token.expose_secret(), "ghp_test_token_value");
    assert_eq!(cli.args.event_path, PathBuf::from("/tmp/event.json"));
    assert_eq!(cli.args.repository.as_deref(), Some("acme/widgets"));
    assert_eq!(
        cli.args.api_url.as_deref(),
        Some("https://ghe.example.com/api/v3")
    );
    assert_eq!(
        cli.args.config,
        Some(PathBuf::from("label-propagator.toml"))
    );
    assert!(cli.args.dry_run);
}

#[test]
fn test_cli_dry_run_defaults_to_false() {
    let cli = Cli::try_parse_from([
        "label-propagator",
        "--github-token",
        "ghp_test_token_value",
        "--event-path",
        "/tmp/event.json",
    ])
    .expect("flags parse");

    assert!(!cli.args.dry_run);
    assert!(cli.args.config.is_none());
}
