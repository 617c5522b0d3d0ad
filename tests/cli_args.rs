//! Integration tests for the rosterfetch binary
//!
//! Runs the binary against an unreachable API so every run exercises the
//! failure path without touching the network.

use std::process::{Command, Stdio};

use tempfile::TempDir;

const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1/api/v1";

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rosterfetch"))
        .args(args)
        .env_remove("ROSTER_TOKEN")
        .env_remove("ROSTER_USER")
        .env_remove("ROSTER_PASSWORD")
        .env_remove("ROSTER_BASE_URL")
        .output()
        .expect("Failed to execute rosterfetch")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rosterfetch"), "Help should mention rosterfetch");
    assert!(stdout.contains("--token"), "Help should mention --token");
    assert!(stdout.contains("--output"), "Help should mention --output");
}

#[test]
fn test_without_credentials_writes_empty_roster() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("usuarios.json");

    let output = run_cli(&[
        "--base-url",
        UNREACHABLE_BASE_URL,
        "--output",
        path.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "Fetch failure should not fail the run: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No users found"));

    let users = rosterfetch::output::read_users(&path).expect("Output should be readable");
    assert!(users.is_empty());
}

#[test]
fn test_unreachable_api_with_token_writes_empty_roster() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("usuarios.json");

    let output = run_cli(&[
        "--token",
        "abc",
        "--base-url",
        UNREACHABLE_BASE_URL,
        "--timeout-secs",
        "2",
        "--quiet",
        "--output",
        path.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "--quiet should suppress the summary");
    assert!(path.exists());
}

#[test]
fn test_unwritable_output_exits_with_failure() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("missing").join("usuarios.json");

    let output = run_cli(&[
        "--base-url",
        UNREACHABLE_BASE_URL,
        "--quiet",
        "--output",
        path.to_str().unwrap(),
    ]);

    assert!(!output.status.success(), "Expected persistence failure to fail the run");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usuarios.json"), "stderr: {}", stderr);
}

#[test]
fn test_closed_stdout_still_writes_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("usuarios.json");

    let mut child = Command::new(env!("CARGO_BIN_EXE_rosterfetch"))
        .args(["--base-url", UNREACHABLE_BASE_URL, "--output", path.to_str().unwrap()])
        .env_remove("ROSTER_TOKEN")
        .env_remove("ROSTER_USER")
        .env_remove("ROSTER_PASSWORD")
        .env_remove("ROSTER_BASE_URL")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute rosterfetch");

    // Close the read end so every summary write hits a broken pipe
    drop(child.stdout.take());
    let output = child.wait_with_output().expect("Failed to wait for rosterfetch");

    assert!(
        output.status.success(),
        "A closed stdout should not fail the run: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(path.exists(), "Output file should be written before the summary");
    let users = rosterfetch::output::read_users(&path).expect("Output should be readable");
    assert!(users.is_empty());
}

#[test]
fn test_invalid_max_age_exits_with_failure() {
    let output = run_cli(&["--max-age-minutes", "0", "--base-url", UNREACHABLE_BASE_URL]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max age"), "stderr: {}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Library-level tests that don't require running the binary

    use clap::Parser;
    use rosterfetch::cache::RosterCache;
    use rosterfetch::cli::{Cli, StartupConfig};
    use rosterfetch::data::{CredentialSource, RosterClient};
    use rosterfetch::fetch::{FetchOutcome, UserFetcher};

    #[test]
    fn test_startup_config_from_cli_defaults() {
        let cli = Cli::parse_from(["rosterfetch", "--token", "abc"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.credentials, CredentialSource::Token("abc".to_string()));
        assert_eq!(config.max_age, chrono::Duration::minutes(30));
    }

    #[tokio::test]
    async fn test_real_client_failure_falls_back_to_empty() {
        let client = RosterClient::with_base_url(
            super::UNREACHABLE_BASE_URL,
            CredentialSource::None,
            std::time::Duration::from_secs(2),
        )
        .unwrap();
        let fetcher = UserFetcher::new(client);
        let mut cache = RosterCache::new();

        let (users, outcome) = fetcher.fetch_users_with_outcome(&mut cache).await;

        assert!(users.is_empty());
        assert_eq!(outcome, FetchOutcome::Empty);
    }
}
