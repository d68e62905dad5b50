//! Tests for the CLI

use super::*;
use crate::card::Transform;
use crate::error::Error;
use crate::output::OutputFormat;
use clap::Parser;
use serde_json::json;
use std::io::Write;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test_case("set", Commands::Set ; "set")]
#[test_case("set-rarity", Commands::SetRarity ; "set rarity")]
#[test_case("ktk", Commands::Ktk ; "ktk")]
fn test_parse_subcommand(arg: &str, expected: Commands) {
    let cli = Cli::try_parse_from(["mtg-harvest", arg]).unwrap();
    assert_eq!(cli.command, expected);
    assert_eq!(cli.format, OutputFormat::Pretty);
    assert!(!cli.verbose);
}

#[test]
fn test_parse_missing_subcommand_fails() {
    assert!(Cli::try_parse_from(["mtg-harvest"]).is_err());
}

#[test]
fn test_parse_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["mtg-harvest", "colors"]).is_err());
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "mtg-harvest",
        "ktk",
        "--base-url",
        "http://localhost:9999/v1",
        "--max-burst",
        "5",
        "--tick-ms",
        "250",
        "--format",
        "json",
        "-v",
    ])
    .unwrap();

    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9999/v1"));
    assert_eq!(cli.max_burst, Some(5));
    assert_eq!(cli.tick_ms, Some(250));
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(cli.verbose);
}

#[test]
fn test_command_transforms() {
    assert_eq!(Commands::Set.transform(), Transform::SortBySet);
    assert_eq!(Commands::SetRarity.transform(), Transform::SortBySetAndRarity);
    assert_eq!(Commands::Ktk.transform(), Transform::ktk_red_blue());
}

async fn mount_two_pages(server: &MockServer) {
    let last = format!("<{}/cards?page=2>; rel=\"last\"", server.uri());

    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", last.as_str())
                .insert_header("Ratelimit-Remaining", "4999")
                .set_body_json(json!({"cards": [
                    {"name": "Mistfire Weaver", "colors": ["Blue"], "rarity": "Uncommon", "set": "KTK"},
                    {"name": "Savage Lands", "rarity": "Uncommon", "set": "ALA"}
                ]})),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cards": [
            {"name": "Ride Down", "colors": ["Red", "White"], "rarity": "Uncommon", "set": "KTK"},
            {"name": "Icefeather Aven", "colors": ["Green", "Blue"], "rarity": "Uncommon", "set": "KTK"},
            {"name": "Goblin Guide", "colors": ["Red"], "rarity": "Rare", "set": "ZEN"}
        ]})))
        .mount(server)
        .await;
}

fn runner_for(server: &MockServer, args: &[&str]) -> Runner {
    let base_url = server.uri();
    let mut argv = vec!["mtg-harvest", "--base-url", base_url.as_str(), "--tick-ms", "10"];
    argv.extend_from_slice(args);
    Runner::new(Cli::try_parse_from(argv).unwrap())
}

#[tokio::test]
async fn test_execute_set_sorts_all_cards() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let mut out = Vec::new();
    let written = runner_for(&server, &["set"])
        .execute(&mut out)
        .await
        .unwrap();

    assert_eq!(written, 5);
    let text = String::from_utf8(out).unwrap();
    let sets: Vec<&str> = text
        .lines()
        .map(|l| l.rsplit("Set: ").next().unwrap())
        .collect();
    assert_eq!(sets, vec!["ALA", "KTK", "KTK", "KTK", "ZEN"]);
}

#[tokio::test]
async fn test_execute_ktk_without_matches_prints_notice() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let mut out = Vec::new();
    let written = runner_for(&server, &["ktk"])
        .execute(&mut out)
        .await
        .unwrap();

    assert_eq!(written, 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "No cards for the given option\n"
    );
}

#[tokio::test]
async fn test_execute_json_format() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let mut out = Vec::new();
    let written = runner_for(&server, &["set-rarity", "--format", "json"])
        .execute(&mut out)
        .await
        .unwrap();

    assert_eq!(written, 5);
    let text = String::from_utf8(out).unwrap();
    for line in text.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value["name"].is_string());
    }
}

#[tokio::test]
async fn test_execute_bootstrap_failure_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(500).set_body_string("\"Internal Error\""))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = runner_for(&server, &["set"])
        .execute(&mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Bootstrap { .. }));
    assert!(err.is_fatal());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_execute_reads_config_file() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "api:\n  base_url: \"{}\"\nthrottle:\n  max_burst: 1\n  tick_interval_ms: 10",
        server.uri()
    )
    .unwrap();
    let config_path = file.path().to_string_lossy().to_string();

    let cli = Cli::try_parse_from(["mtg-harvest", "--config", &config_path, "set"]).unwrap();
    let mut out = Vec::new();
    let written = Runner::new(cli).execute(&mut out).await.unwrap();

    assert_eq!(written, 5);
}

#[tokio::test]
async fn test_execute_rejects_zero_burst() {
    let server = MockServer::start().await;

    let mut out = Vec::new();
    let err = runner_for(&server, &["set", "--max-burst", "0"])
        .execute(&mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}
