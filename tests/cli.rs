//
//  apigee-mint
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `mint` command isolated from the caller's environment and config.
fn mint(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mint").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .env_remove("MINT_ORG")
        .env_remove("MINT_ENDPOINT")
        .env_remove("MINT_USER")
        .env_remove("MINT_PASSWORD")
        .env_remove("MINT_TOKEN")
        .env_remove("MINT_DEBUG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    mint(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rateplan"))
        .stdout(predicate::str::contains("company"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    mint(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(apigee_mint::VERSION));
}

#[test]
fn test_missing_org_fails() {
    let home = TempDir::new().unwrap();
    mint(&home)
        .args(["rateplan", "list", "--developer", "dev@example.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No organization given"));
}

#[test]
fn test_unsupported_save_mode_is_usage_error() {
    let home = TempDir::new().unwrap();
    mint(&home)
        .args([
            "rp",
            "save",
            "--developer",
            "dev@example.com",
            "--rate-plan",
            "gold-plan",
            "--package",
            "gold",
            "--start-date",
            "2026-01-01",
            "--mode",
            "upsert",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported save method argument: upsert"));
}

#[test]
fn test_page_requires_size() {
    let home = TempDir::new().unwrap();
    mint(&home)
        .args(["rateplan", "list", "-d", "dev@example.com", "--page", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--size"));
}

#[test]
fn test_missing_credentials_is_auth_error() {
    let home = TempDir::new().unwrap();
    mint(&home)
        .args(["--org", "acme", "company", "list"])
        .assert()
        .code(4);
}

#[test]
fn test_completion_script() {
    let home = TempDir::new().unwrap();
    mint(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mint"));
}
