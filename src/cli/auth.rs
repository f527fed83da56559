//
//  apigee-mint
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! Edge management calls use basic authentication with an organization user.
//! `login` verifies the password against the organization and stores it in
//! the system keyring; the user and endpoint go into the config file.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde_json::{json, Value};

use super::GlobalOptions;
use crate::api::{ApiError, EdgeClient};
use crate::auth::{credential_key, AuthCredential, KeyringStore};
use crate::config::{normalize_endpoint, Config, DEFAULT_ENDPOINT};
use crate::interactive::{prompt_input, prompt_password};

/// Store and check credentials
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in to an organization
    Login,

    /// Remove the stored password for an organization
    Logout,

    /// View configured organizations and stored credentials
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Verify stored credentials against the server
    #[arg(long)]
    pub check: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login => login(global).await,
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status(args) => status(args, global).await,
        }
    }
}

/// Organization, endpoint and user for `login`, prompting for what is missing.
fn login_target(config: &Config, global: &GlobalOptions) -> Result<(String, String, String)> {
    let org = match global.org.clone().or_else(|| config.core.default_org.clone()) {
        Some(org) => org,
        None => prompt_input("Organization:")?,
    };
    let org_config = config.org_config(&org);

    let endpoint = normalize_endpoint(
        global
            .endpoint
            .as_deref()
            .or_else(|| org_config.and_then(|o| o.endpoint.as_deref()))
            .unwrap_or(DEFAULT_ENDPOINT),
    );

    let user = match global
        .user
        .clone()
        .or_else(|| org_config.and_then(|o| o.user.clone()))
    {
        Some(user) => user,
        None => prompt_input("Organization user (email):")?,
    };

    Ok((org, endpoint, user))
}

async fn login(global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    let (org, endpoint, user) = login_target(&config, global)?;

    let password = match &global.password {
        Some(password) => password.clone(),
        None => prompt_password(&format!("Password for {}:", user))?,
    };
    if password.is_empty() {
        bail!("Password cannot be empty");
    }

    let credential = AuthCredential::basic(user.as_str(), password.as_str());
    let timeout = std::time::Duration::from_secs(config.core.timeout_secs);
    let client = EdgeClient::with_timeout(&endpoint, &org, timeout)?.with_auth(credential);

    println!("Verifying credentials...");
    if let Err(e) = verify(&client).await {
        if e.response().is_some_and(|r| r.is_auth()) {
            bail!("Invalid credentials for {} on {}", user, org);
        }
        return Err(e.into());
    }

    KeyringStore::new().store(&credential_key(&user, &endpoint), &password)?;

    let org_config = config.org_config_mut(&org);
    org_config.endpoint = Some(endpoint.clone());
    org_config.user = Some(user.clone());
    if config.core.default_org.is_none() {
        config.core.default_org = Some(org.clone());
    }
    config.save()?;

    println!(
        "{} Logged in to {} as {}",
        style("✓").green(),
        style(&org).cyan(),
        user
    );
    Ok(())
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    let Some(org) = global.org.clone().or_else(|| config.core.default_org.clone()) else {
        println!("No organization configured");
        return Ok(());
    };

    let Some(org_config) = config.orgs.get_mut(&org) else {
        println!("Not logged in to {}", org);
        return Ok(());
    };

    let endpoint = normalize_endpoint(org_config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT));
    if let Some(user) = org_config.user.take() {
        KeyringStore::new().delete(&credential_key(&user, &endpoint))?;
    }
    config.save()?;

    println!("Logged out of {}", org);
    Ok(())
}

async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let keyring = KeyringStore::new();

    if config.orgs.is_empty() {
        if global.json {
            println!("[]");
        } else {
            println!("No organizations configured");
            println!();
            println!("Run 'mint auth login --org <org>' to authenticate");
        }
        return Ok(());
    }

    let mut report = Vec::new();
    for (org, org_config) in &config.orgs {
        let endpoint = normalize_endpoint(org_config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT));
        let password = match &org_config.user {
            Some(user) => keyring.get(&credential_key(user, &endpoint)).unwrap_or_else(|e| {
                tracing::debug!("Keyring unavailable: {}", e);
                None
            }),
            None => None,
        };

        let verified = match (&org_config.user, &password, args.check) {
            (Some(user), Some(password), true) => {
                let client = EdgeClient::new(&endpoint, org)?
                    .with_auth(AuthCredential::basic(user.as_str(), password.as_str()));
                Some(verify(&client).await.is_ok())
            }
            _ => None,
        };

        report.push(json!({
            "org": org,
            "endpoint": endpoint,
            "user": org_config.user,
            "default": config.core.default_org.as_deref() == Some(org.as_str()),
            "passwordStored": password.is_some(),
            "verified": verified,
        }));
    }

    if global.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for entry in &report {
        let marker = if entry["default"] == true { " (default)" } else { "" };
        println!("{}{}", style(entry["org"].as_str().unwrap_or("-")).bold(), marker);
        println!("  Endpoint: {}", entry["endpoint"].as_str().unwrap_or("-"));
        println!("  User: {}", entry["user"].as_str().unwrap_or("-"));
        println!(
            "  Password: {}",
            if entry["passwordStored"] == true { "stored in keyring" } else { "not stored" }
        );
        match entry["verified"].as_bool() {
            Some(true) => println!("  Status: {}", style("Active").green()),
            Some(false) => println!("  Status: {}", style("Invalid").red()),
            None => {}
        }
        println!();
    }
    Ok(())
}

/// Fetches the organization record, which any org user may read.
async fn verify(client: &EdgeClient) -> Result<(), ApiError> {
    let _: Value = client.get(&client.org_path()).await?;
    Ok(())
}
