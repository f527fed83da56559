//
//  apigee-mint
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod app;
mod auth;
mod cache;
mod company;
mod completion;
mod config;
mod rateplan;

pub use app::AppCommand;
pub use auth::AuthCommand;
pub use cache::CacheCommand;
pub use company::CompanyCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use rateplan::RatePlanCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::EdgeClient;
use crate::cache::{store_from_config, CacheAside};
use crate::config::Config;
use crate::context::{ContextResolver, OrgContext};
use crate::mapper::Mapper;
use crate::output::{OutputFormat, OutputWriter};

/// Apigee Mint CLI - Work with Apigee Edge and Monetization from the command line
#[derive(Parser, Debug)]
#[command(
    name = "mint",
    version,
    about = "Work with Apigee Edge and Monetization from the command line",
    long_about = "mint manages Apigee Edge companies and apps and the Monetization\n\
                  rate plans developers accept.",
    propagate_version = true,
    after_help = "Use 'mint <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Edge organization
    #[arg(long, short = 'o', global = true, env = "MINT_ORG")]
    pub org: Option<String>,

    /// Management API endpoint
    #[arg(long, global = true, env = "MINT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Organization user for basic authentication
    #[arg(long, short = 'u', global = true, env = "MINT_USER")]
    pub user: Option<String>,

    /// Password for basic authentication
    #[arg(long, global = true, env = "MINT_PASSWORD", hide = true, hide_env_values = true)]
    pub password: Option<String>,

    /// OAuth bearer token, used instead of basic authentication
    #[arg(long, global = true, env = "MINT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage developer rate plans (Monetization)
    #[command(name = "rateplan", visible_alias = "rp")]
    RatePlan(RatePlanCommand),

    /// Manage company apps
    App(AppCommand),

    /// Inspect companies
    Company(CompanyCommand),

    /// Store and check credentials
    Auth(AuthCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Manage the local list cache
    Cache(CacheCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),
}

/// No credentials could be resolved for the organization.
#[derive(Debug, thiserror::Error)]
#[error("Not authenticated for organization '{org}'. Run 'mint auth login' or pass --token")]
pub struct NotAuthenticated {
    pub org: String,
}

/// What a command needs to talk to one organization.
pub(crate) struct Session {
    pub context: OrgContext,
    pub client: EdgeClient,
    pub config: Config,
}

impl Session {
    /// Resolves the organization context and builds an authenticated client.
    pub fn open(global: &GlobalOptions) -> Result<Self> {
        let config = Config::load()?;
        let context = ContextResolver::new(config.clone()).resolve(global)?;
        if !context.is_authenticated() {
            return Err(NotAuthenticated { org: context.org }.into());
        }
        let client = context.client()?;
        Ok(Self {
            context,
            client,
            config,
        })
    }

    pub fn mapper(&self) -> Mapper {
        Mapper::with_tracing()
    }

    /// The list cache selected by configuration, or none with `--no-cache`.
    pub fn cache(&self, no_cache: bool) -> Result<CacheAside> {
        if no_cache {
            return Ok(CacheAside::disabled(self.mapper()));
        }
        // Keys are org-agnostic, so each org gets its own directory
        let dir = Config::org_cache_dir(&self.context.org)?;
        let store = store_from_config(&self.config.cache, dir);
        Ok(CacheAside::new(store, self.mapper()))
    }
}
