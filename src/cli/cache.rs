//
//  apigee-mint
//  cli/cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cache maintenance commands.
//!
//! List reads are never invalidated by writes, so a stale list is cleared
//! here or bypassed with `--no-cache`.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use super::GlobalOptions;
use crate::cache::store_from_config;
use crate::config::{CacheBackend, Config};
use crate::context::ContextResolver;

/// Manage the local list cache
#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// Drop cached lists for the current organization
    Clear(ClearArgs),
}

#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Drop a single key (e.g. developer_accepted_rateplan:dev@example.com)
    #[arg(long, short = 'k')]
    pub key: Option<String>,
}

impl CacheCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            CacheSubcommand::Clear(args) => clear(args, global),
        }
    }
}

fn clear(args: &ClearArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    if config.cache.backend != CacheBackend::File {
        println!(
            "The {} cache backend keeps nothing between runs; nothing to clear",
            config.cache.backend
        );
        return Ok(());
    }

    let org = ContextResolver::without_keyring(config.clone()).org(global)?;
    let store = store_from_config(&config.cache, Config::org_cache_dir(&org)?);

    match &args.key {
        Some(key) => {
            store.remove(key);
            println!("{} Cleared {}", style("✓").green(), style(key).cyan());
        }
        None => {
            store.clear();
            println!("{} Cleared cache for {}", style("✓").green(), style(&org).cyan());
        }
    }
    Ok(())
}
