//
//  apigee-mint
//  cli/rateplan.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Developer rate plan commands.
//!
//! - Listing the rate plans a developer accepted (cached)
//! - Accepting a rate plan
//! - Saving an acceptance with an explicit create/update mode
//! - Deleting an acceptance

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::{GlobalOptions, Session};
use crate::api::common::PageRequest;
use crate::api::controller::{DeveloperRatePlanController, SaveMode};
use crate::api::mint::{DeveloperRatePlan, RatePlan};
use crate::interactive::prompt_confirm_with_default;
use crate::util::parse_date;

/// Manage developer rate plans
#[derive(Args, Debug)]
pub struct RatePlanCommand {
    #[command(subcommand)]
    pub command: RatePlanSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RatePlanSubcommand {
    /// List rate plans accepted by a developer
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Accept a rate plan on behalf of a developer
    Accept(AcceptArgs),

    /// Create or update an acceptance
    Save(SaveArgs),

    /// Delete an acceptance
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Developer email or id
    #[arg(long, short = 'd')]
    pub developer: String,

    /// Page number
    #[arg(long, requires = "size")]
    pub page: Option<u32>,

    /// Page size
    #[arg(long, requires = "page")]
    pub size: Option<u32>,

    /// Bypass the list cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Developer email or id
    #[arg(long, short = 'd')]
    pub developer: String,

    /// Rate plan id
    #[arg(long)]
    pub rate_plan: String,

    /// Monetization package id
    #[arg(long)]
    pub package: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,
}

#[derive(Args, Debug)]
pub struct AcceptArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Accept even if it overlaps an existing plan
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Acceptance id (required for update)
    #[arg(long)]
    pub id: Option<String>,

    /// Save mode: create or update
    #[arg(long, default_value = "create")]
    pub mode: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Developer email or id
    #[arg(long, short = 'd')]
    pub developer: String,

    /// Acceptance id
    #[arg(long)]
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl PlanArgs {
    fn build(&self) -> Result<DeveloperRatePlan> {
        let mut plan = DeveloperRatePlan::new(self.developer.as_str());
        plan.set_rate_plan(RatePlan::with_id(self.package.as_str(), self.rate_plan.as_str()));
        plan.set_start_date(parse_date(&self.start_date)?);
        plan.set_end_date(self.end_date.as_deref().map(parse_date).transpose()?);
        Ok(plan)
    }
}

impl RatePlanCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RatePlanSubcommand::List(args) => self.list(args, global).await,
            RatePlanSubcommand::Accept(args) => self.accept(args, global).await,
            RatePlanSubcommand::Save(args) => self.save(args, global).await,
            RatePlanSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let controller = DeveloperRatePlanController::new(
            &session.client,
            session.cache(args.no_cache)?,
            &args.developer,
        );

        let page = match (args.page, args.size) {
            (Some(page), Some(size)) => Some(PageRequest::new(page, size)),
            _ => None,
        };

        let plans = controller
            .list(page)
            .await
            .with_context(|| format!("Failed to list rate plans for {}", args.developer))?;

        global.output().write_list(&plans)
    }

    async fn accept(&self, args: &AcceptArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let controller = DeveloperRatePlanController::new(
            &session.client,
            session.cache(true)?,
            &args.plan.developer,
        );

        let mut plan = args.plan.build()?;
        if args.force {
            global
                .output()
                .write_warning("Overlap warnings are suppressed for this acceptance");
            controller.force_save(&mut plan).await?;
        } else {
            controller.save(&mut plan, SaveMode::Create).await?;
        }

        let output = global.output();
        if !output.is_json() {
            output.write_success(&format!(
                "Developer {} accepted rate plan {}",
                args.plan.developer, args.plan.rate_plan
            ));
        }
        output.write(&plan)
    }

    async fn save(&self, args: &SaveArgs, global: &GlobalOptions) -> Result<()> {
        // Reject a bad mode before resolving anything
        let mode: SaveMode = args.mode.parse()?;

        let session = Session::open(global)?;
        let controller = DeveloperRatePlanController::new(
            &session.client,
            session.cache(true)?,
            &args.plan.developer,
        );

        let mut plan = args.plan.build()?;
        if let Some(id) = &args.id {
            plan.set_id(id.as_str());
        }
        controller.save(&mut plan, mode).await?;

        let output = global.output();
        if !output.is_json() {
            output.write_success(&format!("Saved developer rate plan ({})", mode));
        }
        output.write(&plan)
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;

        if !args.yes
            && !prompt_confirm_with_default(
                &format!("Delete rate plan acceptance {} for {}?", args.id, args.developer),
                false,
            )?
        {
            println!("Cancelled.");
            return Ok(());
        }

        let controller = DeveloperRatePlanController::new(
            &session.client,
            session.cache(true)?,
            &args.developer,
        );
        controller.delete(&args.id).await?;

        let output = global.output();
        if output.is_json() {
            output.write_json(&serde_json::json!({ "deleted": args.id }))
        } else {
            output.write_success(&format!("Deleted rate plan acceptance {}", args.id));
            Ok(())
        }
    }
}
