//
//  apigee-mint
//  cli/company.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Company commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use super::{GlobalOptions, Session};
use crate::api::controller::CompanyController;

/// Inspect companies
#[derive(Args, Debug)]
pub struct CompanyCommand {
    #[command(subcommand)]
    pub command: CompanySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CompanySubcommand {
    /// List companies in the organization
    #[command(visible_alias = "ls")]
    List,

    /// View one company
    View(ViewArgs),

    /// Check whether a company owns an app
    #[command(name = "has-app")]
    HasApp(HasAppArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Company name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct HasAppArgs {
    /// Company name
    pub name: String,

    /// App name
    pub app: String,
}

impl CompanyCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let controller = CompanyController::companies(&session.client, session.mapper());
        let output = global.output();

        match &self.command {
            CompanySubcommand::List => {
                let companies = controller.list().await?;
                output.write_list(&companies)
            }
            CompanySubcommand::View(args) => {
                let company = controller.load(&args.name).await?;
                output.write(&company)
            }
            CompanySubcommand::HasApp(args) => {
                let has_app = controller.has_app(&args.name, &args.app).await?;
                if output.is_json() {
                    return output.write_json(&serde_json::json!({
                        "company": args.name,
                        "app": args.app,
                        "hasApp": has_app,
                    }));
                }
                if has_app {
                    println!("{} {} owns {}", style("✓").green(), args.name, args.app);
                } else {
                    println!("{} {} does not own {}", style("✗").red(), args.name, args.app);
                }
                Ok(())
            }
        }
    }
}
