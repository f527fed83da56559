//
//  apigee-mint
//  cli/app.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Company app commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::{GlobalOptions, Session};
use crate::api::controller::CompanyAppController;
use crate::api::management::CompanyApp;
use crate::interactive::prompt_confirm_with_default;

/// Manage company apps
#[derive(Args, Debug)]
pub struct AppCommand {
    #[command(subcommand)]
    pub command: AppSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AppSubcommand {
    /// List a company's apps
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View one app
    View(ViewArgs),

    /// Create an app
    Create(CreateArgs),

    /// Update an app
    Update(UpdateArgs),

    /// Delete an app
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Owning company
    #[arg(long, short = 'c')]
    pub company: String,

    /// Print app names only
    #[arg(long)]
    pub names: bool,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// App name
    pub name: String,

    /// Owning company
    #[arg(long, short = 'c')]
    pub company: String,
}

#[derive(Args, Debug)]
pub struct AppFields {
    /// API product to attach (repeatable)
    #[arg(long = "product", short = 'p')]
    pub products: Vec<String>,

    /// Display name
    #[arg(long)]
    pub display_name: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// OAuth callback URL
    #[arg(long)]
    pub callback_url: Option<String>,

    /// Custom attribute as NAME=VALUE (repeatable)
    #[arg(long = "attribute", short = 'a', value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,
}

/// Parses `NAME=VALUE`. The value may be empty or contain `=`.
fn parse_attribute(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid attribute '{}'. Expected NAME=VALUE", input)),
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// App name
    pub name: String,

    /// Owning company
    #[arg(long, short = 'c')]
    pub company: String,

    #[command(flatten)]
    pub fields: AppFields,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// App name
    pub name: String,

    /// Owning company
    #[arg(long, short = 'c')]
    pub company: String,

    #[command(flatten)]
    pub fields: AppFields,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// App name
    pub name: String,

    /// Owning company
    #[arg(long, short = 'c')]
    pub company: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl AppFields {
    /// Applies the given fields. Products replace the current list only when
    /// at least one is given.
    fn apply(&self, app: &mut CompanyApp) {
        if !self.products.is_empty() {
            app.set_api_products(self.products.clone());
        }
        if let Some(display_name) = &self.display_name {
            app.set_display_name(display_name.as_str());
        }
        if let Some(description) = &self.description {
            app.set_description(description.as_str());
        }
        if let Some(url) = &self.callback_url {
            app.set_callback_url(Some(url.clone()));
        }
        for (name, value) in &self.attributes {
            app.attributes_mut().set(name, value.as_str());
        }
    }
}

impl AppCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AppSubcommand::List(args) => self.list(args, global).await,
            AppSubcommand::View(args) => self.view(args, global).await,
            AppSubcommand::Create(args) => self.create(args, global).await,
            AppSubcommand::Update(args) => self.update(args, global).await,
            AppSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let controller =
            CompanyAppController::for_company(&session.client, session.mapper(), &args.company);
        let output = global.output();

        if args.names {
            let names = controller.list_names().await?;
            if output.is_json() {
                return output.write_json(&serde_json::json!(names));
            }
            for name in names {
                println!("{}", name);
            }
            return Ok(());
        }

        let apps = controller
            .list()
            .await
            .with_context(|| format!("Failed to list apps of {}", args.company))?;
        output.write_list(&apps)
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let controller =
            CompanyAppController::for_company(&session.client, session.mapper(), &args.company);

        let app = controller.load(&args.name).await?;
        global.output().write(&app)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let controller =
            CompanyAppController::for_company(&session.client, session.mapper(), &args.company);

        let mut app = CompanyApp::named(args.company.as_str(), args.name.as_str());
        args.fields.apply(&mut app);
        controller.create(&mut app).await?;

        let output = global.output();
        if !output.is_json() {
            output.write_success(&format!("Created app {} for {}", args.name, args.company));
        }
        output.write(&app)
    }

    async fn update(&self, args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let controller =
            CompanyAppController::for_company(&session.client, session.mapper(), &args.company);

        let mut app = controller.load(&args.name).await?;
        args.fields.apply(&mut app);
        controller.update(&mut app).await?;

        let output = global.output();
        if !output.is_json() {
            output.write_success(&format!("Updated app {}", args.name));
        }
        output.write(&app)
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;

        if !args.yes
            && !prompt_confirm_with_default(
                &format!("Delete app {} of {}? This cannot be undone!", args.name, args.company),
                false,
            )?
        {
            println!("Cancelled.");
            return Ok(());
        }

        let controller =
            CompanyAppController::for_company(&session.client, session.mapper(), &args.company);
        controller.delete(&args.name).await?;

        let output = global.output();
        if output.is_json() {
            output.write_json(&serde_json::json!({ "deleted": args.name }))
        } else {
            output.write_success(&format!("Deleted app {}", args.name));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute() {
        assert_eq!(
            parse_attribute("Tier=gold"),
            Ok(("Tier".to_string(), "gold".to_string()))
        );
        assert_eq!(
            parse_attribute("Query=a=b"),
            Ok(("Query".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_attribute("Empty="), Ok(("Empty".to_string(), String::new())));
        assert!(parse_attribute("novalue").is_err());
        assert!(parse_attribute("=x").is_err());
    }

    #[test]
    fn test_apply_sets_attributes_in_place() {
        let mut app = CompanyApp::named("acme", "phone");
        app.set_display_name("Phone");

        let fields = AppFields {
            products: vec![],
            display_name: Some("Phone 2".to_string()),
            description: None,
            callback_url: None,
            attributes: vec![("Tier".to_string(), "gold".to_string())],
        };
        fields.apply(&mut app);

        assert_eq!(app.display_name(), Some("Phone 2"));
        assert_eq!(app.attributes().get("Tier"), Some("gold"));
        assert_eq!(app.attributes().iter().count(), 2);
        assert!(app.api_products().is_empty());
    }
}
