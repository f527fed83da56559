//
//  apigee-mint
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Output formatting for CLI commands
//!
//! Commands print either human-readable tables or pretty JSON (`--json`).
//! Entities describe both renditions through [`TableOutput`].

mod table;
mod views;

pub use table::*;

use console::style;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes command results in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes one value as a detail view.
    pub fn write<T: TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(&value.to_json())?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list, one row per value.
    pub fn write_list<T: TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<Value> = values.iter().map(TableOutput::to_json).collect();
                self.write_json(&Value::Array(items))?;
            }
            OutputFormat::Table => {
                if values.is_empty() {
                    println!("No results");
                    return Ok(());
                }
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers().iter().copied())
                    .rows(values.iter().map(|v| v.row(self.color)))
                    .print();
            }
        }
        Ok(())
    }

    pub fn write_json(&self, value: &Value) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_success(&self, msg: &str) {
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Table and JSON renditions of an entity.
pub trait TableOutput {
    /// Column headers for list views.
    fn headers() -> &'static [&'static str]
    where
        Self: Sized;

    /// One list row, matching [`headers`](Self::headers).
    fn row(&self, color: bool) -> Vec<String>;

    /// Detail view.
    fn print_table(&self, color: bool);

    fn to_json(&self) -> Value;
}

pub fn print_header(text: &str) {
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

/// Placeholder for absent values in tables.
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
