//
//  apigee-mint
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Prompts Module
//!
//! Thin wrappers over `dialoguer` used by `mint auth login` and by
//! destructive commands that ask for confirmation.
//!
//! # Example
//!
//! ```no_run
//! use apigee_mint::interactive::prompt::{prompt_input, prompt_password};
//!
//! let user = prompt_input("Organization user:").unwrap();
//! let password = prompt_password("Password:").unwrap();
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompts the user for text input.
///
/// The input cannot be empty; the prompt repeats until text is entered.
///
/// # Returns
///
/// Returns `Err` if the terminal interaction fails (e.g., stdin closed).
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Prompts for a password. Input is not echoed.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Yes/no prompt with a default answer.
pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
