//
//  apigee-mint
//  api/management/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Edge management API entities under `/organizations/{org}`.
//!
//! - [`company`] - Companies and the names of their apps
//! - [`company_app`] - Apps owned by a company, with their credentials

pub mod company;
pub mod company_app;

pub use company::Company;
pub use company_app::{CompanyApp, Credential, CredentialProduct};
