//
//  apigee-mint
//  config/orgs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Organization Defaults
//!
//! Edge SaaS organizations share one management endpoint; private cloud
//! installations configure their own.
//!
//! ```rust
//! use apigee_mint::config::{normalize_endpoint, DEFAULT_ENDPOINT};
//!
//! assert_eq!(normalize_endpoint(" https://edge.example.com/v1/ "), "https://edge.example.com/v1");
//! assert_eq!(normalize_endpoint("edge.example.com/v1"), "https://edge.example.com/v1");
//! assert!(DEFAULT_ENDPOINT.ends_with("/v1"));
//! ```

/// Management endpoint of Edge SaaS.
pub const DEFAULT_ENDPOINT: &str = "https://api.enterprise.apigee.com/v1";

/// Trims whitespace and trailing slashes and adds `https://` when no scheme is given.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.starts_with("https://") || endpoint.starts_with("http://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}
