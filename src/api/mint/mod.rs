//
//  apigee-mint
//  api/mint/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Monetization (Mint) API entities.
//!
//! Mint resources live under `/mint/organizations/{org}` and are hydrated
//! through the [`Mapper`](crate::mapper::Mapper) like every other entity.
//!
//! - [`developer_rate_plan`] - A developer's acceptance of a rate plan
//! - [`rate_plan`] - Rate plans of a monetization package

pub mod developer_rate_plan;
pub mod rate_plan;

pub use developer_rate_plan::DeveloperRatePlan;
pub use rate_plan::RatePlan;
