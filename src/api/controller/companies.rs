//
//  apigee-mint
//  api/controller/companies.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use super::EntityController;
use crate::api::client::EdgeClient;
use crate::api::common::ApiError;
use crate::api::management::{Company, CompanyApp};
use crate::mapper::Mapper;

/// Controller for `/organizations/{org}/companies/{company}/apps`.
pub type CompanyAppController<'c> = EntityController<'c, CompanyApp>;

/// Controller for `/organizations/{org}/companies`.
pub type CompanyController<'c> = EntityController<'c, Company>;

impl<'c> EntityController<'c, CompanyApp> {
    /// Apps of one company.
    pub fn for_company(client: &'c EdgeClient, mapper: Mapper, company: &str) -> Self {
        let collection = client
            .org_path()
            .segment("companies")
            .segment(company)
            .segment("apps");
        Self::new(client, mapper, collection, "app", CompanyApp::new(company))
    }
}

impl<'c> EntityController<'c, Company> {
    /// Companies of the client's organization.
    pub fn companies(client: &'c EdgeClient, mapper: Mapper) -> Self {
        let collection = client.org_path().segment("companies");
        Self::new(client, mapper, collection, "company", Company::new())
    }

    /// Whether `company` owns an app named `app`.
    pub async fn has_app(&self, company: &str, app: &str) -> Result<bool, ApiError> {
        Ok(self.load(company).await?.has_app(app))
    }
}
