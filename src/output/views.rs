//
//  apigee-mint
//  output/views.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde_json::{json, Value};

use super::{format_status, or_dash, print_field, print_header, TableOutput};
use crate::api::management::{Company, CompanyApp};
use crate::api::mint::DeveloperRatePlan;
use crate::mapper::Entity;
use crate::util::{format_millis, format_relative_millis, mask_secret, truncate};

impl TableOutput for DeveloperRatePlan {
    fn headers() -> &'static [&'static str] {
        &["ID", "RATE PLAN", "PACKAGE", "START", "END"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let plan = self.rate_plan();
        vec![
            or_dash(self.id()),
            or_dash(plan.and_then(|p| p.display_name().or(p.id()))),
            or_dash(plan.map(|p| p.package_id())),
            or_dash(self.start_date()),
            or_dash(self.end_date()),
        ]
    }

    fn print_table(&self, color: bool) {
        println!();
        print_header(&format!("Developer rate plan {}", or_dash(self.id())));
        print_field("Developer", self.developer_id(), color);
        if let Some(plan) = self.rate_plan() {
            print_field("Rate plan", &or_dash(plan.id()), color);
            print_field("Package", &or_dash(Some(plan.package_id())), color);
            if let Some(name) = plan.display_name() {
                print_field("Name", name, color);
            }
        }
        print_field("Start date", &or_dash(self.start_date()), color);
        print_field("End date", &or_dash(self.end_date()), color);
        if let Some(renewal) = self.renewal_date() {
            print_field("Renewal", renewal, color);
        }
        if let Some(fee) = self.next_recurring_fee_date() {
            print_field("Next recurring fee", fee, color);
        }
        println!();
    }

    fn to_json(&self) -> Value {
        let mut payload = self.to_payload();
        for (key, value) in [
            ("renewalDate", self.renewal_date()),
            ("nextRecurringFeeDate", self.next_recurring_fee_date()),
        ] {
            if let Some(v) = value {
                payload.insert(key.to_string(), Value::String(v.to_string()));
            }
        }
        Value::Object(payload)
    }
}

impl TableOutput for CompanyApp {
    fn headers() -> &'static [&'static str] {
        &["NAME", "DISPLAY NAME", "STATUS", "PRODUCTS", "CREATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            or_dash(self.name()),
            truncate(&or_dash(self.display_name()), 30),
            self.status()
                .map_or_else(|| "-".to_string(), |s| format_status(s, color)),
            truncate(&self.api_products().join(", "), 40),
            self.created_at()
                .map_or_else(|| "-".to_string(), format_relative_millis),
        ]
    }

    fn print_table(&self, color: bool) {
        println!();
        print_header(&format!("App {}", or_dash(self.name())));
        print_field("Company", self.company(), color);
        print_field("App ID", &or_dash(self.app_id()), color);
        print_field("Display name", &or_dash(self.display_name()), color);
        print_field("Description", &or_dash(self.description()), color);
        if let Some(status) = self.status() {
            print_field("Status", &format_status(status, color), color);
        }
        print_field("Callback URL", &or_dash(self.callback_url()), color);
        print_field("API products", &self.api_products().join(", "), color);
        if let Some(created) = self.created_at() {
            print_field("Created", &format_millis(created), color);
        }
        if let Some(modified) = self.last_modified_at() {
            print_field("Last modified", &format_millis(modified), color);
        }
        for credential in self.credentials() {
            println!();
            print_field("Consumer key", &credential.consumer_key, color);
            if let Some(secret) = &credential.consumer_secret {
                print_field("  Secret", &mask_secret(secret), color);
            }
            if let Some(status) = &credential.status {
                print_field("  Status", &format_status(status, color), color);
            }
            let products: Vec<&str> = credential
                .api_products
                .iter()
                .map(|p| p.api_product.as_str())
                .collect();
            print_field("  Products", &products.join(", "), color);
        }
        println!();
    }

    fn to_json(&self) -> Value {
        let mut payload = self.to_payload();
        if let Some(app_id) = self.app_id() {
            payload.insert("appId".to_string(), Value::String(app_id.to_string()));
        }
        if let Some(status) = self.status() {
            payload.insert("status".to_string(), Value::String(status.to_string()));
        }
        payload.insert("credentials".to_string(), json!(self.credentials()));
        if let Some(created) = self.created_at() {
            payload.insert("createdAt".to_string(), json!(created));
        }
        if let Some(modified) = self.last_modified_at() {
            payload.insert("lastModifiedAt".to_string(), json!(modified));
        }
        Value::Object(payload)
    }
}

impl TableOutput for Company {
    fn headers() -> &'static [&'static str] {
        &["NAME", "DISPLAY NAME", "STATUS", "APPS"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            or_dash(self.name()),
            or_dash(self.display_name()),
            self.status()
                .map_or_else(|| "-".to_string(), |s| format_status(s, color)),
            self.apps().len().to_string(),
        ]
    }

    fn print_table(&self, color: bool) {
        println!();
        print_header(&format!("Company {}", or_dash(self.name())));
        print_field("Display name", &or_dash(self.display_name()), color);
        if let Some(status) = self.status() {
            print_field("Status", &format_status(status, color), color);
        }
        print_field("Apps", &self.apps().join(", "), color);
        for attribute in self.attributes().iter() {
            print_field(&format!("  {}", attribute.name), &attribute.value, color);
        }
        if let Some(created) = self.created_at() {
            print_field("Created", &format_millis(created), color);
        }
        println!();
    }

    fn to_json(&self) -> Value {
        let mut payload = self.to_payload();
        payload.insert("apps".to_string(), json!(self.apps()));
        Value::Object(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mint::RatePlan;

    #[test]
    fn test_rate_plan_row() {
        let mut plan = DeveloperRatePlan::new("dev");
        plan.set_id("rp1");
        plan.set_start_date("2026-02-01");
        plan.set_rate_plan(RatePlan::with_id("pkg", "gold"));

        assert_eq!(
            plan.row(false),
            vec!["rp1", "gold", "pkg", "2026-02-01", "-"]
        );
        assert_eq!(plan.to_json()["ratePlan"]["id"], "gold");
    }

    #[test]
    fn test_app_json_has_server_fields() {
        let app = CompanyApp::named("acme", "phone");
        let value = app.to_json();
        assert_eq!(value["name"], "phone");
        assert_eq!(value["credentials"], json!([]));
    }
}
