//
//  apigee-mint
//  tests/company_apps.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::sync::Arc;

use apigee_mint::api::controller::{CompanyAppController, CompanyController};
use apigee_mint::api::management::CompanyApp;
use apigee_mint::api::{ApiError, EdgeClient};
use apigee_mint::auth::AuthCredential;
use apigee_mint::mapper::{Diagnostic, Entity, Mapper, RecordingSink};
use mockito::{Matcher, Server};
use serde_json::{json, Value};

const APPS: &str = "/organizations/acme/companies/bigco/apps";
const COMPANY: &str = "/organizations/acme/companies/bigco";

fn client(server: &Server) -> EdgeClient {
    EdgeClient::new(&server.url(), "acme")
        .unwrap()
        .with_auth(AuthCredential::bearer("token"))
}

fn app_body(display_name: &str) -> String {
    json!({
        "name": "phone",
        "appId": "a-1",
        "status": "approved",
        "callbackUrl": "https://example.com/cb",
        "attributes": [
            {"name": "DisplayName", "value": display_name},
            {"name": "Notes", "value": "Mobile app"}
        ],
        "credentials": [{
            "consumerKey": "key-1",
            "consumerSecret": "secret-1",
            "status": "approved",
            "apiProducts": [{"apiproduct": "gold", "status": "approved"}],
            "scopes": [],
            "issuedAt": 1700000000000i64,
            "expiresAt": -1
        }],
        "companyName": "bigco",
        "createdAt": 1700000000000i64,
        "createdBy": "me@example.com",
        "lastModifiedAt": 1700000000000i64,
        "lastModifiedBy": "me@example.com"
    })
    .to_string()
}

fn company_body(apps: Value) -> String {
    json!({
        "name": "bigco",
        "displayName": "Big Co",
        "status": "active",
        "apps": apps,
        "attributes": [],
        "organization": "acme"
    })
    .to_string()
}

#[tokio::test]
async fn test_company_app_lifecycle() {
    let mut server = Server::new_async().await;
    let client = client(&server);
    let mapper = Mapper::default();
    let apps = CompanyAppController::for_company(&client, mapper.clone(), "bigco");
    let companies = CompanyController::companies(&client, mapper);

    // create
    let create = server
        .mock("POST", APPS)
        .match_header("authorization", "Bearer token")
        .match_body(Matcher::PartialJson(json!({
            "name": "phone",
            "apiProducts": ["gold"],
            "attributes": [{"name": "DisplayName", "value": "Phone"}]
        })))
        .with_status(201)
        .with_body(app_body("Phone"))
        .create_async()
        .await;

    let mut app = CompanyApp::named("bigco", "phone");
    app.set_api_products(vec!["gold".to_string()]);
    app.set_display_name("Phone");
    apps.create(&mut app).await.unwrap();
    create.assert_async().await;

    assert_eq!(app.app_id(), Some("a-1"));
    assert_eq!(app.description(), Some("Mobile app"));
    assert_eq!(app.credential_products(), vec!["gold"]);

    // load
    let load = server
        .mock("GET", format!("{}/phone", APPS).as_str())
        .with_status(200)
        .with_body(app_body("Phone"))
        .create_async()
        .await;

    let loaded = apps.load("phone").await.unwrap();
    load.assert_async().await;
    assert_eq!(loaded.name(), Some("phone"));
    assert_eq!(loaded.company(), "bigco");
    assert_eq!(loaded.credentials()[0].consumer_key, "key-1");

    // update
    let update = server
        .mock("PUT", format!("{}/phone", APPS).as_str())
        .match_body(Matcher::PartialJson(json!({
            "name": "phone",
            "attributes": [
                {"name": "DisplayName", "value": "Phone 2"},
                {"name": "Notes", "value": "Mobile app"}
            ]
        })))
        .with_status(200)
        .with_body(app_body("Phone 2"))
        .create_async()
        .await;

    let mut loaded = loaded;
    loaded.set_display_name("Phone 2");
    apps.update(&mut loaded).await.unwrap();
    update.assert_async().await;
    assert_eq!(loaded.display_name(), Some("Phone 2"));

    // company has app
    let with_app = server
        .mock("GET", COMPANY)
        .with_status(200)
        .with_body(company_body(json!(["phone"])))
        .create_async()
        .await;

    assert!(companies.has_app("bigco", "phone").await.unwrap());
    with_app.assert_async().await;
    with_app.remove_async().await;

    // delete
    let delete = server
        .mock("DELETE", format!("{}/phone", APPS).as_str())
        .with_status(200)
        .with_body(app_body("Phone 2"))
        .create_async()
        .await;

    apps.delete("phone").await.unwrap();
    delete.assert_async().await;

    // company no longer has app
    let without_app = server
        .mock("GET", COMPANY)
        .with_status(200)
        .with_body(company_body(json!([])))
        .create_async()
        .await;

    assert!(!companies.has_app("bigco", "phone").await.unwrap());
    without_app.assert_async().await;
}

#[tokio::test]
async fn test_list_expanded_and_names() {
    let mut server = Server::new_async().await;
    let expanded = server
        .mock("GET", APPS)
        .match_query(Matcher::UrlEncoded("expand".into(), "true".into()))
        .with_status(200)
        .with_body(format!(r#"{{"app":[{}]}}"#, app_body("Phone")))
        .create_async()
        .await;
    let names = server
        .mock("GET", APPS)
        .with_status(200)
        .with_body(r#"["phone","web"]"#)
        .create_async()
        .await;

    let client = client(&server);
    let controller = CompanyAppController::for_company(&client, Mapper::default(), "bigco");

    let listed = controller.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), Some("phone"));
    assert_eq!(listed[0].company(), "bigco");

    assert_eq!(controller.list_names().await.unwrap(), vec!["phone", "web"]);

    expanded.assert_async().await;
    names.assert_async().await;
}

#[tokio::test]
async fn test_update_without_name_sends_nothing() {
    let mut server = Server::new_async().await;
    let put = server.mock("PUT", Matcher::Any).expect(0).create_async().await;

    let client = client(&server);
    let controller = CompanyAppController::for_company(&client, Mapper::default(), "bigco");

    let mut app = CompanyApp::new("bigco");
    let err = controller.update(&mut app).await.unwrap_err();
    assert!(matches!(err, ApiError::Parameter(_)));
    put.assert_async().await;
}

#[tokio::test]
async fn test_missing_app_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("{}/ghost", APPS).as_str())
        .with_status(404)
        .with_body(r#"{"code":"developer.service.AppDoesNotExist","message":"App named ghost does not exist"}"#)
        .create_async()
        .await;

    let client = client(&server);
    let controller = CompanyAppController::for_company(&client, Mapper::default(), "bigco");

    let err = controller.load("ghost").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ApiError::Response(_)));
}

#[tokio::test]
async fn test_unknown_fields_are_reported() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("{}/phone", APPS).as_str())
        .with_status(200)
        .with_body(r#"{"name":"phone","keyExpiresIn":3600}"#)
        .create_async()
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = client(&server);
    let controller = CompanyAppController::for_company(&client, Mapper::new(sink.clone()), "bigco");

    let app = controller.load("phone").await.unwrap();
    assert_eq!(app.name(), Some("phone"));
    assert_eq!(
        sink.entries(),
        vec![Diagnostic::UnmappedField {
            entity: "CompanyApp",
            field: "keyExpiresIn".to_string()
        }]
    );
}
