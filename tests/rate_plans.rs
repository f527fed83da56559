//
//  apigee-mint
//  tests/rate_plans.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::sync::Arc;

use apigee_mint::api::common::PageRequest;
use apigee_mint::api::controller::{DeveloperRatePlanController, SaveMode};
use apigee_mint::api::mint::{DeveloperRatePlan, RatePlan};
use apigee_mint::api::{ApiError, EdgeClient};
use apigee_mint::auth::AuthCredential;
use apigee_mint::cache::{CacheAside, CacheStore, FileCache, MemoryCache};
use apigee_mint::mapper::{Entity, Mapper};
use mockito::{Matcher, Server};
use serde_json::json;

const DEVELOPER: &str = "dev1";
const BASE: &str = "/mint/organizations/acme/developers/dev1";

fn client(server: &Server) -> EdgeClient {
    EdgeClient::new(&server.url(), "acme")
        .unwrap()
        .with_auth(AuthCredential::basic("me@example.com", "secret"))
}

fn accepted_list() -> String {
    json!({
        "developerRatePlan": [
            {
                "id": "rp1",
                "startDate": "2020-01-01",
                "endDate": "2020-12-31",
                "developer": {"id": DEVELOPER},
                "ratePlan": {"id": "gold", "name": "Gold", "monetizationPackage": {"id": "pkg1"}}
            },
            {
                "id": "rp2",
                "startDate": "2021-01-01",
                "ratePlan": {"id": "silver", "monetizationPackage": {"id": "pkg2"}}
            }
        ],
        "totalRecords": 2
    })
    .to_string()
}

fn plan_for(package: &str, rate_plan: &str) -> DeveloperRatePlan {
    let mut plan = DeveloperRatePlan::new(DEVELOPER);
    plan.set_rate_plan(RatePlan::with_id(package, rate_plan));
    plan.set_start_date("2026-02-01");
    plan
}

#[tokio::test]
async fn test_list_is_fetched_once_then_cached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("{}/developer-accepted-rateplans", BASE).as_str())
        .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(accepted_list())
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    let store = Arc::new(MemoryCache::new());
    let controller = DeveloperRatePlanController::new(
        &client,
        CacheAside::new(store.clone(), Mapper::default()),
        DEVELOPER,
    );

    let first = controller.list(None).await.unwrap();
    let second = controller.list(None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].id(), Some("rp1"));
    assert_eq!(first[0].rate_plan().unwrap().package_id(), "pkg1");
    assert_eq!(first[1].end_date(), None);
    assert!(store.get("developer_accepted_rateplan:dev1").is_some());
}

#[tokio::test]
async fn test_paged_list_uses_its_own_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("{}/developer-accepted-rateplans", BASE).as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("size".into(), "5".into()),
        ]))
        .with_status(200)
        .with_body(accepted_list())
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    let store = Arc::new(MemoryCache::new());
    let controller = DeveloperRatePlanController::new(
        &client,
        CacheAside::new(store.clone(), Mapper::default()),
        DEVELOPER,
    );

    let plans = controller.list(Some(PageRequest::new(2, 5))).await.unwrap();
    mock.assert_async().await;

    assert_eq!(plans.len(), 2);
    assert!(store.get("developer_accepted_rateplan:dev1:page:2:5").is_some());
    assert!(store.get("developer_accepted_rateplan:dev1").is_none());
}

#[tokio::test]
async fn test_file_cache_is_shared_between_controllers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("{}/developer-accepted-rateplans", BASE).as_str())
        .with_status(200)
        .with_body(accepted_list())
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client(&server);

    for _ in 0..2 {
        let cache = CacheAside::new(Arc::new(FileCache::new(dir.path())), Mapper::default());
        let controller = DeveloperRatePlanController::new(&client, cache, DEVELOPER);
        assert_eq!(controller.list(None).await.unwrap().len(), 2);
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_fetch_is_not_cached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("{}/developer-accepted-rateplans", BASE).as_str())
        .with_status(500)
        .with_body(r#"{"code":"internal","message":"try again"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client(&server);
    let controller = DeveloperRatePlanController::new(
        &client,
        CacheAside::new(Arc::new(MemoryCache::new()), Mapper::default()),
        DEVELOPER,
    );

    assert!(controller.list(None).await.is_err());
    assert!(controller.list(None).await.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_omits_id_and_captures_server_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", format!("{}/developer-rateplans", BASE).as_str())
        .match_body(Matcher::Json(json!({
            "developer": {"id": DEVELOPER},
            "startDate": "2026-02-01",
            "ratePlan": {"id": "gold"}
        })))
        .with_status(201)
        .with_body(
            json!({
                "id": "new-id",
                "startDate": "2026-02-01",
                "developer": {"id": DEVELOPER},
                "ratePlan": {"id": "gold", "monetizationPackage": {"id": "pkg"}}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client(&server);
    let controller =
        DeveloperRatePlanController::new(&client, CacheAside::disabled(Mapper::default()), DEVELOPER);

    let mut plan = plan_for("pkg", "gold");
    plan.set_id("client-chosen");
    controller.save(&mut plan, SaveMode::Create).await.unwrap();

    mock.assert_async().await;
    assert_eq!(plan.id(), Some("new-id"));
    assert_eq!(plan.rate_plan().unwrap().id(), Some("gold"));
}

#[tokio::test]
async fn test_force_save_suppresses_warnings() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", format!("{}/developer-rateplans", BASE).as_str())
        .match_body(Matcher::PartialJson(json!({"suppressWarning": true})))
        .with_status(201)
        .with_body(r#"{"id":"forced"}"#)
        .create_async()
        .await;

    let client = client(&server);
    let controller =
        DeveloperRatePlanController::new(&client, CacheAside::disabled(Mapper::default()), DEVELOPER);

    let mut plan = plan_for("pkg", "gold");
    controller.force_save(&mut plan).await.unwrap();

    mock.assert_async().await;
    assert_eq!(plan.id(), Some("forced"));
}

#[tokio::test]
async fn test_update_sends_id_in_body_and_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", format!("{}/developer-rateplans/rp1", BASE).as_str())
        .match_body(Matcher::PartialJson(json!({
            "id": "rp1",
            "endDate": "2026-12-31",
            "ratePlan": {"id": "gold"}
        })))
        .with_status(200)
        .with_body(r#"{"id":"rp1","endDate":"2026-12-31","renewalDate":"2027-01-01"}"#)
        .create_async()
        .await;

    let client = client(&server);
    let controller =
        DeveloperRatePlanController::new(&client, CacheAside::disabled(Mapper::default()), DEVELOPER);

    let mut plan = plan_for("pkg", "gold");
    plan.set_id("rp1");
    plan.set_end_date(Some("2026-12-31".to_string()));
    controller.save_as(&mut plan, "update").await.unwrap();

    mock.assert_async().await;
    assert_eq!(plan.renewal_date(), Some("2027-01-01"));
    // A response without ratePlan leaves the reference alone
    assert!(plan.rate_plan().is_some());
}

#[tokio::test]
async fn test_delete() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", format!("{}/developer-rateplans/rp1", BASE).as_str())
        .with_status(200)
        .create_async()
        .await;

    let client = client(&server);
    let controller =
        DeveloperRatePlanController::new(&client, CacheAside::disabled(Mapper::default()), DEVELOPER);

    controller.delete("rp1").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_mint_codes_are_reclassified() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", format!("{}/developer-rateplans", BASE).as_str())
        .with_status(400)
        .with_body(
            r#"{"code":"mint.developerHasFollowingOverlapRatePlans","message":"Overlapping rate plans"}"#,
        )
        .create_async()
        .await;

    let client = client(&server);
    let controller =
        DeveloperRatePlanController::new(&client, CacheAside::disabled(Mapper::default()), DEVELOPER);

    let mut plan = plan_for("pkg", "gold");
    match controller.save(&mut plan, SaveMode::Create).await {
        Err(ApiError::Mint(response)) => {
            assert_eq!(response.status, 400);
            assert_eq!(
                response.code.as_deref(),
                Some("mint.developerHasFollowingOverlapRatePlans")
            );
            assert_eq!(response.message, "Overlapping rate plans");
        }
        other => panic!("expected a Mint error, got {:?}", other),
    }
    assert_eq!(plan.id(), None);
}

#[tokio::test]
async fn test_other_codes_are_not_reclassified() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", format!("{}/developer-rateplans", BASE).as_str())
        .with_status(400)
        .with_body(r#"{"fault":{"faultstring":"Bad request","detail":{"errorcode":"messaging.adaptors.http.flow.Bad"}}}"#)
        .create_async()
        .await;

    let client = client(&server);
    let controller =
        DeveloperRatePlanController::new(&client, CacheAside::disabled(Mapper::default()), DEVELOPER);

    let mut plan = plan_for("pkg", "gold");
    let err = controller.save(&mut plan, SaveMode::Create).await.unwrap_err();
    match err {
        ApiError::Response(response) => {
            assert_eq!(response.code.as_deref(), Some("messaging.adaptors.http.flow.Bad"));
            assert_eq!(response.message, "Bad request");
        }
        other => panic!("expected a Response error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_caller_errors_send_nothing() {
    let mut server = Server::new_async().await;
    let mocks = [
        server.mock("POST", Matcher::Any).expect(0).create_async().await,
        server.mock("PUT", Matcher::Any).expect(0).create_async().await,
        server.mock("DELETE", Matcher::Any).expect(0).create_async().await,
    ];

    let client = client(&server);
    let controller =
        DeveloperRatePlanController::new(&client, CacheAside::disabled(Mapper::default()), DEVELOPER);

    let mut plan = plan_for("pkg", "gold");
    let err = controller.save_as(&mut plan, "upsert").await.unwrap_err();
    assert_eq!(err.to_string(), "Unsupported save method argument: upsert");

    let err = controller.save(&mut plan, SaveMode::Update).await.unwrap_err();
    assert!(matches!(err, ApiError::Parameter(_)));

    let mut no_rate_plan = DeveloperRatePlan::new(DEVELOPER);
    let err = controller.save(&mut no_rate_plan, SaveMode::Create).await.unwrap_err();
    assert!(matches!(err, ApiError::Parameter(_)));

    let mut someone_else = DeveloperRatePlan::new("other");
    someone_else.set_rate_plan(RatePlan::with_id("pkg", "gold"));
    let err = controller.save(&mut someone_else, SaveMode::Create).await.unwrap_err();
    assert!(matches!(err, ApiError::Parameter(_)));

    let err = controller.delete("  ").await.unwrap_err();
    assert!(matches!(err, ApiError::Parameter(_)));

    for mock in mocks {
        mock.assert_async().await;
    }
}
