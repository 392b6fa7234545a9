//! Fluxos de inventário contra um serviço remoto simulado (wiremock).

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use tokio::time::Instant;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

mod common;
use common::*;

async fn mount_list(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(INVENTORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_inventory()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_carries_derived_quantities_and_status() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(&app, get("/api/inventory")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let items = body_json(response).await;
    let beam = &items[0];
    assert_eq!(beam["id"], "beam-1");
    assert_eq!(beam["balanceQty"].as_f64(), Some(2.0));
    assert_eq!(beam["totalUsed"].as_f64(), Some(4.0));
    assert_eq!(beam["remainingQty"].as_f64(), Some(6.0));
    assert_eq!(beam["status"], "low");

    // Nada recebido e quantidade exigida > 0
    assert_eq!(items[1]["status"], "critical");
    assert_eq!(items[1]["usage"], json!([]));

    // Segunda leitura sai do cache (o mock exige exatamente 1 GET)
    let again = send(&app, get("/api/inventory")).await;
    assert_eq!(again.status(), StatusCode::OK);
}

#[tokio::test]
async fn usage_within_remaining_is_recorded_after_remote_confirms() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/inventory/beam-1/usage"))
        .and(body_partial_json(json!({ "projectId": "TIS-FAB-580", "issuedTo": "Rui" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "use-2",
            "projectId": "TIS-FAB-580",
            "quantity": 6,
            "date": "2024-04-01T10:00:00.000Z",
            "issuedTo": "Rui"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/inventory/beam-1/usage",
            json!({ "projectId": "TIS-FAB-580", "quantity": 6, "issuedTo": "Rui" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let item = body_json(response).await;
    assert_eq!(item["remainingQty"].as_f64(), Some(0.0));
    assert_eq!(item["usage"].as_array().map(Vec::len), Some(2));

    let usage = body_json(send(&app, get("/api/usage")).await).await;
    assert_eq!(usage[0]["availability"], "depleted");
    assert_eq!(usage[0]["usedInProjects"], json!(["TIS-FAB-577", "TIS-FAB-580"]));
}

#[tokio::test]
async fn usage_above_remaining_never_reaches_the_remote() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/inventory/beam-1/usage"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/inventory/beam-1/usage",
            json!({ "projectId": "TIS-FAB-580", "quantity": 7, "issuedTo": "Rui" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Quantity cannot exceed available balance (6).");
}

#[tokio::test]
async fn failed_create_leaves_the_cache_untouched() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(INVENTORY_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "database down" })))
        .expect(1)
        .mount(&server)
        .await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/inventory",
            json!({
                "projectId": "TIS-FAB-576", "prNumber": "PR-576-003", "itemCode": "CH-75",
                "description": "Channel", "weight": 20, "prQty": 3, "requiredQty": 3, "receivedQty": 0
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("database down"));

    let items = body_json(send(&app, get("/api/inventory")).await).await;
    assert_eq!(items.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn created_item_goes_to_the_top_of_the_list() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(INVENTORY_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "channel-1", "projectId": "YARD", "prNumber": "PR-9", "itemCode": "CH-75",
            "description": "Channel", "weight": 20, "prQty": 3, "requiredQty": 3, "receivedQty": 3
        })))
        .mount(&server)
        .await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/inventory",
            json!({
                "projectId": "YARD", "prNumber": "PR-9", "itemCode": "CH-75",
                "description": "Channel", "weight": 20, "prQty": 3, "requiredQty": 3, "receivedQty": 3
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let items = body_json(send(&app, get("/api/inventory")).await).await;
    assert_eq!(items[0]["id"], "channel-1");
    assert_eq!(items[0]["status"], "sufficient");

    let projects = body_json(send(&app, get("/api/projects")).await).await;
    assert_eq!(projects, json!(["TIS-FAB-576", "YARD"]));
}

#[tokio::test]
async fn negative_quantities_are_refused_before_any_call() {
    let server = MockServer::start().await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/inventory",
            json!({ "projectId": "P", "prNumber": "PR", "itemCode": "C", "receivedQty": -1 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["received_qty"].is_array());
}

#[tokio::test]
async fn edit_keeps_usage_history_and_delete_removes_locally() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("PUT"))
        .and(path("/api/inventory/beam-1"))
        .and(body_partial_json(json!({ "receivedQty": 12.0, "usage": [{ "id": "use-1" }] })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/inventory/plate-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/inventory/beam-1",
            json!({
                "projectId": "TIS-FAB-576", "prNumber": "PR-576-001", "itemCode": "BM-200",
                "description": "Beam 200x100", "weight": 150, "prQty": 12, "requiredQty": 10, "receivedQty": 12
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let item = body_json(response).await;
    assert_eq!(item["remainingQty"].as_f64(), Some(8.0));
    assert_eq!(item["balanceQty"].as_f64(), Some(0.0));

    let response = send(&app, delete("/api/inventory/plate-1")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let items = body_json(send(&app, get("/api/inventory")).await).await;
    assert_eq!(items.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn reads_are_not_blocked_by_a_slow_usage_call() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/inventory/beam-1/usage"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({
                    "_id": "use-2", "projectId": "TIS-FAB-580", "quantity": 1,
                    "date": "2024-04-01T10:00:00.000Z", "issuedTo": "Rui"
                }))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (app, _) = setup_test_app(&server, &[]).await;
    send(&app, get("/api/inventory")).await;

    let usage = send(
        &app,
        json_request(
            "POST",
            "/api/inventory/beam-1/usage",
            json!({ "projectId": "TIS-FAB-580", "quantity": 1, "issuedTo": "Rui" }),
        ),
    );
    let summary = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let started = Instant::now();
        let response = send(&app, get("/api/summary")).await;
        (response.status(), started.elapsed())
    };

    let (usage, (status, took)) = tokio::join!(usage, summary);
    assert_eq!(usage.status(), StatusCode::CREATED);
    assert_eq!(status, StatusCode::OK);
    assert!(took < Duration::from_secs(1), "summary waited {took:?}");
}

#[tokio::test]
async fn usage_recorded_during_an_edit_survives_it() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("PUT"))
        .and(path("/api/inventory/beam-1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/inventory/beam-1/usage"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "use-2", "projectId": "TIS-FAB-580", "quantity": 6,
            "date": "2024-04-01T10:00:00.000Z", "issuedTo": "Rui"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (app, _) = setup_test_app(&server, &[]).await;
    send(&app, get("/api/inventory")).await;

    let edit = send(
        &app,
        json_request(
            "PUT",
            "/api/inventory/beam-1",
            json!({
                "projectId": "TIS-FAB-576", "prNumber": "PR-576-001", "itemCode": "BM-200",
                "description": "Beam 200x100", "weight": 150, "prQty": 12, "requiredQty": 10, "receivedQty": 12
            }),
        ),
    );
    let usage = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        send(
            &app,
            json_request(
                "POST",
                "/api/inventory/beam-1/usage",
                json!({ "projectId": "TIS-FAB-580", "quantity": 6, "issuedTo": "Rui" }),
            ),
        )
        .await
    };

    let (edit, usage) = tokio::join!(edit, usage);
    assert_eq!(edit.status(), StatusCode::OK);
    assert_eq!(usage.status(), StatusCode::CREATED);

    let items = body_json(send(&app, get("/api/inventory")).await).await;
    let beam = &items[0];
    assert_eq!(beam["receivedQty"].as_f64(), Some(12.0));
    assert_eq!(beam["usage"].as_array().map(Vec::len), Some(2));
    assert_eq!(beam["remainingQty"].as_f64(), Some(2.0));
}

#[tokio::test]
async fn removing_a_usage_restores_remaining() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    Mock::given(method("DELETE"))
        .and(path("/api/inventory/beam-1/usage/use-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(&app, delete("/api/inventory/beam-1/usage/use-1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let item = body_json(response).await;
    assert_eq!(item["remainingQty"].as_f64(), Some(10.0));

    let missing = send(&app, delete("/api/inventory/beam-1/usage/use-1")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_and_summary_group_by_project_and_pr() {
    let server = MockServer::start().await;
    mount_list(&server, 1).await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let dashboard = body_json(send(&app, get("/api/dashboard/TIS-FAB-576")).await).await;
    assert_eq!(dashboard["prs"][0]["prNumber"], "PR-576-001");
    assert_eq!(dashboard["prs"][0]["fullyDelivered"], true);
    assert_eq!(dashboard["prs"][1]["fullyDelivered"], false);

    let summary = body_json(send(&app, get("/api/summary")).await).await;
    assert_eq!(summary[0]["totalPrs"], 2);
    assert_eq!(summary[0]["completedPrs"], 1);
    assert_eq!(summary[0]["completionRate"], 50);

    let unknown = send(&app, get("/api/dashboard/NOPE")).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn issue_slip_images_become_data_uris() {
    let server = MockServer::start().await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(&app, text_request("/api/issue-slips", "image/png", &b"\x89PNG"[..])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["dataUri"], "data:image/png;base64,iVBORw==");

    let refused = send(&app, text_request("/api/issue-slips", "text/plain", "hello")).await;
    assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(refused).await["error"], "Please upload an image file.");
}

#[tokio::test]
async fn openapi_document_lists_the_routes() {
    let server = MockServer::start().await;
    let (app, _) = setup_test_app(&server, &[]).await;

    let response = send(&app, get("/api/docs/openapi.json")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = body_json(response).await;
    assert!(doc["paths"]["/api/inventory/{id}/usage"]["post"].is_object());
    assert!(doc["components"]["securitySchemes"]["api_jwt"].is_object());
}
