//! Helpers compartilhados pelos testes de integração.
#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

use steel_inventory::{
    config::{AppState, Config},
    services::session_store::MemorySessionStorage,
};

pub const INVENTORY_PATH: &str = "/api/inventory";
pub const LOGIN_PATH: &str = "/api/login";
pub const CHAT_PATH: &str = "/v1/chat/completions";

/// App apontando para o `MockServer`; `extra` sobrescreve variáveis.
pub async fn setup_test_app(server: &MockServer, extra: &[(&str, &str)]) -> (Router, AppState) {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert(
        "INVENTORY_API_URL".into(),
        format!("{}{}", server.uri(), INVENTORY_PATH),
    );
    for (key, value) in extra {
        vars.insert(key.to_string(), value.replace("{server}", &server.uri()));
    }

    let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("test config");
    let state = AppState::with_storage(config, Arc::new(MemorySessionStorage::default()))
        .await
        .expect("test state");

    (steel_inventory::app(state.clone()), state)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn text_request(uri: &str, content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", content_type)
        .body(body.into())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Inventário remoto de exemplo: uma viga com 4 usadas de 10 recebidas,
/// uma chapa ainda não entregue.
pub fn remote_inventory() -> Value {
    json!([
        {
            "_id": "beam-1",
            "projectId": "TIS-FAB-576",
            "prNumber": "PR-576-001",
            "itemCode": "BM-200",
            "description": "Beam 200x100",
            "weight": 150,
            "prQty": 12,
            "requiredQty": 10,
            "receivedQty": 10,
            "usage": [
                {
                    "_id": "use-1",
                    "projectId": "TIS-FAB-577",
                    "quantity": 4,
                    "date": "2024-03-05T08:30:00.000Z",
                    "issuedTo": "Carlos Mendes"
                }
            ]
        },
        {
            "id": "plate-1",
            "projectId": "TIS-FAB-576",
            "prNumber": "PR-576-002",
            "itemCode": "PL-10",
            "description": "Plate 10mm",
            "weight": 80,
            "prQty": 5,
            "requiredQty": 5,
            "receivedQty": 0
        }
    ])
}
