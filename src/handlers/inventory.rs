// src/handlers/inventory.rs

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        import::ImportResult,
        inventory::{AddUsagePayload, IssueSlipResponse, ItemView, NewInventoryItem},
    },
    services::{dashboard_service::item_view, issue_slip},
};

// ---
// Handler: list_items (lista em cache + campos derivados)
// ---
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    responses(
        (status = 200, description = "Itens com saldo, uso e status de estoque", body = Vec<ItemView>),
        (status = 401, description = "Sessão expirada ou ausente"),
        (status = 502, description = "Serviço remoto indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_items(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.list().await?;
    Ok(Json(items.iter().map(item_view).collect::<Vec<_>>()))
}

#[utoipa::path(
    post,
    path = "/api/inventory/refresh",
    tag = "Inventory",
    responses(
        (status = 200, description = "Lista recarregada do serviço remoto", body = Vec<ItemView>),
        (status = 502, description = "Serviço remoto indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn refresh_items(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.refresh().await?;
    list_items(State(app_state)).await
}

// ---
// Handler: create_item
// ---
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = NewInventoryItem,
    responses(
        (status = 201, description = "Item criado no serviço remoto", body = ItemView),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    Json(payload): Json<NewInventoryItem>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let saved = app_state.inventory_service.add_item(payload).await?;
    Ok((StatusCode::CREATED, Json(item_view(&saved))))
}

#[utoipa::path(
    post,
    path = "/api/inventory/batch",
    tag = "Inventory",
    request_body = Vec<NewInventoryItem>,
    responses(
        (status = 201, description = "Lote criado; lista recarregada", body = ImportResult),
        (status = 400, description = "Algum item do lote é inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_batch(
    State(app_state): State<AppState>,
    Json(items): Json<Vec<NewInventoryItem>>,
) -> Result<impl IntoResponse, AppError> {
    for item in &items {
        item.validate()?;
    }

    let imported = app_state.inventory_service.add_items(items).await?;
    let total_items = app_state.inventory_service.list().await?.len();
    Ok((StatusCode::CREATED, Json(ImportResult { imported, total_items })))
}

// ---
// Handler: update_item (o histórico de uso é preservado)
// ---
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    request_body = NewInventoryItem,
    params(("id" = String, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item atualizado", body = ItemView),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewInventoryItem>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updated = app_state.inventory_service.update_item(&id, payload).await?;
    Ok(Json(item_view(&updated)))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = String, Path, description = "ID do item")),
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Handler: add_usage (retirada de material)
// ---
#[utoipa::path(
    post,
    path = "/api/inventory/{id}/usage",
    tag = "Inventory",
    request_body = AddUsagePayload,
    params(("id" = String, Path, description = "ID do item")),
    responses(
        (status = 201, description = "Uso registrado; item com saldo atualizado", body = ItemView),
        (status = 400, description = "Projeto ausente, quantidade inválida ou acima do disponível"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_usage(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddUsagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.inventory_service.add_usage(&id, payload).await?;
    Ok((StatusCode::CREATED, Json(item_view(&item))))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{id}/usage/{usage_id}",
    tag = "Inventory",
    params(
        ("id" = String, Path, description = "ID do item"),
        ("usage_id" = String, Path, description = "ID do registro de uso")
    ),
    responses(
        (status = 200, description = "Uso removido; item com saldo atualizado", body = ItemView),
        (status = 404, description = "Item ou uso não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_usage(
    State(app_state): State<AppState>,
    Path((id, usage_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.inventory_service.delete_usage(&id, &usage_id).await?;
    Ok(Json(item_view(&item)))
}

// ---
// Handler: upload_issue_slip (imagem crua -> data URI)
// ---
#[utoipa::path(
    post,
    path = "/api/issue-slips",
    tag = "Inventory",
    request_body(content = Vec<u8>, content_type = "image/*"),
    responses(
        (status = 200, description = "Data URI para anexar ao registro de uso", body = IssueSlipResponse),
        (status = 400, description = "Não é uma imagem"),
        (status = 413, description = "Imagem acima de 2MB")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_issue_slip(headers: HeaderMap, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let data_uri = issue_slip::encode(content_type, &body)?;
    Ok(Json(IssueSlipResponse { data_uri }))
}
