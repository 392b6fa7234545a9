// src/handlers/import.rs

// Importação CSV em dois passos: prévia (nada gravado) e confirmação.
// Os dois recebem o texto cru do arquivo.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::import::{ImportPreview, ImportResult},
    services::csv_import_service,
};

#[utoipa::path(
    post,
    path = "/api/import/preview",
    tag = "Import",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Itens reconhecidos e amostra dos 5 primeiros", body = ImportPreview),
        (status = 400, description = "CSV vazio ou sem os cabeçalhos obrigatórios")
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_import(body: String) -> Result<impl IntoResponse, AppError> {
    let preview = csv_import_service::parse_inventory_csv(&body)?;
    tracing::info!("📄 Prévia de importação: {} itens", preview.total);
    Ok(Json(preview))
}

#[utoipa::path(
    post,
    path = "/api/import/commit",
    tag = "Import",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 201, description = "Itens enviados em lote; lista recarregada", body = ImportResult),
        (status = 400, description = "CSV inválido ou sem linhas válidas")
    ),
    security(("api_jwt" = []))
)]
pub async fn commit_import(
    State(app_state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let preview = csv_import_service::parse_inventory_csv(&body)?;

    let imported = app_state.inventory_service.add_items(preview.items).await?;
    let total_items = app_state.inventory_service.list().await?.len();
    Ok((StatusCode::CREATED, Json(ImportResult { imported, total_items })))
}
