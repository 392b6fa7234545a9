// src/handlers/search.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::search::{SearchPage, SearchQuery},
    services::search_service::{self, DEFAULT_DISPLAY_LIMIT},
};

#[utoipa::path(
    get,
    path = "/api/search",
    tag = "Search",
    params(
        ("q" = String, Query, description = "Termo buscado (contém, sem diferenciar maiúsculas)"),
        ("limit" = Option<usize>, Query, description = "Máximo exibido por lista (padrão 10)")
    ),
    responses(
        (status = 200, description = "Itens e registros de uso encontrados", body = SearchPage),
        (status = 400, description = "Termo vazio")
    ),
    security(("api_jwt" = []))
)]
pub async fn search(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.q.trim().is_empty() {
        return Err(AppError::InvalidInput("Please enter a search term.".into()));
    }

    let items = app_state.inventory_service.list().await?;
    let results = search_service::search(&items, &query.q);
    Ok(Json(results.page(query.limit.unwrap_or(DEFAULT_DISPLAY_LIMIT))))
}
