// src/handlers/dashboard.rs

// Visões derivadas da lista em cache. Nada aqui fala com o serviço remoto
// além da carga inicial feita pelo InventoryService.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{ProjectGroup, ProjectSummary, UsageRow},
    services::dashboard_service,
};

#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Árvore Projeto -> PR -> Itens", body = Vec<ProjectGroup>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.list().await?;
    Ok(Json(dashboard_service::project_dashboard(&items)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/{project_id}",
    tag = "Dashboard",
    params(("project_id" = String, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "PRs e itens de um projeto", body = ProjectGroup),
        (status = 404, description = "Projeto sem itens")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_project_dashboard(
    State(app_state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.list().await?;

    dashboard_service::project_dashboard(&items)
        .into_iter()
        .find(|group| group.project_id == project_id)
        .map(Json)
        .ok_or(AppError::ProjectNotFound(project_id))
}

#[utoipa::path(
    get,
    path = "/api/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Taxa de conclusão por projeto e status de entrega por PR", body = Vec<ProjectSummary>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.list().await?;
    Ok(Json(dashboard_service::project_summaries(&items)))
}

#[utoipa::path(
    get,
    path = "/api/usage",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Uma linha por item: consumo, saldo em mãos e disponibilidade", body = Vec<UsageRow>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_usage(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.list().await?;
    Ok(Json(dashboard_service::usage_rows(&items)))
}

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Dashboard",
    responses(
        (status = 200, description = "IDs de projeto distintos, ordenados", body = Vec<String>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_projects(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.list().await?;
    Ok(Json(dashboard_service::project_ids(&items)))
}
