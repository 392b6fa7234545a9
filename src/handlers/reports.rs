// src/handlers/reports.rs

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::assistant::ReportKind,
    services::{csv_import_service, report_service},
};

fn csv_download(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

async fn report(app_state: &AppState, kind: ReportKind) -> Result<Response, AppError> {
    let items = app_state.inventory_service.list().await?;
    let csv = report_service::render(kind, &items);
    tracing::info!("📊 Relatório {} gerado ({} itens)", kind.filename(), items.len());
    Ok(csv_download(kind.filename(), csv))
}

#[utoipa::path(
    get,
    path = "/api/reports/inventory",
    tag = "Reports",
    responses(
        (status = 200, description = "Inventory_Report.csv", content_type = "text/csv", body = String)
    ),
    security(("api_jwt" = []))
)]
pub async fn inventory_report(State(app_state): State<AppState>) -> Result<Response, AppError> {
    report(&app_state, ReportKind::Inventory).await
}

#[utoipa::path(
    get,
    path = "/api/reports/usage",
    tag = "Reports",
    responses(
        (status = 200, description = "Usage_Report.csv", content_type = "text/csv", body = String)
    ),
    security(("api_jwt" = []))
)]
pub async fn usage_report(State(app_state): State<AppState>) -> Result<Response, AppError> {
    report(&app_state, ReportKind::Usage).await
}

#[utoipa::path(
    get,
    path = "/api/reports/template",
    tag = "Reports",
    responses(
        (status = 200, description = "Modelo de CSV para importação", content_type = "text/csv", body = String)
    )
)]
pub async fn import_template() -> Response {
    csv_download(csv_import_service::TEMPLATE_FILENAME, csv_import_service::template())
}
