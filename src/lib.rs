// src/lib.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod remote;
pub mod services;

use crate::{
    config::AppState,
    docs::ApiDoc,
    middleware::auth::session_guard,
    services::issue_slip::MAX_IMAGE_BYTES,
};

pub fn app(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route(
            "/session",
            get(handlers::auth::get_session).layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                session_guard,
            )),
        );

    let inventory_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::list_items).post(handlers::inventory::create_item),
        )
        .route("/refresh", post(handlers::inventory::refresh_items))
        .route("/batch", post(handlers::inventory::create_batch))
        .route(
            "/{id}",
            put(handlers::inventory::update_item).delete(handlers::inventory::delete_item),
        )
        .route("/{id}/usage", post(handlers::inventory::add_usage))
        .route(
            "/{id}/usage/{usage_id}",
            delete(handlers::inventory::delete_usage),
        );

    // Tudo que lê ou altera o inventário passa pelo session_guard
    let guarded_routes = Router::new()
        .nest("/inventory", inventory_routes)
        .route(
            "/issue-slips",
            post(handlers::inventory::upload_issue_slip)
                // Folga acima do limite para o 413 sair com a nossa mensagem
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES * 2)),
        )
        .route("/projects", get(handlers::dashboard::get_projects))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/dashboard/{project_id}",
            get(handlers::dashboard::get_project_dashboard),
        )
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/usage", get(handlers::dashboard::get_usage))
        .route("/import/preview", post(handlers::import::preview_import))
        .route("/import/commit", post(handlers::import::commit_import))
        .route("/reports/inventory", get(handlers::reports::inventory_report))
        .route("/reports/usage", get(handlers::reports::usage_report))
        .route("/search", get(handlers::search::search))
        .route("/assistant/chat", post(handlers::assistant::chat))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .route("/api/reports/template", get(handlers::reports::import_template))
        .nest("/api/auth", auth_routes)
        .nest("/api", guarded_routes)
        .with_state(app_state)
}
