// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentSession,
    models::auth::{LoginUserPayload, SessionInfo},
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Sessão aberta (o token fica guardado no serviço)", body = SessionInfo),
        (status = 400, description = "Usuário ou senha em branco"),
        (status = 401, description = "Credenciais recusadas pelo serviço de login")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<SessionInfo>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let info = app_state.auth_service.login(&payload).await?;
    // Outro usuário pode ver outro inventário: recarrega na próxima leitura
    app_state.inventory_service.invalidate().await;

    Ok(Json(info))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Sessão apagada"))
)]
pub async fn logout(State(app_state): State<AppState>) -> Result<StatusCode, AppError> {
    app_state.auth_service.logout().await?;
    app_state.inventory_service.invalidate().await;
    Ok(StatusCode::NO_CONTENT)
}

// Sessão corrente (sem o token)
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário e papel da sessão aberta", body = SessionInfo),
        (status = 401, description = "Nenhuma sessão")
    )
)]
pub async fn get_session(CurrentSession(info): CurrentSession) -> Json<SessionInfo> {
    Json(info)
}
