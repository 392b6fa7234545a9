// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::auth::SessionInfo};

// Guard das rotas de inventário: com REQUIRE_LOGIN, sem sessão = 401.
// A sessão é a do próprio serviço (token guardado), não um header do chamador.
pub async fn session_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = app_state.auth_service.current().await;

    match session {
        Some(info) => {
            request.extensions_mut().insert(info);
        }
        None if app_state.config.require_login => return Err(AppError::InvalidToken),
        None => {}
    }

    Ok(next.run(request).await)
}

// Extrator: sessão corrente (precisa do session_guard na rota)
pub struct CurrentSession(pub SessionInfo);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionInfo>()
            .cloned()
            .map(CurrentSession)
            .ok_or(AppError::InvalidToken)
    }
}
