// src/services/auth.rs

use crate::{
    common::error::AppError,
    models::auth::{LoginUserPayload, Session, SessionInfo},
    remote::AuthRepository,
    services::session_store::SessionStore,
};

#[derive(Clone)]
pub struct AuthService {
    auth_repo: AuthRepository,
    session: SessionStore,
}

impl AuthService {
    pub fn new(auth_repo: AuthRepository, session: SessionStore) -> Self {
        Self { auth_repo, session }
    }

    pub async fn login(&self, payload: &LoginUserPayload) -> Result<SessionInfo, AppError> {
        let response = self.auth_repo.login(payload).await.inspect_err(|e| {
            tracing::warn!("Login recusado para {}: {}", payload.username, e);
        })?;

        let session = Session::from(response);
        let info = SessionInfo::from(&session);
        self.session.save(session).await?;

        tracing::info!("🔑 Login de {} ({:?})", info.username, info.role);
        Ok(info)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        if let Some(session) = self.session.current().await {
            tracing::info!("👋 Logout de {}", session.username);
        }
        self.session.clear().await
    }

    pub async fn current(&self) -> Option<SessionInfo> {
        self.session.current().await.as_ref().map(SessionInfo::from)
    }
}
