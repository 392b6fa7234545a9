// src/remote/auth_repo.rs

use serde::Deserialize;

use crate::{
    common::error::AppError,
    models::auth::{AuthResponse, LoginUserPayload},
};

#[derive(Deserialize)]
struct LoginErrorBody {
    error: Option<String>,
}

// Login no serviço remoto `{loginBase}`. Não passa pelo RemoteClient:
// um 401 aqui é senha errada, não sessão expirada.
#[derive(Clone)]
pub struct AuthRepository {
    http: reqwest::Client,
    login_url: String,
}

impl AuthRepository {
    pub fn new(http: reqwest::Client, login_url: impl Into<String>) -> Self {
        Self {
            http,
            login_url: login_url.into(),
        }
    }

    pub async fn login(&self, payload: &LoginUserPayload) -> Result<AuthResponse, AppError> {
        let response = self.http.post(&self.login_url).json(payload).send().await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<LoginErrorBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(AppError::InvalidCredentials(message));
        }

        Ok(response.json().await?)
    }
}
