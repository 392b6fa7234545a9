// src/remote/client.rs

// Cliente HTTP compartilhado para o serviço REST remoto.
// Sem retry, sem timeout: uma chamada, um resultado.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use crate::{common::error::AppError, services::session_store::SessionStore};

#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    session: SessionStore,
}

#[derive(Deserialize)]
struct RemoteErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl RemoteClient {
    pub fn new(http: reqwest::Client, session: SessionStore) -> Self {
        Self { http, session }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Envia com `Authorization: Bearer` (se houver sessão) e trata o status.
    /// 401/403 derruba a sessão local.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let request = match self.session.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!("🔥 Falha ao contactar o serviço remoto: {}", e);
            AppError::Remote(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!("Serviço remoto respondeu {}; limpando a sessão local", status);
            self.session.clear().await?;
            return Err(AppError::SessionExpired);
        }

        if !status.is_success() {
            let message = error_message(response).await;
            tracing::error!("🔥 Serviço remoto respondeu {}: {}", status, message);
            return Err(AppError::RemoteStatus {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

// Extrai `error`/`message` do corpo, se for JSON; senão o texto cru.
pub async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<RemoteErrorBody>(&text) {
        Ok(RemoteErrorBody { error: Some(e), .. }) => e,
        Ok(RemoteErrorBody { message: Some(m), .. }) => m,
        _ if !text.trim().is_empty() => text,
        _ => status.canonical_reason().unwrap_or("Request failed").to_string(),
    }
}
