// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Incharge,
    Store,
}

// Dados para login
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

// Resposta do serviço de login remoto
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub role: Role,
    pub username: String,
}

// Sessão persistida localmente (token + role + username)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub username: String,
    pub saved_at: DateTime<Utc>,
}

impl From<AuthResponse> for Session {
    fn from(res: AuthResponse) -> Self {
        Self {
            token: res.token,
            role: res.role,
            username: res.username,
            saved_at: Utc::now(),
        }
    }
}

// O que expomos da sessão (o token nunca sai daqui)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub username: String,
    pub role: Role,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            role: session.role,
        }
    }
}
