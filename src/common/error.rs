// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    // Erros de formulário com mensagem pronta para o usuário
    #[error("{0}")]
    InvalidInput(String),

    // --- CSV ---
    #[error("CSV file is empty or missing headers.")]
    EmptyCsv,

    #[error("Missing required headers: {}", .0.join(", "))]
    MissingCsvHeaders(Vec<String>),

    // --- Uso (consumo) ---
    #[error("Quantity must be greater than 0.")]
    NonPositiveQuantity,

    #[error("Quantity cannot exceed available balance ({available}).")]
    QuantityExceedsAvailable { available: Decimal },

    #[error("Inventory item {0} not found")]
    ItemNotFound(String),

    #[error("Usage record {0} not found")]
    UsageNotFound(String),

    #[error("Project {0} not found")]
    ProjectNotFound(String),

    // --- Issue slip ---
    #[error("Please upload an image file.")]
    NotAnImage,

    #[error("Image size is too large. Please use an image under 2MB.")]
    ImageTooLarge,

    // --- Sessão ---
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Authentication required")]
    InvalidToken,

    // 401/403 vindo do serviço remoto: a sessão já foi apagada
    #[error("Session expired, please sign in again")]
    SessionExpired,

    // --- Serviço remoto ---
    #[error("Remote service answered {status}: {message}")]
    RemoteStatus { status: u16, message: String },

    #[error("Remote service unreachable: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("Assistant unavailable: {0}")]
    AssistantUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Retornamos todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::SessionExpired => {
                // O cliente deve recarregar a página (credenciais já foram apagadas)
                let body = Json(json!({ "error": self.to_string(), "reload": true }));
                return (StatusCode::UNAUTHORIZED, body).into_response();
            }

            AppError::InvalidInput(_)
            | AppError::EmptyCsv
            | AppError::MissingCsvHeaders(_)
            | AppError::NonPositiveQuantity
            | AppError::QuantityExceedsAvailable { .. }
            | AppError::NotAnImage => StatusCode::BAD_REQUEST,
            AppError::ImageTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ItemNotFound(_) | AppError::UsageNotFound(_) | AppError::ProjectNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::InvalidCredentials(_) | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::RemoteStatus { .. } | AppError::Remote(_) => StatusCode::BAD_GATEWAY,
            AppError::AssistantUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,

            // Todos os outros erros (Io, Json, InternalServerError) viram 500.
            e => {
                tracing::error!("Internal server error: {:?}", e);
                let body = Json(json!({ "error": "An unexpected error occurred." }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
