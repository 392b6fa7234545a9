// src/handlers/assistant.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::assistant::{ChatReply, ChatRequest},
};

#[utoipa::path(
    post,
    path = "/api/assistant/chat",
    tag = "Assistant",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Resposta do assistente (com ação de exportação, se pedida)", body = ChatReply),
        (status = 400, description = "Mensagem vazia"),
        (status = 503, description = "Serviço de IA indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn chat(
    State(app_state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reply = app_state.assistant_service.chat(request).await?;
    Ok(Json(reply))
}
