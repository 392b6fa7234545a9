// src/remote/chat_repo.rs

// Chamada única a um endpoint de chat completions compatível com OpenAI.

use serde::{Deserialize, Serialize};

use crate::{common::error::AppError, models::assistant::ChatMessage};

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct ChatRepository {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatRepository {
    pub fn new(http: reqwest::Client, url: String, api_key: Option<String>, model: String) -> Self {
        Self { http, url, api_key, model }
    }

    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, AppError> {
        let mut request = self.http.post(&self.url).json(&CompletionRequest {
            model: &self.model,
            messages,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::AssistantUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::error!("🔥 IA respondeu {}: {}", status, text);
            return Err(AppError::AssistantUnavailable(format!("AI service answered {status}")));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::AssistantUnavailable(e.to_string()))?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty()))
    }
}
