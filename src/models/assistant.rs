// src/models/assistant.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

// O histórico fica no cliente; o servidor é stateless.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ReportKind {
    Inventory,
    Usage,
}

impl ReportKind {
    pub fn filename(self) -> &'static str {
        match self {
            ReportKind::Inventory => "Inventory_Report.csv",
            ReportKind::Usage => "Usage_Report.csv",
        }
    }

    pub fn download_path(self) -> &'static str {
        match self {
            ReportKind::Inventory => "/api/reports/inventory",
            ReportKind::Usage => "/api/reports/usage",
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AssistantAction {
    Export { report: ReportKind, url: String },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub id: String,
    pub message: ChatMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AssistantAction>,
}
