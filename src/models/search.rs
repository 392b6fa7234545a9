// src/models/search.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::inventory::{InventoryItem, UsageEntry};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

// Um uso encontrado, com o item dono para dar contexto à linha
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageMatch {
    pub item_id: String,
    pub item_code: String,
    pub description: String,
    pub usage: UsageEntry,
}

// Resultado para exibição: primeiros N + quantos ficaram de fora ("...and K more")
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<InventoryItem>,
    pub more_items: usize,
    pub usages: Vec<UsageMatch>,
    pub more_usages: usize,
}
