// src/models/import.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::inventory::NewInventoryItem;

pub const PREVIEW_SAMPLE: usize = 5;

// Prévia da importação: nada foi gravado ainda
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub total: usize,
    pub sample: Vec<NewInventoryItem>,
    // "...and K more"
    pub remaining: usize,
    pub items: Vec<NewInventoryItem>,
}

impl ImportPreview {
    pub fn new(items: Vec<NewInventoryItem>) -> Self {
        let total = items.len();
        let sample = items.iter().take(PREVIEW_SAMPLE).cloned().collect();
        Self {
            total,
            sample,
            remaining: total.saturating_sub(PREVIEW_SAMPLE),
            items,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub imported: usize,
    pub total_items: usize,
}
