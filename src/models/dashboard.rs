// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::inventory::ItemView;

// 1. Árvore Projeto -> PR -> Itens (a tela "Dashboard")
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroup {
    pub project_id: String,
    pub prs: Vec<PrGroup>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrGroup {
    pub pr_number: String,
    pub fully_delivered: bool,
    pub items: Vec<ItemView>,
}

// 2. Resumo por projeto (a tela "Summary")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Delivered, // todos os itens recebidos
    Partial,   // alguns
    Pending,   // nenhum
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrSummary {
    pub pr_number: String,
    pub total_items: usize,
    pub delivered_items: usize,
    pub status: DeliveryStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_id: String,
    pub total_items: usize,
    pub total_prs: usize,
    pub completed_prs: usize,
    // 0..=100
    pub completion_rate: u32,
    pub prs: Vec<PrSummary>,
}

// 3. Linha da tela "Usage"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Depleted,
    Low,
    Available,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageRow {
    pub id: String,
    pub project_id: String,
    pub item_code: String,
    pub description: String,
    pub weight: Decimal,
    pub received_qty: Decimal,
    pub total_used: Decimal,
    pub remaining_qty: Decimal,
    pub used_in_projects: Vec<String>,
    pub issued_to: Vec<String>,
    pub has_issue_slips: bool,
    pub availability: Availability,
}
