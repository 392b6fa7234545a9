// src/models/inventory.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// ---
// Validação Customizada
// ---
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("Value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

// --- 1. Registro de consumo (Usage) ---
// Pertence exclusivamente ao item pai; só é criado pelo fluxo de uso e removido individualmente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    #[serde(alias = "_id")]
    pub id: String,
    // Projeto que consumiu o material (pode ser diferente do projeto do item)
    pub project_id: String,
    #[serde(default)]
    pub quantity: Decimal,
    // ISO-8601 cru, como veio do servidor
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub issued_to: String,
    // Comprovante (data URI base64)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_slip_image: Option<String>,
}

// --- 2. Item de inventário ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub project_id: String,
    pub pr_number: String,
    pub item_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weight: Decimal,
    #[serde(default)]
    pub pr_qty: Decimal,
    #[serde(default)]
    pub required_qty: Decimal,
    #[serde(default)]
    pub received_qty: Decimal,
    #[serde(default)]
    pub usage: Vec<UsageEntry>,
}

impl InventoryItem {
    // Balance Qty = PR Qty - Received Qty (pendente de entrega, pode ser negativo)
    // Dados remotos não têm teto: as contas saturam em vez de estourar
    pub fn balance_qty(&self) -> Decimal {
        self.pr_qty.saturating_sub(self.received_qty)
    }

    pub fn total_used(&self) -> Decimal {
        self.usage
            .iter()
            .fold(Decimal::ZERO, |total, u| total.saturating_add(u.quantity))
    }

    // Remaining Qty = Received Qty - uso acumulado (estoque em mãos)
    pub fn remaining_qty(&self) -> Decimal {
        self.received_qty.saturating_sub(self.total_used())
    }

    pub fn is_delivered(&self) -> bool {
        self.received_qty >= self.required_qty
    }

    pub fn has_issue_slip(&self) -> bool {
        self.usage.iter().any(|u| u.issue_slip_image.is_some())
    }

    /// Copia os campos do formulário de `edited`; id e histórico de uso ficam.
    pub fn apply_form(&mut self, edited: &InventoryItem) {
        self.project_id = edited.project_id.clone();
        self.pr_number = edited.pr_number.clone();
        self.item_code = edited.item_code.clone();
        self.description = edited.description.clone();
        self.weight = edited.weight;
        self.pr_qty = edited.pr_qty;
        self.required_qty = edited.required_qty;
        self.received_qty = edited.received_qty;
    }
}

// --- 3. Payload de criação / edição (item sem id) ---
// Usado pelo formulário, pelo lote (batch) e pela importação CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    #[validate(length(min = 1, message = "Project ID is required."))]
    pub project_id: String,

    #[validate(length(min = 1, message = "PR Number is required."))]
    pub pr_number: String,

    #[validate(length(min = 1, message = "Item Code is required."))]
    pub item_code: String,

    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub weight: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub pr_qty: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub required_qty: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub received_qty: Decimal,

    #[serde(default)]
    pub usage: Vec<UsageEntry>,
}

impl NewInventoryItem {
    // Edição: o formulário não mexe no histórico de uso, então ele é preservado.
    pub fn into_item(self, id: String, usage: Vec<UsageEntry>) -> InventoryItem {
        InventoryItem {
            id,
            project_id: self.project_id,
            pr_number: self.pr_number,
            item_code: self.item_code,
            description: self.description,
            weight: self.weight,
            pr_qty: self.pr_qty,
            required_qty: self.required_qty,
            received_qty: self.received_qty,
            usage,
        }
    }
}

// --- 4. Payload de consumo ---
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddUsagePayload {
    #[serde(default)]
    pub project_id: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub issued_to: String,
    pub issue_slip_image: Option<String>,
}

// O que vai para o servidor remoto (data carimbada no envio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUsageEntry {
    pub project_id: String,
    pub quantity: Decimal,
    pub date: String,
    pub issued_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_slip_image: Option<String>,
}

// --- 5. Status de estoque (cor da quantidade restante) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Sufficient,
    Neutral,
}

// Item com os campos derivados (nunca persistidos)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub balance_qty: Decimal,
    pub total_used: Decimal,
    pub remaining_qty: Decimal,
    pub status: StockStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueSlipResponse {
    pub data_uri: String,
}
