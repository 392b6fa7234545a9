// src/services/report_service.rs

// Relatórios CSV para download. Serialização simples: campos de texto livre
// vão entre aspas; aspas internas NÃO são escapadas (limitação conhecida).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{assistant::ReportKind, inventory::InventoryItem};

const INVENTORY_HEADER: &str = "Project ID,PR Number,Item Code,Description,Weight,PR Qty,Required Qty,Received Qty,Remaining Qty,Balance Qty";
const USAGE_HEADER: &str =
    "Date,Project,Item Code,Description,Issued To,Quantity Used,Issue Slip Available";

pub fn render(kind: ReportKind, items: &[InventoryItem]) -> String {
    match kind {
        ReportKind::Inventory => inventory_report(items),
        ReportKind::Usage => usage_report(items),
    }
}

// Uma linha por item
pub fn inventory_report(items: &[InventoryItem]) -> String {
    let mut out = String::from(INVENTORY_HEADER);
    out.push('\n');

    for item in items {
        let row = [
            field(&item.project_id),
            field(&item.pr_number),
            quoted(&item.item_code),
            quoted(&item.description),
            number(item.weight),
            number(item.pr_qty),
            number(item.required_qty),
            number(item.received_qty),
            number(item.remaining_qty()),
            number(item.balance_qty()),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

// Uma linha por registro de uso
pub fn usage_report(items: &[InventoryItem]) -> String {
    let mut out = String::from(USAGE_HEADER);
    out.push('\n');

    for item in items {
        for usage in &item.usage {
            let row = [
                day_of(&usage.date),
                field(&usage.project_id),
                quoted(&item.item_code),
                quoted(&item.description),
                quoted(&usage.issued_to),
                number(usage.quantity),
                (if usage.issue_slip_image.is_some() { "Yes" } else { "No" }).to_string(),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }
    }
    out
}

/// Data ISO truncada no dia. Se não for RFC 3339, usa o que vem antes do 'T'.
pub fn day_of(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Utc).date_naive().to_string(),
        Err(_) => raw.split('T').next().unwrap_or_default().to_string(),
    }
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

fn field(value: &str) -> String {
    if value.contains(',') || value.contains('\n') {
        quoted(value)
    } else {
        value.to_string()
    }
}

fn number(value: Decimal) -> String {
    value.normalize().to_string()
}
