// src/services/dashboard_service.rs

// Agregações puras sobre a lista de itens em memória.
// Nada aqui é persistido: tudo é recalculado a cada mudança da lista.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{
    dashboard::{
        Availability, DeliveryStatus, PrGroup, PrSummary, ProjectGroup, ProjectSummary, UsageRow,
    },
    inventory::{InventoryItem, ItemView, StockStatus},
};

/// Agrupa por projeto. Chaves em ordem lexicográfica, itens na ordem em que aparecem.
pub fn group_by_project(items: &[InventoryItem]) -> BTreeMap<&str, Vec<&InventoryItem>> {
    let mut groups: BTreeMap<&str, Vec<&InventoryItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.project_id.as_str()).or_default().push(item);
    }
    groups
}

/// Mesma regra de [`group_by_project`], por número de PR.
pub fn group_by_pr<'a>(items: &[&'a InventoryItem]) -> BTreeMap<&'a str, Vec<&'a InventoryItem>> {
    let mut groups: BTreeMap<&'a str, Vec<&'a InventoryItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.pr_number.as_str()).or_default().push(*item);
    }
    groups
}

pub fn stock_status(item: &InventoryItem) -> StockStatus {
    // Nada recebido ainda
    if item.received_qty.is_zero() {
        return if item.required_qty > Decimal::ZERO {
            StockStatus::Critical
        } else {
            StockStatus::Neutral
        };
    }

    let remaining = item.remaining_qty();
    let Some(ratio) = remaining.checked_div(item.received_qty) else {
        // Razão fora da faixa do Decimal: vale o sinal do saldo
        return if remaining < Decimal::ZERO {
            StockStatus::Critical
        } else {
            StockStatus::Sufficient
        };
    };
    if ratio < Decimal::new(5, 1) {
        StockStatus::Critical
    } else if ratio < Decimal::new(75, 2) {
        StockStatus::Low
    } else {
        StockStatus::Sufficient
    }
}

pub fn availability(item: &InventoryItem) -> Availability {
    let remaining = item.remaining_qty();
    if remaining.is_zero() {
        Availability::Depleted
    } else if remaining < item.received_qty.saturating_mul(Decimal::new(2, 1)) {
        Availability::Low
    } else {
        Availability::Available
    }
}

pub fn item_view(item: &InventoryItem) -> ItemView {
    ItemView {
        balance_qty: item.balance_qty(),
        total_used: item.total_used(),
        remaining_qty: item.remaining_qty(),
        status: stock_status(item),
        item: item.clone(),
    }
}

/// Uma PR está entregue quando todos os seus itens têm recebido >= necessário.
pub fn is_pr_fully_delivered(items: &[&InventoryItem]) -> bool {
    !items.is_empty() && items.iter().all(|item| item.is_delivered())
}

/// round(completed / total * 100), com meio arredondando para cima; 0 sem PRs.
pub fn completion_rate(completed_prs: usize, total_prs: usize) -> u32 {
    if total_prs == 0 {
        return 0;
    }
    ((completed_prs * 200 + total_prs) / (total_prs * 2)) as u32
}

pub fn project_ids(items: &[InventoryItem]) -> Vec<String> {
    group_by_project(items).into_keys().map(str::to_owned).collect()
}

// --- Tela Dashboard ---
pub fn project_dashboard(items: &[InventoryItem]) -> Vec<ProjectGroup> {
    group_by_project(items)
        .into_iter()
        .map(|(project_id, project_items)| ProjectGroup {
            project_id: project_id.to_owned(),
            prs: group_by_pr(&project_items)
                .into_iter()
                .map(|(pr_number, pr_items)| PrGroup {
                    pr_number: pr_number.to_owned(),
                    fully_delivered: is_pr_fully_delivered(&pr_items),
                    items: pr_items.into_iter().map(item_view).collect(),
                })
                .collect(),
        })
        .collect()
}

// --- Tela Summary ---
pub fn project_summaries(items: &[InventoryItem]) -> Vec<ProjectSummary> {
    group_by_project(items)
        .into_iter()
        .map(|(project_id, project_items)| {
            let prs: Vec<PrSummary> = group_by_pr(&project_items)
                .into_iter()
                .map(|(pr_number, pr_items)| {
                    let total_items = pr_items.len();
                    let delivered_items = pr_items.iter().filter(|i| i.is_delivered()).count();
                    let status = if is_pr_fully_delivered(&pr_items) {
                        DeliveryStatus::Delivered
                    } else if delivered_items == 0 {
                        DeliveryStatus::Pending
                    } else {
                        DeliveryStatus::Partial
                    };
                    PrSummary {
                        pr_number: pr_number.to_owned(),
                        total_items,
                        delivered_items,
                        status,
                    }
                })
                .collect();

            let completed_prs = prs
                .iter()
                .filter(|pr| pr.status == DeliveryStatus::Delivered)
                .count();

            ProjectSummary {
                project_id: project_id.to_owned(),
                total_items: project_items.len(),
                total_prs: prs.len(),
                completed_prs,
                completion_rate: completion_rate(completed_prs, prs.len()),
                prs,
            }
        })
        .collect()
}

// --- Tela Usage ---
pub fn usage_rows(items: &[InventoryItem]) -> Vec<UsageRow> {
    items
        .iter()
        .map(|item| {
            let mut used_in_projects: Vec<String> = Vec::new();
            let mut issued_to: Vec<String> = Vec::new();
            for usage in &item.usage {
                if !used_in_projects.contains(&usage.project_id) {
                    used_in_projects.push(usage.project_id.clone());
                }
                if !usage.issued_to.is_empty() && !issued_to.contains(&usage.issued_to) {
                    issued_to.push(usage.issued_to.clone());
                }
            }

            UsageRow {
                id: item.id.clone(),
                project_id: item.project_id.clone(),
                item_code: item.item_code.clone(),
                description: item.description.clone(),
                weight: item.weight,
                received_qty: item.received_qty,
                total_used: item.total_used(),
                remaining_qty: item.remaining_qty(),
                used_in_projects,
                issued_to,
                has_issue_slips: item.has_issue_slip(),
                availability: availability(item),
            }
        })
        .collect()
}
