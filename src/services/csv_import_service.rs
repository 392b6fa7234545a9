// src/services/csv_import_service.rs

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{
    common::error::AppError,
    models::{import::ImportPreview, inventory::NewInventoryItem},
};

// Cabeçalhos obrigatórios (comparados em minúsculas, ordem livre)
pub const REQUIRED_HEADERS: [&str; 8] = [
    "project id",
    "pr number",
    "item code",
    "description",
    "weight",
    "pr qty",
    "required qty",
    "received qty",
];

pub const TEMPLATE_FILENAME: &str = "inventory_template.csv";

pub fn template() -> String {
    "Project ID,PR Number,Item Code,Description,Weight,PR Qty,Required Qty,Received Qty\n\
     TIS-FAB-576,PR-576-001,BM-200,Beam 200x100,150,10,10,10\n"
        .to_string()
}

/// Converte o texto do CSV em itens (ainda sem id). Nada é gravado aqui.
pub fn parse_inventory_csv(text: &str) -> Result<ImportPreview, AppError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(AppError::EmptyCsv);
    }

    let headers: Vec<String> = lines[0]
        .trim_start_matches('\u{feff}')
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|h| h.to_string())
        .collect();
    if !missing.is_empty() {
        tracing::warn!("CSV rejeitado, cabeçalhos ausentes: {:?}", missing);
        return Err(AppError::MissingCsvHeaders(missing));
    }

    let mut items = Vec::new();
    for line in &lines[1..] {
        let row = split_row(line);
        // Linha malformada: ignorada em silêncio
        if row.len() < headers.len() {
            continue;
        }

        let mut item = NewInventoryItem {
            project_id: String::new(),
            pr_number: String::new(),
            item_code: String::new(),
            description: String::new(),
            weight: Decimal::ZERO,
            pr_qty: Decimal::ZERO,
            required_qty: Decimal::ZERO,
            received_qty: Decimal::ZERO,
            usage: Vec::new(),
        };

        for (header, value) in headers.iter().zip(row) {
            match header.as_str() {
                "project id" => item.project_id = value,
                "pr number" => item.pr_number = value,
                "item code" => item.item_code = value,
                "description" => item.description = value,
                "weight" => item.weight = parse_number(&value),
                "pr qty" => item.pr_qty = parse_number(&value),
                "required qty" => item.required_qty = parse_number(&value),
                "received qty" => item.received_qty = parse_number(&value),
                _ => {}
            }
        }

        if !item.project_id.is_empty() && !item.item_code.is_empty() {
            items.push(item);
        }
    }

    tracing::info!("📄 CSV analisado: {} itens prontos para importar", items.len());
    Ok(ImportPreview::new(items))
}

// Divide por vírgulas fora de aspas; aspas das pontas são removidas.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(clean_field(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(clean_field(&current));
    fields
}

fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    unquoted.trim().to_string()
}

/// Leitura permissiva: usa o maior prefixo numérico; se não houver, 0.
pub fn parse_number(raw: &str) -> Decimal {
    let value = raw.trim();
    if let Ok(n) = Decimal::from_str(value) {
        return n;
    }
    if let Ok(n) = Decimal::from_scientific(value) {
        return n;
    }

    let mut end = 0;
    let mut seen_dot = false;
    for (idx, ch) in value.char_indices() {
        let ok = ch.is_ascii_digit()
            || (idx == 0 && (ch == '-' || ch == '+'))
            || (ch == '.' && !seen_dot);
        if !ok {
            break;
        }
        if ch == '.' {
            seen_dot = true;
        }
        end = idx + ch.len_utf8();
    }

    Decimal::from_str(value[..end].trim_end_matches('.')).unwrap_or(Decimal::ZERO)
}
