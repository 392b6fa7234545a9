// src/services/assistant_service.rs

// Painel do assistente. Dois modos:
// - IA: contexto compacto do inventário + histórico -> chat completions
// - Palavra-chave (sem IA configurada): exportação ou busca local

use std::fmt::Write as _;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        assistant::{AssistantAction, ChatMessage, ChatReply, ChatRequest, ChatRole, ReportKind},
        inventory::InventoryItem,
    },
    remote::ChatRepository,
    services::{
        inventory_service::InventoryService,
        search_service::{self, DEFAULT_DISPLAY_LIMIT},
    },
};

pub const INVENTORY_CONTEXT_LIMIT: usize = 15_000;
pub const USAGE_CONTEXT_LIMIT: usize = 10_000;

const EXPORT_INVENTORY_MARKER: &str = "[[EXPORT:INVENTORY]]";
const EXPORT_USAGE_MARKER: &str = "[[EXPORT:USAGE]]";
const EMPTY_AI_REPLY: &str = "I couldn't generate a response. Please try again.";

#[derive(Clone)]
pub struct AssistantService {
    inventory_service: InventoryService,
    // None = modo palavra-chave
    chat_repo: Option<ChatRepository>,
}

impl AssistantService {
    pub fn new(inventory_service: InventoryService, chat_repo: Option<ChatRepository>) -> Self {
        Self {
            inventory_service,
            chat_repo,
        }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, AppError> {
        let prompt = request.prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::InvalidInput("Please type a message.".into()));
        }

        let items = self.inventory_service.list().await?;

        let Some(chat_repo) = &self.chat_repo else {
            return Ok(keyword_reply(&items, prompt));
        };

        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(ChatMessage {
            role: ChatRole::System,
            content: system_prompt(&items),
        });
        messages.extend(request.history.into_iter().filter(|m| m.role != ChatRole::System));
        messages.push(ChatMessage {
            role: ChatRole::User,
            content: prompt.to_string(),
        });

        tracing::debug!("🤖 Enviando {} mensagens para a IA", messages.len());
        let text = chat_repo
            .complete(&messages)
            .await?
            .unwrap_or_else(|| EMPTY_AI_REPLY.to_string());

        Ok(match detect_export(&text) {
            Some(kind) => export_reply(kind),
            None => reply(text, None),
        })
    }
}

fn reply(content: String, action: Option<AssistantAction>) -> ChatReply {
    ChatReply {
        id: Uuid::new_v4().to_string(),
        message: ChatMessage {
            role: ChatRole::Assistant,
            content,
        },
        action,
    }
}

fn export_reply(kind: ReportKind) -> ChatReply {
    let label = match kind {
        ReportKind::Inventory => "Inventory",
        ReportKind::Usage => "Usage",
    };
    reply(
        format!("✅ {label} report exported to CSV ({}).", kind.filename()),
        Some(AssistantAction::Export {
            report: kind,
            url: kind.download_path().to_string(),
        }),
    )
}

// --- Contexto da IA ---

pub fn inventory_context(items: &[InventoryItem]) -> String {
    items
        .iter()
        .map(|i| {
            format!(
                "[{}] {} ({}): Rec:{}, Bal:{}, Loc:{}",
                i.project_id,
                i.item_code,
                i.description,
                i.received_qty.normalize(),
                i.remaining_qty().normalize(),
                i.pr_number
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn usage_context(items: &[InventoryItem]) -> String {
    items
        .iter()
        .flat_map(|i| {
            i.usage.iter().map(move |u| {
                format!(
                    "Usage: {} used in {} by {} on {} (Qty: {}) {}",
                    i.item_code,
                    u.project_id,
                    u.issued_to,
                    u.date.split('T').next().unwrap_or_default(),
                    u.quantity.normalize(),
                    if u.issue_slip_image.is_some() { "[Slip:Yes]" } else { "[Slip:No]" }
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// Corta em `limit` caracteres e marca o corte
pub fn truncate_context(context: &str, limit: usize) -> String {
    match context.char_indices().nth(limit) {
        Some((cut, _)) => format!("{} ...(truncated)", &context[..cut]),
        None => context.to_string(),
    }
}

pub fn system_prompt(items: &[InventoryItem]) -> String {
    format!(
        "You are an intelligent Steel Inventory Assistant.\n\n\
         DATA CONTEXT:\n\
         --- INVENTORY ---\n{}\n\n\
         --- USAGE HISTORY ---\n{}\n\n\
         RULES:\n\
         1. Use the data above to answer questions accurately.\n\
         2. If the user asks for a LIST or TABLE, answer with a Markdown table.\n\
         3. If the user explicitly asks to EXPORT data, reply ONLY with \"{}\" or \"{}\".\n\
         4. Be concise and helpful.\n\
         5. If asked about \"IR\" or \"Issue Slip\", refer to the [Slip:Yes/No] data.",
        truncate_context(&inventory_context(items), INVENTORY_CONTEXT_LIMIT),
        truncate_context(&usage_context(items), USAGE_CONTEXT_LIMIT),
        EXPORT_INVENTORY_MARKER,
        EXPORT_USAGE_MARKER,
    )
}

pub fn detect_export(text: &str) -> Option<ReportKind> {
    if text.contains(EXPORT_INVENTORY_MARKER) {
        Some(ReportKind::Inventory)
    } else if text.contains(EXPORT_USAGE_MARKER) {
        Some(ReportKind::Usage)
    } else {
        None
    }
}

// --- Modo palavra-chave ---

pub fn keyword_reply(items: &[InventoryItem], prompt: &str) -> ChatReply {
    let lowered = prompt.to_lowercase();

    if lowered.contains("export") {
        if lowered.contains("usage") {
            return export_reply(ReportKind::Usage);
        }
        if lowered.contains("inventory") {
            return export_reply(ReportKind::Inventory);
        }
    }

    // Atalhos "Show Inventory Table" / "Show Usage History Table"
    if lowered.starts_with("show inventory") {
        let all: Vec<&InventoryItem> = items.iter().collect();
        return reply(items_table(&all), None);
    }
    if lowered.starts_with("show usage") {
        let all: Vec<(&InventoryItem, usize)> = items
            .iter()
            .flat_map(|i| (0..i.usage.len()).map(move |idx| (i, idx)))
            .collect();
        return reply(usages_table(&all), None);
    }

    let results = search_service::search(items, prompt);
    if results.is_empty() {
        return reply(format!("No items or usage records match \"{prompt}\"."), None);
    }

    let mut content = format!(
        "Found {} item(s) and {} usage record(s) for \"{}\".",
        results.items.len(),
        results.usages.len(),
        prompt
    );
    if !results.items.is_empty() {
        content.push_str("\n\n");
        content.push_str(&items_table(&results.items));
    }
    if !results.usages.is_empty() {
        content.push_str("\n\n");
        content.push_str(&usages_table(&results.usages));
    }
    reply(content, None)
}

fn items_table(items: &[&InventoryItem]) -> String {
    if items.is_empty() {
        return "The inventory is empty.".to_string();
    }

    let mut out = String::from(
        "| Project | PR Number | Item Code | Description | Received | Remaining |\n\
         |---|---|---|---|---|---|",
    );
    for item in items.iter().take(DEFAULT_DISPLAY_LIMIT) {
        let _ = write!(
            out,
            "\n| {} | {} | {} | {} | {} | {} |",
            item.project_id,
            item.pr_number,
            item.item_code,
            item.description,
            item.received_qty.normalize(),
            item.remaining_qty().normalize()
        );
    }
    more_suffix(&mut out, items.len());
    out
}

fn usages_table(usages: &[(&InventoryItem, usize)]) -> String {
    if usages.is_empty() {
        return "No usage has been recorded yet.".to_string();
    }

    let mut out = String::from(
        "| Date | Project | Item Code | Issued To | Quantity | Slip |\n\
         |---|---|---|---|---|---|",
    );
    for (item, idx) in usages.iter().take(DEFAULT_DISPLAY_LIMIT) {
        let usage = &item.usage[*idx];
        let _ = write!(
            out,
            "\n| {} | {} | {} | {} | {} | {} |",
            usage.date.split('T').next().unwrap_or_default(),
            usage.project_id,
            item.item_code,
            usage.issued_to,
            usage.quantity.normalize(),
            if usage.issue_slip_image.is_some() { "Yes" } else { "No" }
        );
    }
    more_suffix(&mut out, usages.len());
    out
}

fn more_suffix(out: &mut String, total: usize) {
    if total > DEFAULT_DISPLAY_LIMIT {
        let _ = write!(out, "\n...and {} more", total - DEFAULT_DISPLAY_LIMIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard_service::fixtures::{item, usage};

    fn inventory() -> Vec<InventoryItem> {
        let mut beam = item("1", "TIS-FAB-576", "PR-576-001", "BM-200");
        beam.usage = vec![usage("u1", "TIS-FAB-577", 4, "Carlos Mendes")];
        vec![beam, item("2", "YARD", "PR-9", "CH-75")]
    }

    #[test]
    fn inventory_context_has_one_compact_line_per_item() {
        let ctx = inventory_context(&inventory());
        let lines: Vec<&str> = ctx.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[TIS-FAB-576] BM-200 (Steel BM-200): Rec:10, Bal:6, Loc:PR-576-001");
    }

    #[test]
    fn usage_context_uses_day_and_slip_flag() {
        let ctx = usage_context(&inventory());
        assert_eq!(
            ctx,
            "Usage: BM-200 used in TIS-FAB-577 by Carlos Mendes on 2024-03-05 (Qty: 4) [Slip:No]"
        );
    }

    #[test]
    fn long_context_is_cut_and_marked() {
        let long = "x".repeat(INVENTORY_CONTEXT_LIMIT + 50);
        let cut = truncate_context(&long, INVENTORY_CONTEXT_LIMIT);
        assert!(cut.ends_with(" ...(truncated)"));
        assert_eq!(cut.chars().filter(|c| *c == 'x').count(), INVENTORY_CONTEXT_LIMIT);

        assert_eq!(truncate_context("short", USAGE_CONTEXT_LIMIT), "short");
    }

    #[test]
    fn export_markers_become_actions() {
        assert_eq!(detect_export("sure [[EXPORT:USAGE]]"), Some(ReportKind::Usage));
        assert_eq!(detect_export("[[EXPORT:INVENTORY]]"), Some(ReportKind::Inventory));
        assert_eq!(detect_export("no marker here"), None);
    }

    #[test]
    fn keyword_mode_exports_on_request() {
        let reply = keyword_reply(&inventory(), "Export Usage");
        match reply.action {
            Some(AssistantAction::Export { report, url }) => {
                assert_eq!(report, ReportKind::Usage);
                assert_eq!(url, "/api/reports/usage");
            }
            None => panic!("expected an export action"),
        }
    }

    #[test]
    fn keyword_mode_searches_everything_else() {
        let reply = keyword_reply(&inventory(), "carlos");
        assert!(reply.action.is_none());
        assert!(reply.message.content.contains("0 item(s) and 1 usage record(s)"));
        assert!(reply.message.content.contains("| Carlos Mendes |"));

        let nothing = keyword_reply(&inventory(), "zzz");
        assert!(nothing.message.content.starts_with("No items or usage records match"));
    }

    #[test]
    fn tables_are_capped_with_a_more_suffix() {
        let items: Vec<InventoryItem> = (0..13)
            .map(|n| item(&n.to_string(), "P", "PR", &format!("C-{n}")))
            .collect();
        let reply = keyword_reply(&items, "Show Inventory Table");
        assert_eq!(reply.message.content.matches("| P | PR |").count(), DEFAULT_DISPLAY_LIMIT);
        assert!(reply.message.content.ends_with("...and 3 more"));
    }
}
