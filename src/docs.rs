// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_session,

        // --- INVENTORY ---
        handlers::inventory::list_items,
        handlers::inventory::refresh_items,
        handlers::inventory::create_item,
        handlers::inventory::create_batch,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,
        handlers::inventory::add_usage,
        handlers::inventory::delete_usage,
        handlers::inventory::upload_issue_slip,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_project_dashboard,
        handlers::dashboard::get_summary,
        handlers::dashboard::get_usage,
        handlers::dashboard::get_projects,

        // --- Import / Reports ---
        handlers::import::preview_import,
        handlers::import::commit_import,
        handlers::reports::inventory_report,
        handlers::reports::usage_report,
        handlers::reports::import_template,

        // --- Search / Assistant ---
        handlers::search::search,
        handlers::assistant::chat,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::LoginUserPayload,
            models::auth::SessionInfo,

            // --- Inventory ---
            models::inventory::UsageEntry,
            models::inventory::InventoryItem,
            models::inventory::NewInventoryItem,
            models::inventory::AddUsagePayload,
            models::inventory::StockStatus,
            models::inventory::ItemView,
            models::inventory::IssueSlipResponse,

            // --- Dashboard ---
            models::dashboard::ProjectGroup,
            models::dashboard::PrGroup,
            models::dashboard::DeliveryStatus,
            models::dashboard::PrSummary,
            models::dashboard::ProjectSummary,
            models::dashboard::Availability,
            models::dashboard::UsageRow,

            // --- Import ---
            models::import::ImportPreview,
            models::import::ImportResult,

            // --- Search ---
            models::search::UsageMatch,
            models::search::SearchPage,

            // --- Assistant ---
            models::assistant::ChatRole,
            models::assistant::ChatMessage,
            models::assistant::ChatRequest,
            models::assistant::ReportKind,
            models::assistant::AssistantAction,
            models::assistant::ChatReply,
        )
    ),
    tags(
        (name = "Auth", description = "Login no serviço remoto e sessão local"),
        (name = "Inventory", description = "Itens, consumo e comprovantes"),
        (name = "Dashboard", description = "Visões por projeto, PR e consumo"),
        (name = "Import", description = "Importação de itens via CSV"),
        (name = "Reports", description = "Relatórios CSV para download"),
        (name = "Search", description = "Busca por palavra-chave"),
        (name = "Assistant", description = "Assistente de inventário")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
