// src/config.rs

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context};

use crate::{
    remote::{AuthRepository, ChatRepository, InventoryRepository, RemoteClient},
    services::{
        assistant_service::AssistantService,
        auth::AuthService,
        inventory_service::InventoryService,
        session_store::{FileSessionStorage, MemorySessionStorage, SessionStorage, SessionStore},
    },
};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_INVENTORY_API_URL: &str = "http://localhost:5000/api/inventory";
pub const DEFAULT_ASSISTANT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub inventory_api_url: String,
    pub login_api_url: String,
    // None = sessão só em memória
    pub session_file: Option<PathBuf>,
    pub require_login: bool,
    // None = assistente em modo palavra-chave
    pub assistant: Option<AssistantConfig>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lê a configuração de qualquer fonte chave -> valor (env, testes).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let inventory_api_url = get("INVENTORY_API_URL")
            .unwrap_or_else(|| DEFAULT_INVENTORY_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        // Mesma base do inventário, trocando /inventory por /login
        let login_api_url = get("LOGIN_API_URL")
            .unwrap_or_else(|| inventory_api_url.replacen("/inventory", "/login", 1));

        let require_login = match get("REQUIRE_LOGIN") {
            Some(raw) => parse_flag(&raw).with_context(|| format!("REQUIRE_LOGIN inválido: {raw}"))?,
            None => false,
        };

        let assistant = get("ASSISTANT_API_URL").map(|url| AssistantConfig {
            url,
            api_key: get("ASSISTANT_API_KEY"),
            model: get("ASSISTANT_MODEL").unwrap_or_else(|| DEFAULT_ASSISTANT_MODEL.to_string()),
        });

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            inventory_api_url,
            login_api_url,
            session_file: get("SESSION_FILE").map(PathBuf::from),
            require_login,
            assistant,
        })
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("esperado true/false, recebido '{other}'"),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: SessionStore,
    pub inventory_service: InventoryService,
    pub auth_service: AuthService,
    pub assistant_service: AssistantService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let storage: Arc<dyn SessionStorage> = match &config.session_file {
            Some(path) => {
                tracing::info!("🔑 Sessão persistida em {}", path.display());
                Arc::new(FileSessionStorage::new(path))
            }
            None => Arc::new(MemorySessionStorage::default()),
        };
        Self::with_storage(config, storage).await
    }

    // --- Monta o gráfico de dependências ---
    pub async fn with_storage(config: Config, storage: Arc<dyn SessionStorage>) -> anyhow::Result<Self> {
        let session = SessionStore::open(storage)
            .await
            .context("Falha ao carregar a sessão salva")?;

        let http = reqwest::Client::builder()
            .build()
            .context("Falha ao criar o cliente HTTP")?;

        let remote = RemoteClient::new(http.clone(), session.clone());
        let inventory_repo = InventoryRepository::new(remote, &config.inventory_api_url)?;
        let auth_repo = AuthRepository::new(http.clone(), config.login_api_url.clone());
        let chat_repo = config
            .assistant
            .as_ref()
            .map(|a| ChatRepository::new(http.clone(), a.url.clone(), a.api_key.clone(), a.model.clone()));

        if chat_repo.is_none() {
            tracing::info!("🤖 ASSISTANT_API_URL ausente: assistente em modo palavra-chave");
        }

        let inventory_service = InventoryService::new(inventory_repo);
        let auth_service = AuthService::new(auth_repo, session.clone());
        let assistant_service = AssistantService::new(inventory_service.clone(), chat_repo);

        Ok(Self {
            config: Arc::new(config),
            session,
            inventory_service,
            auth_service,
            assistant_service,
        })
    }
}
