// src/services/session_store.rs

// Sessão local (token, role, username): o equivalente ao localStorage do navegador.
// Carregada na inicialização, apagada no logout ou em falha de autorização.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{common::error::AppError, models::auth::Session};

// Onde a sessão é guardada
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self) -> Result<Option<Session>, AppError>;
    async fn save(&self, session: &Session) -> Result<(), AppError>;
    async fn clear(&self) -> Result<(), AppError>;
}

// --- Arquivo JSON ---
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> Result<Option<Session>, AppError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Arquivo corrompido vale como "sem sessão"
        match serde_json::from_str(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Arquivo de sessão ilegível em {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let data = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// --- Memória (testes / sem SESSION_FILE) ---
#[derive(Default)]
pub struct MemorySessionStorage {
    slot: RwLock<Option<Session>>,
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> Result<Option<Session>, AppError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), AppError> {
        *self.slot.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.slot.write().await = None;
        Ok(())
    }
}

// A sessão corrente, com cópia em memória na frente do storage
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub async fn open(storage: Arc<dyn SessionStorage>) -> Result<Self, AppError> {
        let current = storage.load().await?;
        if let Some(session) = &current {
            tracing::info!("🔑 Sessão restaurada para {}", session.username);
        }
        Ok(Self {
            storage,
            current: Arc::new(RwLock::new(current)),
        })
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn save(&self, session: Session) -> Result<(), AppError> {
        self.storage.save(&session).await?;
        *self.current.write().await = Some(session);
        Ok(())
    }

    // Apaga as credenciais (logout ou 401/403)
    pub async fn clear(&self) -> Result<(), AppError> {
        *self.current.write().await = None;
        self.storage.clear().await
    }
}
