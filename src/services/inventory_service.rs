// src/services/inventory_service.rs

// Dono da lista de itens em memória (espelho do servidor remoto).
// Regra única: o cache só muda DEPOIS que o servidor confirma a operação.
// Em caso de falha o cache fica intacto e o erro sobe para o chamador.
// Exceção: 401/403 do servidor esvazia o cache junto com a sessão.
//
// Mutações passam uma de cada vez pelo `write_gate`; o RwLock do cache
// só é travado por instantes, nunca durante uma chamada remota.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};

use crate::{
    common::error::AppError,
    models::inventory::{AddUsagePayload, InventoryItem, NewInventoryItem, NewUsageEntry},
    remote::InventoryRepository,
};

#[derive(Default)]
struct Cache {
    items: Vec<InventoryItem>,
    loaded: bool,
}

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    cache: Arc<RwLock<Cache>>,
    write_gate: Arc<Mutex<()>>,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository) -> Self {
        Self {
            inventory_repo,
            cache: Arc::new(RwLock::new(Cache::default())),
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    // Sessão expirada no servidor: o próximo acesso precisa buscar de novo
    async fn expire_on_auth_failure<T>(&self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(AppError::SessionExpired) = &result {
            self.invalidate().await;
            tracing::warn!("🔒 Sessão expirada: cache de inventário descartado");
        }
        result
    }

    // --- LIST / REFRESH ---
    pub async fn refresh(&self) -> Result<usize, AppError> {
        let _gate = self.write_gate.lock().await;
        self.reload().await
    }

    async fn reload(&self) -> Result<usize, AppError> {
        let items = self
            .expire_on_auth_failure(self.inventory_repo.list().await)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to load inventory: {}", e);
            })?;

        let mut cache = self.cache.write().await;
        cache.items = items;
        cache.loaded = true;
        tracing::info!("📦 Inventário carregado: {} itens", cache.items.len());
        Ok(cache.items.len())
    }

    // Só para quem já segura o write_gate
    async fn ensure_loaded(&self) -> Result<(), AppError> {
        if !self.cache.read().await.loaded {
            self.reload().await?;
        }
        Ok(())
    }

    async fn cached(&self, id: &str) -> Result<InventoryItem, AppError> {
        self.cache
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| AppError::ItemNotFound(id.to_string()))
    }

    /// Cópia da lista atual. Na primeira chamada busca no servidor.
    pub async fn list(&self) -> Result<Vec<InventoryItem>, AppError> {
        if !self.cache.read().await.loaded {
            self.refresh().await?;
        }
        Ok(self.cache.read().await.items.clone())
    }

    pub async fn find(&self, id: &str) -> Result<InventoryItem, AppError> {
        self.list()
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::ItemNotFound(id.to_string()))
    }

    // --- CREATE ---
    pub async fn add_item(&self, payload: NewInventoryItem) -> Result<InventoryItem, AppError> {
        let _gate = self.write_gate.lock().await;
        self.ensure_loaded().await?;

        let saved = self
            .expire_on_auth_failure(self.inventory_repo.create(&payload).await)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to add item {}: {}", payload.item_code, e);
            })?;

        // Item novo entra no topo da lista
        self.cache.write().await.items.insert(0, saved.clone());
        tracing::info!("✅ Item {} criado no projeto {}", saved.item_code, saved.project_id);
        Ok(saved)
    }

    // --- BATCH (importação) ---
    // Anexa sem deduplicar; depois recarrega tudo para ficar em sincronia.
    pub async fn add_items(&self, items: Vec<NewInventoryItem>) -> Result<usize, AppError> {
        if items.is_empty() {
            return Err(AppError::InvalidInput("There are no items to import.".into()));
        }

        let _gate = self.write_gate.lock().await;
        self.expire_on_auth_failure(self.inventory_repo.create_batch(&items).await)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to upload batch of {} items: {}", items.len(), e);
            })?;
        tracing::info!("✅ Lote de {} itens enviado", items.len());

        self.reload().await?;
        Ok(items.len())
    }

    // --- UPDATE ---
    // O formulário não edita o histórico de uso; ele é mantido do cache.
    pub async fn update_item(&self, id: &str, payload: NewInventoryItem) -> Result<InventoryItem, AppError> {
        let _gate = self.write_gate.lock().await;
        self.ensure_loaded().await?;

        let current = self.cached(id).await?;
        let updated = payload.into_item(current.id, current.usage);

        self.expire_on_auth_failure(self.inventory_repo.update(&updated).await)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to update item {}: {}", id, e);
            })?;

        let mut cache = self.cache.write().await;
        match cache.items.iter_mut().find(|item| item.id == id) {
            Some(slot) => {
                slot.apply_form(&updated);
                Ok(slot.clone())
            }
            None => Ok(updated),
        }
    }

    // --- DELETE ---
    pub async fn delete_item(&self, id: &str) -> Result<(), AppError> {
        let _gate = self.write_gate.lock().await;
        self.ensure_loaded().await?;
        self.cached(id).await?;

        self.expire_on_auth_failure(self.inventory_repo.delete(id).await)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to delete item {}: {}", id, e);
            })?;

        self.cache.write().await.items.retain(|item| item.id != id);
        tracing::info!("🗑️ Item {} removido", id);
        Ok(())
    }

    // --- USAGE (consumo) ---
    pub async fn add_usage(&self, item_id: &str, payload: AddUsagePayload) -> Result<InventoryItem, AppError> {
        // Com o gate, ninguém muda o uso deste item entre a validação e a confirmação
        let _gate = self.write_gate.lock().await;
        self.ensure_loaded().await?;

        let item = self.cached(item_id).await?;
        let quantity = validate_usage(&item, &payload)?;
        if let Some(image) = &payload.issue_slip_image {
            if !image.starts_with("data:image/") {
                return Err(AppError::NotAnImage);
            }
        }

        let entry = NewUsageEntry {
            project_id: payload.project_id.trim().to_string(),
            quantity,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            issued_to: payload.issued_to.trim().to_string(),
            issue_slip_image: payload.issue_slip_image,
        };

        let saved = self
            .expire_on_auth_failure(self.inventory_repo.add_usage(item_id, &entry).await)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to add usage to item {}: {}", item_id, e);
            })?;

        tracing::info!(
            "✅ Uso de {} registrado no item {} (projeto {})",
            entry.quantity, item.item_code, entry.project_id
        );

        let mut cache = self.cache.write().await;
        match cache.items.iter_mut().find(|it| it.id == item_id) {
            Some(slot) => {
                slot.usage.push(saved);
                Ok(slot.clone())
            }
            // Cache descartado (logout) durante a chamada
            None => {
                let mut item = item;
                item.usage.push(saved);
                Ok(item)
            }
        }
    }

    pub async fn delete_usage(&self, item_id: &str, usage_id: &str) -> Result<InventoryItem, AppError> {
        let _gate = self.write_gate.lock().await;
        self.ensure_loaded().await?;

        let item = self.cached(item_id).await?;
        if !item.usage.iter().any(|u| u.id == usage_id) {
            return Err(AppError::UsageNotFound(usage_id.to_string()));
        }

        self.expire_on_auth_failure(self.inventory_repo.delete_usage(item_id, usage_id).await)
            .await
            .inspect_err(|e| {
                tracing::error!("Failed to delete usage {} of item {}: {}", usage_id, item_id, e);
            })?;

        let mut cache = self.cache.write().await;
        match cache.items.iter_mut().find(|it| it.id == item_id) {
            Some(slot) => {
                slot.usage.retain(|u| u.id != usage_id);
                Ok(slot.clone())
            }
            None => {
                let mut item = item;
                item.usage.retain(|u| u.id != usage_id);
                Ok(item)
            }
        }
    }

    // Logout / sessão expirada: a próxima leitura busca de novo no servidor
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        cache.items.clear();
        cache.loaded = false;
    }
}

/// Validação do formulário de uso. Retorna a quantidade aceita.
pub fn validate_usage(item: &InventoryItem, payload: &AddUsagePayload) -> Result<Decimal, AppError> {
    if payload.project_id.trim().is_empty() {
        return Err(AppError::InvalidInput("Please select a project.".into()));
    }
    if payload.quantity <= Decimal::ZERO {
        return Err(AppError::NonPositiveQuantity);
    }

    let available = item.remaining_qty();
    if payload.quantity > available {
        return Err(AppError::QuantityExceedsAvailable {
            available: available.normalize(),
        });
    }
    if payload.issued_to.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter the name of the person receiving the material.".into(),
        ));
    }
    Ok(payload.quantity)
}
