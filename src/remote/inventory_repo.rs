// src/remote/inventory_repo.rs

use anyhow::{bail, Context};
use reqwest::Url;

use crate::{
    common::error::AppError,
    models::inventory::{InventoryItem, NewInventoryItem, NewUsageEntry, UsageEntry},
    remote::client::RemoteClient,
};

// O repositório de inventário: todas as chamadas ao endpoint remoto `{base}`
#[derive(Clone)]
pub struct InventoryRepository {
    client: RemoteClient,
    base_url: Url,
}

impl InventoryRepository {
    pub fn new(client: RemoteClient, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("URL do inventário inválida: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("URL do inventário sem caminho: {base_url}");
        }
        Ok(Self { client, base_url })
    }

    // {base}/seg1/seg2..., cada segmento percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // GET {base}
    pub async fn list(&self) -> Result<Vec<InventoryItem>, AppError> {
        let response = self.client.send(self.client.http().get(self.base_url.clone())).await?;
        Ok(response.json().await?)
    }

    // POST {base}
    pub async fn create(&self, item: &NewInventoryItem) -> Result<InventoryItem, AppError> {
        let response = self
            .client
            .send(self.client.http().post(self.base_url.clone()).json(item))
            .await?;
        Ok(response.json().await?)
    }

    // POST {base}/batch
    pub async fn create_batch(&self, items: &[NewInventoryItem]) -> Result<(), AppError> {
        self.client
            .send(self.client.http().post(self.url(&["batch"])).json(items))
            .await?;
        Ok(())
    }

    // PUT {base}/{id}
    pub async fn update(&self, item: &InventoryItem) -> Result<(), AppError> {
        self.client
            .send(self.client.http().put(self.url(&[item.id.as_str()])).json(item))
            .await?;
        Ok(())
    }

    // DELETE {base}/{id}
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.client
            .send(self.client.http().delete(self.url(&[id])))
            .await?;
        Ok(())
    }

    // POST {base}/{id}/usage
    pub async fn add_usage(&self, item_id: &str, entry: &NewUsageEntry) -> Result<UsageEntry, AppError> {
        let response = self
            .client
            .send(
                self.client
                    .http()
                    .post(self.url(&[item_id, "usage"]))
                    .json(entry),
            )
            .await?;
        Ok(response.json().await?)
    }

    // DELETE {base}/{id}/usage/{usageId}
    pub async fn delete_usage(&self, item_id: &str, usage_id: &str) -> Result<(), AppError> {
        self.client
            .send(
                self.client
                    .http()
                    .delete(self.url(&[item_id, "usage", usage_id])),
            )
            .await?;
        Ok(())
    }
}
