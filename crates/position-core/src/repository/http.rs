//! HTTP Repository
//!
//! `PositionRepository` over the REST collection:
//! `GET/POST /positions`, `GET/PUT/DELETE /positions/{id}`.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::traits::PositionRepository;
use crate::config::ClientConfig;
use crate::domain::{Position, PositionDraft, PositionError, PositionResult};

/// REST client for the positions collection
#[derive(Debug, Clone)]
pub struct HttpPositionRepository {
    client: Client,
    config: ClientConfig,
}

impl HttpPositionRepository {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Use a preconfigured client (proxies, default headers, ...)
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

fn unavailable(err: reqwest::Error) -> PositionError {
    PositionError::RemoteUnavailable(err.to_string())
}

/// Map non-2xx statuses to errors; a 404 on an id route is `NotFound`
async fn check(response: Response, id: Option<u32>) -> PositionResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(PositionError::NotFound(id));
    }

    let reason = status.canonical_reason().unwrap_or_default().to_string();
    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => reason,
    };
    warn!("positions collection rejected request: {} {}", status.as_u16(), message);
    Err(PositionError::RemoteRejected {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> PositionResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| PositionError::InvalidResponse(e.to_string()))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PositionRepository for HttpPositionRepository {
    async fn list(&self) -> PositionResult<Vec<Position>> {
        let url = self.config.collection_url();
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await.map_err(unavailable)?;
        decode(check(response, None).await?).await
    }

    async fn get(&self, id: u32) -> PositionResult<Position> {
        let url = self.config.item_url(id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await.map_err(unavailable)?;
        decode(check(response, Some(id)).await?).await
    }

    async fn create(&self, draft: &PositionDraft) -> PositionResult<Position> {
        let url = self.config.collection_url();
        debug!("POST {} name={:?} parent={:?}", url, draft.name, draft.parent_id);
        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(unavailable)?;
        decode(check(response, None).await?).await
    }

    async fn update(&self, position: &Position) -> PositionResult<Position> {
        let url = self.config.item_url(position.id);
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .json(position)
            .send()
            .await
            .map_err(unavailable)?;
        decode(check(response, Some(position.id)).await?).await
    }

    async fn delete(&self, id: u32) -> PositionResult<()> {
        let url = self.config.item_url(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await.map_err(unavailable)?;
        check(response, Some(id)).await?;
        Ok(())
    }
}
