// src/client.rs

//! HTTP client for a scenario-persistence service speaking the same JSON
//! contract as [`crate::router`]. Failures are surfaced as-is; nothing is retried.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::models::{Scenario, ScenarioDraft};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl TransportError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(e) => e.status(),
        }
    }
}

#[derive(Clone)]
pub struct ScenarioClient {
    base: String,
    http: Client,
}

impl ScenarioClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base: base_url.trim_end_matches('/').to_string(), http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn read<T: DeserializeOwned>(resp: Response) -> Result<T, TransportError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(TransportError::Status { status, body });
        }
        Ok(resp.json().await?)
    }

    pub async fn save(&self, draft: &ScenarioDraft) -> Result<Scenario, TransportError> {
        let resp = self.http.post(self.url("/scenarios/")).json(draft).send().await?;
        Self::read(resp).await
    }

    pub async fn list(&self) -> Result<Vec<Scenario>, TransportError> {
        let resp = self.http.get(self.url("/scenarios/")).send().await?;
        Self::read(resp).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Scenario, TransportError> {
        let resp = self.http.get(self.url(&format!("/scenarios/{id}"))).send().await?;
        Self::read(resp).await
    }

    pub async fn update(&self, id: Uuid, draft: &ScenarioDraft) -> Result<Scenario, TransportError> {
        let resp = self.http.put(self.url(&format!("/scenarios/{id}"))).json(draft).send().await?;
        Self::read(resp).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), TransportError> {
        let resp = self.http.delete(self.url(&format!("/scenarios/{id}"))).send().await?;
        let _: serde_json::Value = Self::read(resp).await?;
        Ok(())
    }
}
