//! Async HTTP client wrapping the Inquest JSON API.

use anyhow::{Context, Result, anyhow};
use inquest_core::{
  barrier::Barrier,
  causal::CausalFactor,
  evidence::Evidence,
  interview::Interview,
  investigation::Investigation,
  recommendation::Recommendation,
  timeline::TimelineEvent,
};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

/// Connection settings for the Inquest API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the Inquest JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = self
      .client
      .get(self.url(path))
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET {path} → {}", resp.status()));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising GET {path}"))
  }

  // ── Investigations ────────────────────────────────────────────────────────

  /// `GET /api/investigations`
  pub async fn list_investigations(&self) -> Result<Vec<Investigation>> {
    self.get_json("/investigations").await
  }

  /// `PUT /api/investigations/:id` — update only the description.
  /// Used by the debounced notes autosave.
  pub async fn save_description(&self, id: Uuid, description: String) -> Result<()> {
    let path = format!("/investigations/{id}");
    let resp = self
      .client
      .put(self.url(&path))
      .json(&json!({ "description": description }))
      .send()
      .await
      .with_context(|| format!("PUT {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("PUT {path} → {}", resp.status()));
    }
    Ok(())
  }

  // ── Per-investigation collections ─────────────────────────────────────────

  pub async fn evidence_for(&self, id: Uuid) -> Result<Vec<Evidence>> {
    self.get_json(&format!("/investigations/{id}/evidence")).await
  }

  pub async fn interviews_for(&self, id: Uuid) -> Result<Vec<Interview>> {
    self.get_json(&format!("/investigations/{id}/interviews")).await
  }

  pub async fn timeline_for(&self, id: Uuid) -> Result<Vec<TimelineEvent>> {
    self.get_json(&format!("/investigations/{id}/timeline")).await
  }

  pub async fn causal_factors_for(&self, id: Uuid) -> Result<Vec<CausalFactor>> {
    self
      .get_json(&format!("/investigations/{id}/causal-factors"))
      .await
  }

  pub async fn recommendations_for(&self, id: Uuid) -> Result<Vec<Recommendation>> {
    self
      .get_json(&format!("/investigations/{id}/recommendations"))
      .await
  }

  pub async fn barriers_for(&self, id: Uuid) -> Result<Vec<Barrier>> {
    self.get_json(&format!("/investigations/{id}/barriers")).await
  }

  // ── Report ────────────────────────────────────────────────────────────────

  /// `GET /api/investigations/:id/report?format=text` — the plain-text
  /// flattening used for display and clipboard export.
  pub async fn report_text(&self, id: Uuid) -> Result<String> {
    let path = format!("/investigations/{id}/report");
    let resp = self
      .client
      .get(self.url(&path))
      .query(&[("format", "text")])
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET {path} → {}", resp.status()));
    }
    resp.text().await.context("reading report text")
  }
}
