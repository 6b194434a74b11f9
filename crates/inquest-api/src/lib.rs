//! JSON REST API for Inquest.
//!
//! Exposes axum [`Router`]s backed by any
//! [`inquest_core::store::InvestigationStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", inquest_api::api_router(state.clone()))
//! .merge(inquest_api::files_router(state))
//! ```

pub mod assessments;
pub mod barriers;
pub mod causal_factors;
pub mod error;
pub mod evidence;
pub mod files;
pub mod interviews;
pub mod investigations;
pub mod recommendations;
pub mod report;
pub mod timeline;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post, put},
};
use inquest_core::store::InvestigationStore;

pub use error::ApiError;

/// Uploaded evidence files are capped at 8 MiB.
const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:    Arc<S>,
  /// Root directory for uploaded evidence blobs.
  pub blob_dir: PathBuf,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      blob_dir: self.blob_dir.clone(),
    }
  }
}

// ─── Routers ─────────────────────────────────────────────────────────────────

/// Build the CRUD + report API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: InvestigationStore + 'static,
{
  Router::new()
    // Investigations
    .route(
      "/investigations",
      get(investigations::list::<S>).post(investigations::create::<S>),
    )
    .route(
      "/investigations/{id}",
      get(investigations::get_one::<S>)
        .put(investigations::update::<S>)
        .delete(investigations::delete::<S>),
    )
    // Per-investigation collections
    .route(
      "/investigations/{id}/evidence",
      get(evidence::list::<S>).post(evidence::create::<S>),
    )
    .route(
      "/investigations/{id}/evidence/{eid}/file",
      post(evidence::upload_file::<S>)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
    .route(
      "/investigations/{id}/interviews",
      get(interviews::list::<S>).post(interviews::create::<S>),
    )
    .route(
      "/investigations/{id}/timeline",
      get(timeline::list::<S>).post(timeline::create::<S>),
    )
    .route(
      "/investigations/{id}/causal-factors",
      get(causal_factors::list::<S>).post(causal_factors::create::<S>),
    )
    .route(
      "/investigations/{id}/recommendations",
      get(recommendations::list::<S>).post(recommendations::create::<S>),
    )
    .route(
      "/investigations/{id}/barriers",
      get(barriers::list::<S>).post(barriers::create::<S>),
    )
    // The composed report
    .route("/investigations/{id}/report", get(report::get_report::<S>))
    // Item routes
    .route(
      "/evidence/{id}",
      put(evidence::update::<S>).delete(evidence::delete::<S>),
    )
    .route(
      "/interviews/{id}",
      put(interviews::update::<S>).delete(interviews::delete::<S>),
    )
    .route("/timeline/{id}", axum::routing::delete(timeline::delete::<S>))
    .route("/timeline/{id}/verify", post(timeline::verify::<S>))
    .route(
      "/causal-factors/{id}",
      put(causal_factors::update::<S>).delete(causal_factors::delete::<S>),
    )
    .route(
      "/causal-factors/{id}/hfat",
      get(assessments::get_hfat::<S>).put(assessments::put_hfat::<S>),
    )
    .route(
      "/causal-factors/{id}/hop",
      get(assessments::get_hop::<S>).put(assessments::put_hop::<S>),
    )
    .route(
      "/recommendations/{id}",
      put(recommendations::update::<S>).delete(recommendations::delete::<S>),
    )
    .route(
      "/barriers/{id}",
      put(barriers::update::<S>).delete(barriers::delete::<S>),
    )
    .with_state(state)
}

/// Build the blob-download router. Mounted at the root so the URLs returned
/// by the upload handler (`/files/...`) resolve as-is.
pub fn files_router<S>(state: ApiState<S>) -> Router<()>
where
  S: InvestigationStore + 'static,
{
  Router::new()
    .route("/files/{*path}", get(files::download::<S>))
    .with_state(state)
}
