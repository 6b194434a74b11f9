//! Core types and trait definitions for the Inquest investigation store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod assessment;
pub mod barrier;
pub mod causal;
pub mod error;
pub mod evidence;
pub mod interview;
pub mod investigation;
pub mod recommendation;
pub mod store;
pub mod timeline;

pub use error::{Error, Result};
