//! Report engine for Inquest.
//!
//! Assembles the per-investigation record collections into a single
//! hierarchical document and renders it as extractable plain text. The
//! document itself is a serde-serialisable tree, so a visual client can
//! render the same structure the text export flattens.

pub mod compose;
pub mod error;
pub mod fetch;
pub mod human_factors;
pub mod render;
pub mod timeline;

pub use compose::{Block, Report, Section, Subsection, compose};
pub use error::Error;
pub use fetch::ReportData;
pub use render::render_plain_text;
