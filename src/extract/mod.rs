//! Extraction pipeline: locating card blocks, polishing their content,
//! resolving deck names, and re-marking processed blocks.

pub mod engine;
pub mod pattern;
pub mod polish;
pub mod resolve;

pub use engine::{Card, ExtractOptions, ExtractOutcome, extract_from_documents};
