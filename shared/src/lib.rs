//! MetabolicAI Shared Library
//!
//! This crate contains the metrics engine, the saved-result history and the
//! wire types used by the backend relay and the WASM module.

pub mod errors;
pub mod health_metrics;
pub mod history;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use history::{HistoryEntry, HistoryStorage, HistoryStore, MemoryStorage};
pub use types::*;
