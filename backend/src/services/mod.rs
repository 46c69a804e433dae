//! Business logic services
//!
//! Services encapsulate business logic and coordinate with
//! external systems.

pub mod analysis;
pub mod completion;

pub use analysis::AnalysisService;
pub use completion::{ChatCompletionClient, CompletionClient};
