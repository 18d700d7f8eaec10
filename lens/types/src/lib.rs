pub mod action;
pub mod config;
mod denom;
pub mod feed;
pub mod health;
pub mod market;
pub mod snapshot;

pub use denom::*;

// Re-exports
pub use lens_math::{Dec, MathError, MathResult, Rounding, Uint128};

/// Represents any valid JSON value.
///
/// Used for the parts of the risk engine's input schema that this application
/// never populates (vaults, perps) but must still send, so their exact shape
/// is left to the engine.
pub use serde_json::Value as Json;
