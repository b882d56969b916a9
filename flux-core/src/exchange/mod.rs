// flux-core/src/exchange/mod.rs

pub mod connector;
pub mod types;
pub mod utils;

// Re-exports für die Flux-Verdrahtung
pub use connector::HyperliquidInfoClient;
pub use types::*;
