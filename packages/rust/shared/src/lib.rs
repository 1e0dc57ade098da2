//! Shared types, error model, and configuration for stima.
//!
//! This crate is the foundation depended on by all other stima crates.
//! It provides:
//! - [`StimaError`] — the unified error type
//! - Domain types ([`Phase`], [`RateConfig`], [`Aggregate`], [`FinalQuote`])
//! - Rounding and currency formatting ([`money`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod money;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputConfig, config_dir, config_file_path, init_config, init_config_at,
    load_config, load_config_from,
};
pub use error::{Result, StimaError};
pub use types::{Aggregate, FinalQuote, Phase, RateConfig, RenderMode};
