//! # Boptone Common Library
//!
//! Shared code for the Boptone quality-control tooling:
//! - Error type shared by all crates
//! - Configuration file resolution and TOML loading
//! - Logging initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
