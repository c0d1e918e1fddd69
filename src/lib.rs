pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use crate::app::AdminApp;
pub use config::AppConfig;
pub use crate::core::{CardcastGateway, ImportOutcome};
pub use utils::error::{CardcastError, Result};
