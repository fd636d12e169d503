// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Prefix of the message shown when a save is rejected.
pub const DEFAULT_ERROR_LABEL: &str = "Advanced Code Blocks: ";

#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub error_label: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "warn".to_string());

        let error_label = env::var("CODE_BLOCKS_ERROR_LABEL")
            .unwrap_or_else(|_| DEFAULT_ERROR_LABEL.to_string());

        Self {
            rust_log,
            error_label,
        }
    }
}
