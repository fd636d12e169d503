// src/lib.rs

pub mod code_blocks;
pub mod config;
pub mod error;
pub mod markup;
pub mod models;
pub mod utils;

// Re-export specific items for convenience if needed
pub use code_blocks::{CodeBlockService, Validation, format_errors, render, validate};
