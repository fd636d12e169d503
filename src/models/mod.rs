// src/models/mod.rs

pub mod article;
