// src/services/mod.rs

pub mod code;
pub mod quiz;
pub mod scoring;
