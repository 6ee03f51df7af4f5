//! Core logic: types, parsing, resolution, generation, orchestration.

pub mod config;
pub mod error;
pub mod generator;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod types;
