pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod generator;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod synthesizer;
pub mod utils;
