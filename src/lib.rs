pub mod api;
pub mod checks;
pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod recon;
pub mod reporting;
pub mod synthesis;
