pub mod orchestrator;

pub use orchestrator::{run_scan, validate_target, GENERATOR_TAG};
