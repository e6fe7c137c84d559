pub mod types;
pub mod classification;

pub use types::SondaError;
pub use classification::{ErrorCategory, ErrorClassification};
