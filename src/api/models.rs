use serde::Deserialize;

use crate::reporting::OutputFormat;

#[derive(Deserialize)]
pub struct ScanRequest {
    pub url: String,
    #[serde(default)]
    pub format: OutputFormat,
}
