use super::types::SondaError;

/// Coarse error category used to decide how a failure surfaces: input and
/// internal errors abort the scan, network and upstream failures degrade the
/// affected sub-result while the scan continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Upstream,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Network => "network",
            ErrorCategory::Upstream => "upstream",
            ErrorCategory::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub category: ErrorCategory,
    pub recoverable: bool,
}

impl SondaError {
    /// Classify this error into its category and whether the scan can
    /// continue with degraded output.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            SondaError::InvalidTarget(_) => ErrorClassification {
                category: ErrorCategory::Input,
                recoverable: false,
            },
            SondaError::Config(_) => ErrorClassification {
                category: ErrorCategory::Input,
                recoverable: false,
            },

            SondaError::Network(_) => ErrorClassification {
                category: ErrorCategory::Network,
                recoverable: true,
            },
            SondaError::Timeout(_) => ErrorClassification {
                category: ErrorCategory::Network,
                recoverable: true,
            },

            SondaError::LLMApi(_) => ErrorClassification {
                category: ErrorCategory::Upstream,
                recoverable: true,
            },
            SondaError::Authentication(_) => ErrorClassification {
                category: ErrorCategory::Upstream,
                recoverable: true,
            },

            SondaError::Io(_) => ErrorClassification {
                category: ErrorCategory::Internal,
                recoverable: false,
            },
            SondaError::Json(_) => ErrorClassification {
                category: ErrorCategory::Internal,
                recoverable: false,
            },
            SondaError::Internal(_) => ErrorClassification {
                category: ErrorCategory::Internal,
                recoverable: false,
            },
        }
    }
}
