use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity level for a security finding, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Returns a numeric rank where lower values indicate higher severity.
    /// Critical = 0, High = 1, Medium = 2, Low = 3, Info = 4.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
            Severity::Info => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }
}

/// A single detected issue. Immutable once appended by a check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub title: String,
    pub severity: Severity,
    pub description: String,
    /// When the check produced this finding.
    pub detected_at: DateTime<Utc>,
}

impl Finding {
    pub fn new(title: impl Into<String>, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            severity,
            description: description.into(),
            detected_at: Utc::now(),
        }
    }
}
