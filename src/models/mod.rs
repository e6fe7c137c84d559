pub mod finding;
pub mod recon;
pub mod report;

pub use finding::{Finding, Severity};
pub use recon::{ProbeError, ProbeErrorKind, ReconResult};
pub use report::{AiAnalysis, Report, RiskLevel, TechnicalDetails, VulnerabilityResult};
