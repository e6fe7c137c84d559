use async_trait::async_trait;
use reqwest::Url;

use super::{Check, CheckContext};
use crate::errors::SondaError;
use crate::models::{Finding, Severity};

/// Query parameters commonly wired straight into database lookups.
const COMMON_PARAMS: &[&str] = &["id", "q", "search", "page", "query"];

/// Vendor-specific fragments that appear in leaked database error pages.
const SQL_ERROR_FRAGMENTS: &[&str] = &[
    "SQL syntax",
    "mysql_fetch",
    "mysql_num_rows",
    "MySqlException",
    "ORA-00933",
    "ORA-01756",
    "PostgreSQL ERROR",
    "pg_query()",
    "SQLite3::",
    "sqlite3.OperationalError",
    "Unclosed quotation mark",
    "Microsoft OLE DB Provider",
    "ODBC SQL Server Driver",
    "SQLSTATE[",
];

/// Sends a single-quote payload on common parameters and scans the response
/// for leaked database error text. A match means the input reached a SQL
/// layer unsanitized and error detail is disclosed to clients; the absence
/// of a match proves nothing.
pub struct SqlErrorCheck;

#[async_trait]
impl Check for SqlErrorCheck {
    fn name(&self) -> &'static str {
        "sql_error"
    }

    async fn run(&self, target: &Url, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, SondaError> {
        // One request carrying the payload in every common parameter keeps
        // outbound traffic to a single call.
        let mut probe_url = target.clone();
        for param in COMMON_PARAMS {
            probe_url.query_pairs_mut().append_pair(param, "'");
        }

        let response = ctx
            .client
            .get(probe_url)
            .send()
            .await
            .map_err(|e| SondaError::Network(format!("SQL error probe failed: {}", e)))?;
        let body = response
            .text()
            .await
            .map_err(|e| SondaError::Network(format!("SQL error probe body read failed: {}", e)))?;

        let mut findings = Vec::new();
        if let Some(fragment) = SQL_ERROR_FRAGMENTS.iter().find(|f| body.contains(*f)) {
            findings.push(Finding::new(
                "SQL error message disclosure",
                Severity::Critical,
                format!(
                    "A single-quote payload in a query parameter triggered a database \
                     error page containing \"{}\". User input reaches the SQL layer \
                     unsanitized and raw error detail is exposed to clients.",
                    fragment
                ),
            ));
        }
        Ok(findings)
    }
}
