use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::models::ScanRequest;
use crate::api::AppState;
use crate::errors::SondaError;
use crate::pipeline;
use crate::reporting::{self, OutputFormat};

/// Thin adapter: validate the request shape, dispatch to the orchestrator,
/// render per the requested format. All decision logic lives in the core.
pub async fn run_scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Response, SondaError> {
    let report = pipeline::run_scan(&req.url, &state.config).await?;

    match req.format {
        OutputFormat::Json => Ok(Json(report).into_response()),
        OutputFormat::Text => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            reporting::render_text(&report),
        )
            .into_response()),
    }
}
