use tracing::info;

use crate::api::{build_router, AppState};
use crate::config::ScannerConfig;
use crate::errors::SondaError;

use super::commands::ServeArgs;

pub async fn handle_serve(args: ServeArgs) -> Result<(), SondaError> {
    let state = AppState {
        config: ScannerConfig::from_env(),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| SondaError::Internal(format!("Server error: {}", e)))?;
    Ok(())
}
