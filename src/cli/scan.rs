use crate::config::ScannerConfig;
use crate::errors::SondaError;
use crate::pipeline;
use crate::reporting;

use super::commands::ScanArgs;

pub async fn handle_scan(args: ScanArgs) -> Result<(), SondaError> {
    let config = ScannerConfig::from_env();
    let report = pipeline::run_scan(&args.target, &config).await?;

    let rendered = match args.format.as_str() {
        "json" => reporting::render_json(&report)?,
        "text" => reporting::render_text(&report),
        other => {
            return Err(SondaError::Config(format!(
                "Unknown format '{}': expected json or text",
                other
            )))
        }
    };
    println!("{}", rendered);
    Ok(())
}
