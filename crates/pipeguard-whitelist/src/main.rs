//! pipeguard decision service
//!
//! - Config: argv[1], else `PIPEGUARD_CONFIG`, else `pipeguard.yaml`
//! - Protocol: JSON lines on stdin, one decision per line on stdout
//! - Logs go to stderr (`RUST_LOG` controls the filter)

use std::path::Path;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use pipeguard_core::error::{GuardError, Result};
use pipeguard_whitelist::{app_state::AppState, config, guard};

const DEFAULT_CONFIG: &str = "pipeguard.yaml";

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), "{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PIPEGUARD_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let cfg = config::load_from_file(&path)?;
    let base_dir = Path::new(&path).parent().unwrap_or_else(|| Path::new("."));
    let state = AppState::new(&cfg, base_dir)?;

    tracing::info!(config = %path, "pipeguard decision service ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| GuardError::Internal(format!("read stdin failed: {e}")))?
    {
        if line.trim().is_empty() {
            continue;
        }
        let resp = guard::handle_line(&state, &line);
        let mut out = serde_json::to_string(&resp)
            .map_err(|e| GuardError::Internal(format!("encode response failed: {e}")))?;
        out.push('\n');
        stdout
            .write_all(out.as_bytes())
            .await
            .map_err(|e| GuardError::Internal(format!("write stdout failed: {e}")))?;
        stdout
            .flush()
            .await
            .map_err(|e| GuardError::Internal(format!("flush stdout failed: {e}")))?;
    }

    tracing::info!(metrics = %state.metrics().render(), "stdin closed, shutting down");
    Ok(())
}
