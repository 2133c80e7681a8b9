use anyhow::{Context, Result};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::Path;

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

/// Log to `folio_*.log` under `log_dir`; the terminal belongs to the UI.
///
/// Level comes from `RUST_LOG` when set. Keep the returned handle alive
/// for as long as logging is needed.
pub fn init_logging(log_dir: &Path) -> Result<LoggerHandle> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("Invalid log specification")?
        .log_to_file(FileSpec::default().directory(log_dir).basename("folio"))
        .start()
        .context("Failed to start logger")?;

    log::info!("Logging to {}", log_dir.display());
    Ok(handle)
}
