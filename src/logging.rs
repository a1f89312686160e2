use std::sync::OnceLock;

use flexi_logger::{Logger, LoggerHandle};
use log::info;

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Starts the stderr logger. `RUST_LOG` overrides `level` when set. Calling
/// this again after a successful start does nothing.
pub fn init_logging(level: &str) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let handle = Logger::try_with_env_or_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;
    if LOGGER.set(handle).is_ok() {
        info!(
            "event=app_start version={} level={}",
            env!("CARGO_PKG_VERSION"),
            level
        );
    }
    Ok(())
}
