//! File logging. The terminal belongs to the UI, so nothing is ever logged
//! to stdout or stderr.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

const LOG_BASENAME: &str = "daybook";
const MAX_LOG_BYTES: u64 = 1024 * 1024;
const KEEP_LOG_FILES: usize = 3;

struct ActiveLogger {
    dir: PathBuf,
    handle: LoggerHandle,
}

static ACTIVE: OnceLock<ActiveLogger> = OnceLock::new();

/// Start logging into `dir`. Calling again is a no-op that reports the
/// directory already in use. Errors are returned as text so the caller can
/// carry on without a log.
pub fn init_logging(level: &str, dir: &Path) -> Result<PathBuf, String> {
    if let Some(active) = ACTIVE.get() {
        return Ok(active.dir.clone());
    }

    std::fs::create_dir_all(dir)
        .map_err(|e| format!("failed to create log directory {}: {e}", dir.display()))?;

    let handle = Logger::try_with_str(level)
        .map_err(|e| format!("invalid log level '{level}': {e}"))?
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(MAX_LOG_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|e| format!("failed to start logger: {e}"))?;

    let active = ACTIVE.get_or_init(|| ActiveLogger {
        dir: dir.to_path_buf(),
        handle,
    });
    log::info!(
        "daybook {} started, logging to {}",
        env!("CARGO_PKG_VERSION"),
        active.dir.display()
    );
    Ok(active.dir.clone())
}

/// Write out buffered records. Short-lived commands must call this before
/// exiting or the tail of the log is lost.
pub fn flush_logging() {
    if let Some(active) = ACTIVE.get() {
        active.handle.flush();
    }
}
