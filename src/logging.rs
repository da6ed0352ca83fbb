use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

// Keeps the non-blocking writer alive for the rest of the process. Dropping
// it would stop the worker thread and lose everything logged afterwards.
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialise logging. The default level is `info`; `debug` level can be
/// explicitly enabled via the settings file. When `file` is given, log lines
/// go through a non-blocking appender to that file; if the file cannot be
/// opened the logger falls back to stderr.
pub fn init(debug: bool, file: Option<PathBuf>) {
    // When debug logging is disabled we force `info` level regardless of the
    // `RUST_LOG` environment variable. This prevents accidental verbose output
    // if the variable happens to be set in the user's environment.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        // Allow `RUST_LOG` to override the level when debug logging is enabled.
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(path) = file {
        match open_log_file(&path) {
            Ok(handle) => {
                let (writer, guard) = tracing_appender::non_blocking(handle);
                let _ = FILE_GUARD.set(guard);
                let _ = builder.with_writer(writer).with_ansi(false).try_init();
                return;
            }
            Err(err) => {
                eprintln!("failed to open log file {}: {err}", path.display());
            }
        }
    }

    let _ = builder.try_init();
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::File::create(path)
}
