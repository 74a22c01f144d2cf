use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber: human-readable output on stderr, plus a daily rolling
/// file under `log_dir` when one is configured.
///
/// `RUST_LOG` wins over `default_filter`. Keep the returned guard alive for the life of
/// the process or buffered file output is lost.
pub fn init_tracing(default_filter: &str, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .without_time()
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir.map(open_log_dir) {
        Some(Ok((writer, guard))) => {
            let layer = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            eprintln!("file logging disabled: {e}");
            (None, None)
        }
        None => (None, None),
    };

    // try_init so tests that install their own subscriber don't panic here
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    guard
}

fn open_log_dir(
    log_dir: &Path,
) -> std::io::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, "faultline.log");
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_dir_is_created_and_guard_returned() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let guard = init_tracing("debug", Some(&log_dir));
        assert!(guard.is_some());
        assert!(log_dir.is_dir());
    }
}
