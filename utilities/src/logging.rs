use std::path::Path;

use tracing::subscriber::SetGlobalDefaultError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt as _,
};

/// Installs the global subscriber: stdout always, plus daily rolling JSON files
/// named `<file_prefix>.<date>` when `log_dir` is set. Keep the returned guard
/// alive for as long as the files should be flushed.
pub fn init(
    file_prefix: &str,
    log_dir: Option<&Path>,
) -> Result<Option<WorkerGuard>, SetGlobalDefaultError> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::Layer::new().json().with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_span_events(FmtSpan::CLOSE),
        )
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}
