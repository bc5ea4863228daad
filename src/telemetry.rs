use flowgraph::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// JSON lines to a log file; the terminal belongs to the TUI. Keep the
/// guard alive until exit or buffered lines are lost.
pub fn init_tracing(config: &LoggingConfig) -> WorkerGuard {
    let appender = tracing_appender::rolling::never(&config.directory, &config.file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.filter.as_str().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
    guard
}
