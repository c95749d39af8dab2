use crate::{Environment, LogFormat};
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in main() before any fallible operations. Safe to call
/// multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing for command-line tools.
///
/// Log lines are written to stderr so that stdout carries only command output
/// (reports, JSON). An `ErrorLayer` is installed so eyre reports include span
/// traces.
///
/// Environment variables:
/// - `RUST_LOG`: log filter (default: `warn` in production, `info` otherwise)
/// - `LOG_FORMAT`: `pretty`, `compact` or `json` (parsed by the caller into [`LogFormat`])
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(environment: &Environment, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });

    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
    };

    match result {
        Ok(_) => {
            debug!(?environment, ?format, "Tracing initialized");
        }
        Err(_) => {
            info!("Tracing already initialized, skipping re-initialization");
        }
    }
}
