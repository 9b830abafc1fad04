use tracing_subscriber::{fmt, EnvFilter};

/// Sets up tracing output on stderr.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count,
/// starting at `warn`.
pub fn setup_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("logging initialized");
}
