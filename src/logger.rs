use log::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the process-wide subscriber. `RUST_LOG` takes precedence over `level`.
pub fn setup_logger(level: LevelFilter) {
    let directive = format!(
        "{}={}",
        env!("CARGO_CRATE_NAME"),
        level.as_str().to_lowercase()
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
