use tracing_subscriber::EnvFilter;

/// Installs the global console logger. Honours `RUST_LOG`; without it the
/// crate logs at `info`, or `debug` when the battery record asks for verbose
/// logging.
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::prelude::*;

    let default_directives = if verbose {
        "info,battery_config_bevy=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    // A second call (tests, embedding apps) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
