use tracing_subscriber::EnvFilter;

/// Default log level for a `-v` count.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber. `RUST_LOG` takes precedence over `-v`.
///
/// Logs go to stderr so notifications on stdout stay clean. Calling this
/// twice is harmless; the second call keeps the first subscriber.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: logging already initialised: {}", e);
    }
}
