use tracing_subscriber::EnvFilter;

/// Sends diagnostics to stderr. `RUST_LOG` overrides the level chosen here.
pub fn init(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(debug))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn level(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}
