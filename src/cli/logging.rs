use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter for the given verbosity flags. `quiet` wins over `verbose`.
pub fn filter_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => "info,mongodb=warn",
        1 => "debug,mongodb=info",
        _ => "trace",
    }
}

/// Install the global subscriber, logging to stderr.
///
/// `RUST_LOG` overrides the verbosity flags when it is set.
pub fn init_logging(verbose: u8, quiet: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, quiet)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(verbose >= 2)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    // already installed (tests call this more than once)
    let _ = result;
}
