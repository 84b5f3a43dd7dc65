use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` wins; otherwise `warn`, or `debug` for this crate with `--verbose`.
fn base_filter(verbose: bool, rust_log: Option<String>) -> String {
    match rust_log {
        Some(filter) if !filter.trim().is_empty() => filter,
        _ if verbose => "warn,course_planner=debug".to_string(),
        _ => "warn".to_string(),
    }
}

/// Installs the stderr subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let base = base_filter(verbose, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&base).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}
