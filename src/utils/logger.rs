use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines, for builds running under a CI or hosting log collector.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "spacetraveling=debug,info"
    } else {
        "spacetraveling=info"
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
