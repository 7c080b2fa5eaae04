//! Tracing setup for the CLI. Output goes to stderr so results on stdout stay
//! pipeable.
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

fn app_targets(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Targets::new().with_target(env!("CARGO_CRATE_NAME"), level)
}

pub fn init_logging(verbose: bool) {
    // RUST_LOG takes precedence over --verbose
    let (targets, env_filter) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (Targets::new().with_default(LevelFilter::TRACE), filter),
        Err(_) => (app_targets(verbose), EnvFilter::new("trace")),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(targets)
        .with(env_filter)
        .init();
}
