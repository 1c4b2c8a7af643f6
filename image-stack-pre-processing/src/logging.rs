use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default warn level;
/// `debug` raises this crate to debug on top of it.
pub fn enable_tracing(debug: bool) {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    if debug {
        if let Ok(directive) = "image_stack_pre_processing=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }

    // A subscriber installed by an embedding application takes precedence.
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
