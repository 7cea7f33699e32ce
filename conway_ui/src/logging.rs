// logging.rs - stderr tracing output for the desktop window

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when `RUST_LOG` is unset; engine start/stop/halt lines show up at `info`.
const DEFAULT_FILTER: &str = "conway=info,conway_ui=info,warn";

/// Install the global subscriber. `RUST_LOG=conway=debug` adds per-generation lines.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
