// Logging setup
//
// Library code only emits `tracing` events; binaries decide where they go.
// Precedence: RUST_LOG > the level passed in (usually from config).

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init(level: &str) {
    let default_filter = format!("design_patterns={level},patterns={level}");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
