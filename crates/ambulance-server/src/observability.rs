// Tracing setup for the ambulance API with a reloadable level.
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

static LOG_RELOAD_HANDLE: OnceLock<reload::Handle<EnvFilter, tracing_subscriber::Registry>> =
    OnceLock::new();

/// Dependency targets that stay at `warn` whatever level is configured.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "reqwest"];

/// Builds the filter directives for `level`.
///
/// The ambulance crates and `tower_http` (request spans) follow `level`;
/// transport internals are capped at `warn`.
pub fn filter_directives(level: &str) -> String {
    let mut directives = format!(
        "{level},ambulance_server={level},ambulance_db_memory={level},tower_http={level}"
    );
    for target in QUIET_TARGETS {
        directives.push_str(&format!(",{target}=warn"));
    }
    directives
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(level)).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_tracing() {
    init_tracing_with_level("info");
}

pub fn init_tracing_with_level(level: &str) {
    // RUST_LOG wins over the ambulance defaults
    let base_filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| filter_for(level));

    let (reload_layer, handle) = reload::Layer::new(base_filter);
    let _ = LOG_RELOAD_HANDLE.set(handle);

    let _ = tracing_subscriber::registry()
        .with(reload_layer)
        .with(fmt::layer().with_target(true))
        .try_init();
}

/// Switches to the configured `logging.level` once the config is loaded.
///
/// `RUST_LOG` keeps precedence over the configured level.
pub fn apply_logging_level(level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Some(handle) = LOG_RELOAD_HANDLE.get() {
        let _ = handle.modify(|f| {
            *f = filter_for(level);
        });
    }
}

pub fn shutdown_tracing() {
    tracing::info!("tracing shut down");
}
