pub mod ambulances;
pub mod conditions;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod update;

pub use config::{AppConfig, LoggingConfig, ServerConfig};
pub use observability::{init_tracing, shutdown_tracing};
pub use server::{AmbulanceServer, AppState, ServerBuilder, build_app, build_app_with_store};
pub use update::{Aggregate, Transformed, update_aggregate};
