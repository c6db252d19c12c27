pub mod advisor; // LLM advisory flows: risk analysis, history chat, travel tips
pub mod config;
pub mod export; // Health record summary PDF
pub mod models;
pub mod record; // Per-user record service and mutation protocol
pub mod store;
pub mod timeline; // Derived timeline views and the add-event cascade

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries and integration harnesses.
///
/// Library code only emits events; whoever embeds the crate decides
/// whether (and how) to subscribe.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("HealthSync core v{}", config::APP_VERSION);
}
