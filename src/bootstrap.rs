//! Application startup and shutdown sequence.

use anyhow::Context;
use libris_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Build a registry holding every application module.
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Initialize and start all modules, serve HTTP until shutdown, then stop
/// modules in reverse order.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "libris bootstrap starting"
    );

    let registry = build_registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_all(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_all(&ctx)
        .await
        .context("module startup failed")?;

    tracing::info!(modules = registry.len(), "libris bootstrap complete");

    let served = libris_http::start_server(&registry, &settings).await;

    registry
        .stop_all()
        .await
        .context("module shutdown failed")?;

    served
}
