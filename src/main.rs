use anyhow::Context;
use catalog_app::{modules, CatalogState};
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;
    catalog_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "catalog-app bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, CatalogState::default())?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("catalog-app bootstrap complete");

    let served =
        catalog_http::start_server(&registry, &settings, catalog_http::shutdown_signal()).await;
    registry.stop_modules().await?;
    served
}
