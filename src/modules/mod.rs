pub mod books;
pub mod stats;

use catalog_kernel::ModuleRegistry;

use books::store::CatalogState;

/// Register the catalog modules; they all share `state`.
pub fn register_all(registry: &mut ModuleRegistry, state: CatalogState) -> anyhow::Result<()> {
    registry.register(books::create_module(state.clone()))?;
    registry.register(stats::create_module(state))?;
    Ok(())
}
