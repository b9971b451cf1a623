use async_trait::async_trait;
use axum::{extract::State, routing::get, Json, Router};
use catalog_kernel::{InitCtx, Module};
use serde_json::json;

use catalog_model::CatalogStats;
use super::books::store::CatalogState;

/// Aggregate figures over the catalog, recomputed on every request
pub struct StatsModule {
    state: CatalogState,
}

impl StatsModule {
    pub const fn new(state: CatalogState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for StatsModule {
    fn name(&self) -> &'static str {
        "stats"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "stats module initialized");
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(catalog_stats))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Catalog statistics",
                        "tags": ["Stats"],
                        "responses": {
                            "200": {
                                "description": "Counts by status and total copies",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/CatalogStats" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "CatalogStats": {
                        "type": "object",
                        "properties": {
                            "totalBooks": { "type": "integer" },
                            "availableBooks": { "type": "integer" },
                            "borrowedBooks": { "type": "integer" },
                            "totalCopies": {
                                "type": "integer",
                                "description": "Sum of integral copy counts"
                            }
                        },
                        "required": ["totalBooks", "availableBooks", "borrowedBooks", "totalCopies"]
                    }
                }
            }
        }))
    }
}

async fn catalog_stats(State(state): State<CatalogState>) -> Json<CatalogStats> {
    Json(state.read().await.stats())
}

/// Create the stats module over `state`
pub fn create_module(state: CatalogState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(StatsModule::new(state))
}
