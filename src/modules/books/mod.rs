pub mod routes;
pub mod seed;
pub mod store;

use anyhow::Context;
use async_trait::async_trait;
use axum::{routing::get, Router};
use catalog_kernel::{InitCtx, Module};
use serde_json::json;

use store::CatalogState;

/// Book CRUD endpoints over the shared catalog store
pub struct BooksModule {
    state: CatalogState,
}

impl BooksModule {
    pub const fn new(state: CatalogState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let mut store = self.state.write().await;
        if ctx.settings.catalog.seed_sample_data && store.is_empty() {
            let books = seed::sample_books().context("failed to parse sample books")?;
            *store = store::CatalogStore::with_books(books);
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = store.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::list_books).post(routes::create_book))
            .route(
                "/{id}",
                get(routes::get_book)
                    .put(routes::update_book)
                    .delete(routes::delete_book),
            )
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error_response = json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        });
        let book_response = json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        });
        let patch_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookPatch" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books in insertion order",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": patch_body,
                        "responses": {
                            "201": { "description": "Created book", "content": book_response },
                            "400": { "description": "Body is not a JSON object", "content": error_response }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": { "description": "Book", "content": book_response },
                            "404": { "description": "Book not found", "content": error_response }
                        }
                    },
                    "put": {
                        "summary": "Merge fields into a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "requestBody": patch_body,
                        "responses": {
                            "200": { "description": "Updated book", "content": book_response },
                            "400": { "description": "Body is not a JSON object", "content": error_response },
                            "404": { "description": "Book not found", "content": error_response }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": {
                                "description": "Deleted book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/DeletedBook" }
                                    }
                                }
                            },
                            "404": { "description": "Book not found", "content": error_response }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "description": "Assigned by the store" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "category": { "type": "string" },
                            "status": {
                                "type": "string",
                                "description": "Available or Borrowed; other values are kept as sent"
                            },
                            "copies": { "description": "Copy count, 1 when omitted" },
                            "isbn": { "type": "string" },
                            "pages": { "type": "integer" },
                            "publicationDate": { "type": "string", "format": "date" }
                        },
                        "additionalProperties": true,
                        "required": ["id", "status", "copies", "publicationDate"]
                    },
                    "BookPatch": {
                        "type": "object",
                        "description": "Typed fields also accept other JSON values, stored as sent",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "category": { "type": "string" },
                            "status": { "type": "string" },
                            "copies": {},
                            "isbn": { "type": "string" },
                            "pages": { "type": "integer" },
                            "publicationDate": { "type": "string", "format": "date" }
                        },
                        "additionalProperties": true
                    },
                    "DeletedBook": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" },
                            "book": { "$ref": "#/components/schemas/Book" }
                        },
                        "required": ["message", "book"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let remaining = self.state.read().await.len();
        tracing::info!(module = self.name(), remaining, "books module stopped");
        Ok(())
    }
}

/// Create the books module over `state`
pub fn create_module(state: CatalogState) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(state))
}
