pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use libris_kernel::{settings::CatalogSettings, InitCtx, Module};

use store::Catalog;

/// Books module: the in-memory catalog and its HTTP surface
pub struct BooksModule {
    catalog: Arc<Catalog>,
}

impl BooksModule {
    pub fn new(settings: &CatalogSettings) -> Self {
        let catalog = if settings.seed_starter_books {
            Catalog::with_starter_books()
        } else {
            Catalog::new()
        };
        Self::with_catalog(Arc::new(catalog))
    }

    /// Wrap an existing catalog, e.g. one shared with a test.
    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = self.catalog.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.catalog))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            books = self.catalog.len(),
            "books module stopped"
        );
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn envelope_response(description: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "data": data
                    },
                    "required": ["message"]
                }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let book = serde_json::json!({ "$ref": "#/components/schemas/Book" });
    let books = serde_json::json!({ "type": "array", "items": book.clone() });
    let message_only = serde_json::json!({ "type": "null" });
    let id_param = serde_json::json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Book identifier",
        "schema": { "type": "string" }
    });
    let filter_param = |name: &str| {
        serde_json::json!({
            "name": name,
            "in": "query",
            "required": false,
            "description": format!("Case-insensitive substring match on {}", name),
            "schema": { "type": "string" }
        })
    };

    serde_json::json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "parameters": [filter_param("title"), filter_param("author"), filter_param("genre")],
                    "responses": {
                        "200": envelope_response("Books retrieved", books.clone()),
                        "500": error_response("Internal server error")
                    }
                },
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/NewBook" }
                            }
                        }
                    },
                    "responses": {
                        "201": envelope_response("Book added", book.clone()),
                        "400": error_response("Missing or empty title, author, or genre")
                    }
                }
            },
            "/recommendations": {
                "get": {
                    "summary": "Recommended books",
                    "tags": ["Books"],
                    "responses": {
                        "200": envelope_response("Recommendations retrieved", books)
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "text/plain": {
                                    "schema": { "type": "string" }
                                }
                            }
                        }
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": envelope_response("Book retrieved", book.clone()),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Update title, author, or genre",
                    "tags": ["Books"],
                    "parameters": [id_param.clone()],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/BookPatch" }
                            }
                        }
                    },
                    "responses": {
                        "200": envelope_response("Book updated", book.clone()),
                        "400": error_response("Blank field or malformed body"),
                        "404": error_response("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": envelope_response("Book deleted", message_only.clone()),
                        "404": error_response("Book not found")
                    }
                }
            },
            "/{id}/borrow": {
                "post": {
                    "summary": "Borrow a book for 14 days",
                    "tags": ["Books"],
                    "parameters": [id_param.clone()],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/BorrowRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": envelope_response("Book borrowed", book),
                        "400": error_response("Missing borrowerId or book already borrowed"),
                        "404": error_response("Book not found")
                    }
                }
            },
            "/{id}/return": {
                "post": {
                    "summary": "Return a borrowed book",
                    "tags": ["Books"],
                    "parameters": [id_param],
                    "responses": {
                        "200": envelope_response("Book returned", message_only),
                        "404": error_response("Book not found or not currently borrowed")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Unique identifier for the book" },
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "genre": { "type": "string" },
                        "isBorrowed": { "type": "boolean" },
                        "borrowerId": { "type": "string", "description": "Present while borrowed" },
                        "dueDate": { "type": "string", "format": "date-time", "description": "Present while borrowed" }
                    },
                    "required": ["id", "title", "author", "genre", "isBorrowed"]
                },
                "NewBook": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "genre": { "type": "string" }
                    },
                    "required": ["title", "author", "genre"]
                },
                "BookPatch": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "genre": { "type": "string" }
                    }
                },
                "BorrowRequest": {
                    "type": "object",
                    "properties": {
                        "borrowerId": { "type": "string" }
                    },
                    "required": ["borrowerId"]
                }
            }
        }
    })
}

/// Create a new instance of the books module
pub fn create_module(settings: &CatalogSettings) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(settings))
}
