//! HTTP handlers for the Books module.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use libris_http::{ApiResponse, AppError, AppResult};
use serde_json::json;

use super::models::{Book, BookFilter, BookPatch, BorrowRequest, NewBook};
use super::store::{Catalog, CatalogError};
use crate::utils;

type CatalogState = State<Arc<Catalog>>;

const MISSING_BORROWER_ID: &str =
    "borrowerId is required in request body and must be a non-empty string";

/// Router for the Books module, relative to its mount point.
pub fn router(catalog: Arc<Catalog>) -> Router {
    let prefix = utils::log_prefix("books");
    tracing::debug!(target: "libris.routes", %prefix, "building books routes");

    Router::new()
        .route("/", get(list_books).post(add_book))
        .route("/health", get(health_check))
        .route("/recommendations", get(recommendations))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .route("/{id}/borrow", post(borrow_book))
        .route("/{id}/return", post(return_book))
        .with_state(catalog)
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::Validation { field } => AppError::validation(
                vec![json!({ "field": field, "error": "required" })],
                err.to_string(),
            ),
            CatalogError::NotFound { .. } => AppError::not_found("Book not found"),
            CatalogError::AlreadyBorrowed { .. } => {
                AppError::bad_request("Book is already borrowed")
            }
            CatalogError::NotBorrowed { .. } => {
                AppError::not_found("Book not found or not currently borrowed")
            }
        }
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(
    State(catalog): CatalogState,
    Query(filter): Query<BookFilter>,
) -> ApiResponse<Vec<Book>> {
    let books = catalog.list(&filter);
    tracing::debug!(
        count = books.len(),
        filtered = !filter.is_empty(),
        "listing books"
    );
    ApiResponse::ok("Books retrieved", books)
}

async fn get_book(
    State(catalog): CatalogState,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Book>> {
    let book = catalog
        .get(&id)
        .ok_or_else(|| AppError::not_found("Book not found"))?;
    Ok(ApiResponse::ok("Book retrieved", book))
}

async fn add_book(
    State(catalog): CatalogState,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> AppResult<ApiResponse<Book>> {
    let Json(new_book) = payload?;
    let book = catalog.add(new_book)?;
    tracing::info!(book_id = %book.id, "book added");
    Ok(ApiResponse::created("Book added", book))
}

async fn update_book(
    State(catalog): CatalogState,
    Path(id): Path<String>,
    payload: Result<Json<BookPatch>, JsonRejection>,
) -> AppResult<ApiResponse<Book>> {
    let Json(patch) = payload?;
    let book = catalog.update(&id, patch)?;
    Ok(ApiResponse::ok("Book updated", book))
}

async fn delete_book(
    State(catalog): CatalogState,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    if !catalog.delete(&id) {
        return Err(AppError::not_found("Book not found"));
    }
    tracing::info!(book_id = %id, "book deleted");
    Ok(ApiResponse::message_only("Book deleted"))
}

async fn borrow_book(
    State(catalog): CatalogState,
    Path(id): Path<String>,
    payload: Result<Json<BorrowRequest>, JsonRejection>,
) -> AppResult<ApiResponse<Book>> {
    if id.trim().is_empty() {
        return Err(AppError::bad_request(
            "Book ID parameter is required and cannot be empty",
        ));
    }

    let borrower_id = payload
        .ok()
        .and_then(|Json(request)| request.borrower_id)
        .ok_or_else(|| AppError::bad_request(MISSING_BORROWER_ID))?;
    let borrower_id = borrower_id.trim();
    if borrower_id.is_empty() {
        return Err(AppError::bad_request(
            "borrowerId cannot be empty or whitespace only",
        ));
    }

    let book = catalog.borrow(&id, borrower_id)?;
    Ok(ApiResponse::ok("Book borrowed", book))
}

async fn return_book(
    State(catalog): CatalogState,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    catalog.return_book(&id)?;
    Ok(ApiResponse::message_only("Book returned"))
}

async fn recommendations(State(catalog): CatalogState) -> ApiResponse<Vec<Book>> {
    ApiResponse::ok("Recommendations retrieved", catalog.recommend())
}
