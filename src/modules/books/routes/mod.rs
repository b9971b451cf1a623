//! HTTP handlers for `/api/books`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use catalog_http::error::AppError;

use catalog_model::{Book, BookId, BookPatch, DeletedBook};
use super::store::{CatalogError, CatalogState};

pub const NOT_FOUND_MESSAGE: &str = "Book not found";
pub const DELETED_MESSAGE: &str = "Book deleted successfully";

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => {
                tracing::debug!(book_id = id, "book lookup missed");
                AppError::not_found(NOT_FOUND_MESSAGE)
            }
        }
    }
}

/// Identifiers that are not integers cannot match any record.
fn parse_id(raw: &str) -> Result<BookId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(NOT_FOUND_MESSAGE))
}

pub async fn list_books(State(state): State<CatalogState>) -> Json<Vec<Book>> {
    let store = state.read().await;
    tracing::debug!(count = store.len(), "listing books");
    Json(store.list().to_vec())
}

pub async fn get_book(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id)?;
    let store = state.read().await;
    Ok(Json(store.get(id)?.clone()))
}

pub async fn create_book(
    State(state): State<CatalogState>,
    payload: Result<Json<BookPatch>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(patch) = payload?;
    let book = state.write().await.create(patch);
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPatch>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let book = state.write().await.update(id, patch)?;
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedBook>, AppError> {
    let id = parse_id(&id)?;
    let book = state.write().await.delete(id)?;
    Ok(Json(DeletedBook {
        message: DELETED_MESSAGE.to_string(),
        book,
    }))
}
