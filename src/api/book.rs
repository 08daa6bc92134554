use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::negotiate::{Accepts, Negotiated, Payload};
use super::validation::{validate_id, validate_page};
use super::{ApiError, AppState, PageParams};
use crate::models::{BookVo, PagedModel};
use crate::services::BookError;

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::RequiredObjectIsNull => Self::validation(err.to_string()),
            BookError::NotFound(_) => Self::no_records(),
            BookError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

/// GET /api/book/v1?page=&size=&direction=
pub async fn find_all(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Query(params): Query<PageParams>,
) -> Result<Negotiated<PagedModel<BookVo>>, ApiError> {
    let request = validate_page(&params)?;
    let page = state.shared.book_service.find_all(request).await?;
    Ok(Negotiated::ok(media_type, page))
}

/// GET /api/book/v1/{id}
pub async fn find_by_id(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Path(id): Path<i64>,
) -> Result<Negotiated<BookVo>, ApiError> {
    let id = validate_id(id)?;
    let book = state.shared.book_service.find_by_id(id).await?;
    Ok(Negotiated::ok(media_type, book))
}

/// POST /api/book/v1
pub async fn create(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Payload(book): Payload<BookVo>,
) -> Result<Negotiated<BookVo>, ApiError> {
    let book = state.shared.book_service.create(book).await?;
    Ok(Negotiated::ok(media_type, book))
}

/// PUT /api/book/v1
pub async fn update(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Payload(book): Payload<BookVo>,
) -> Result<Negotiated<BookVo>, ApiError> {
    let book = state.shared.book_service.update(book).await?;
    Ok(Negotiated::ok(media_type, book))
}

/// DELETE /api/book/v1/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id(id)?;
    state.shared.book_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
