use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::negotiate::{Accepts, Negotiated, Payload};
use super::validation::{validate_id, validate_page, validate_search_query};
use super::{ApiError, AppState, PageParams};
use crate::models::{PagedModel, PersonVo};
use crate::services::PersonError;

impl From<PersonError> for ApiError {
    fn from(err: PersonError) -> Self {
        match err {
            PersonError::RequiredObjectIsNull => Self::validation(err.to_string()),
            PersonError::NotFound(_) => Self::no_records(),
            PersonError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

/// GET /api/person/v1?page=&size=&direction=
pub async fn find_all(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Query(params): Query<PageParams>,
) -> Result<Negotiated<PagedModel<PersonVo>>, ApiError> {
    let request = validate_page(&params)?;
    let page = state.shared.person_service.find_all(request).await?;
    Ok(Negotiated::ok(media_type, page))
}

/// GET /api/person/v1/findPersonByName/{firstName}
pub async fn find_by_name(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Path(first_name): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Negotiated<PagedModel<PersonVo>>, ApiError> {
    let first_name = validate_search_query(&first_name)?;
    let request = validate_page(&params)?;

    let page = state
        .shared
        .person_service
        .find_by_name(first_name, request)
        .await?;
    Ok(Negotiated::ok(media_type, page))
}

/// GET /api/person/v1/{id}
pub async fn find_by_id(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Path(id): Path<i64>,
) -> Result<Negotiated<PersonVo>, ApiError> {
    let id = validate_id(id)?;
    let person = state.shared.person_service.find_by_id(id).await?;
    Ok(Negotiated::ok(media_type, person))
}

/// POST /api/person/v1
pub async fn create(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Payload(person): Payload<PersonVo>,
) -> Result<Negotiated<PersonVo>, ApiError> {
    let person = state.shared.person_service.create(person).await?;
    Ok(Negotiated::ok(media_type, person))
}

/// PUT /api/person/v1
pub async fn update(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Payload(person): Payload<PersonVo>,
) -> Result<Negotiated<PersonVo>, ApiError> {
    let person = state.shared.person_service.update(person).await?;
    Ok(Negotiated::ok(media_type, person))
}

/// PATCH /api/person/v1/{id}
/// Disables the person without deleting it
pub async fn disable(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    Path(id): Path<i64>,
) -> Result<Negotiated<PersonVo>, ApiError> {
    let id = validate_id(id)?;
    let person = state.shared.person_service.disable(id).await?;
    Ok(Negotiated::ok(media_type, person))
}

/// DELETE /api/person/v1/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id(id)?;
    state.shared.person_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
