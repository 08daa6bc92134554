use super::{ApiError, PageParams};
use crate::constants::paging;
use crate::domain::PageRequest;

pub fn validate_id(id: i64) -> Result<i64, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_page(params: &PageParams) -> Result<PageRequest, ApiError> {
    const MIN_SIZE: u64 = 1;

    if !(MIN_SIZE..=paging::MAX_SIZE).contains(&params.size) {
        return Err(ApiError::validation(format!(
            "Invalid size: {}. Size must be between {} and {}",
            params.size,
            MIN_SIZE,
            paging::MAX_SIZE
        )));
    }

    // SQLite binds the row offset as a signed 64-bit integer
    let in_range = params
        .page
        .checked_mul(params.size)
        .is_some_and(|offset| i64::try_from(offset).is_ok());
    if !in_range {
        return Err(ApiError::validation(format!(
            "Invalid page: {}. Page is out of range for size {}",
            params.page, params.size
        )));
    }
    Ok(params.to_request())
}

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }
    Ok(trimmed)
}
