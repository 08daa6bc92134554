use axum::{Json, extract::Path};

use super::ApiError;
use crate::services::MathError;
use crate::services::math::{self, parse_number};

impl From<MathError> for ApiError {
    fn from(err: MathError) -> Self {
        Self::validation(err.to_string())
    }
}

/// GET /sum/{numberOne}/{numberTwo}
pub async fn sum(Path((a, b)): Path<(String, String)>) -> Result<Json<f64>, ApiError> {
    Ok(Json(math::sum(parse_number(&a)?, parse_number(&b)?)))
}

/// GET /subtraction/{numberOne}/{numberTwo}
pub async fn subtraction(Path((a, b)): Path<(String, String)>) -> Result<Json<f64>, ApiError> {
    Ok(Json(math::subtraction(parse_number(&a)?, parse_number(&b)?)))
}

/// GET /multiplication/{numberOne}/{numberTwo}
pub async fn multiplication(
    Path((a, b)): Path<(String, String)>,
) -> Result<Json<f64>, ApiError> {
    Ok(Json(math::multiplication(parse_number(&a)?, parse_number(&b)?)))
}

/// GET /division/{numberOne}/{numberTwo}
pub async fn division(Path((a, b)): Path<(String, String)>) -> Result<Json<f64>, ApiError> {
    Ok(Json(math::division(parse_number(&a)?, parse_number(&b)?)?))
}

/// GET /average/{numberOne}/{numberTwo}
pub async fn average(Path((a, b)): Path<(String, String)>) -> Result<Json<f64>, ApiError> {
    Ok(Json(math::mean(parse_number(&a)?, parse_number(&b)?)))
}

/// GET /sqrt/{number}
pub async fn sqrt(Path(a): Path<String>) -> Result<Json<f64>, ApiError> {
    Ok(Json(math::square_root(parse_number(&a)?)?))
}
