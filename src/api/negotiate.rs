//! Content negotiation between JSON, XML and YAML.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};

use super::ApiError;
use crate::constants::media;
use crate::models::XmlRoot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    #[default]
    Json,
    Xml,
    Yaml,
}

impl MediaType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => media::APPLICATION_JSON,
            Self::Xml => media::APPLICATION_XML,
            Self::Yaml => media::APPLICATION_YAML,
        }
    }

    /// Maps a bare `type/subtype` (no parameters) onto a supported type.
    fn from_essence(essence: &str) -> Option<Self> {
        match essence.to_ascii_lowercase().as_str() {
            "application/json" | "application/*" | "*/*" | "*" => Some(Self::Json),
            "application/xml" | "text/xml" => Some(Self::Xml),
            "application/x-yaml" | "application/yaml" | "text/yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Picks the best supported type from an `Accept` header, honouring
    /// q-values. No header means JSON.
    pub fn from_accept(accept: Option<&str>) -> Result<Self, ApiError> {
        let Some(accept) = accept.map(str::trim).filter(|a| !a.is_empty()) else {
            return Ok(Self::Json);
        };

        let mut candidates: Vec<(f32, usize, Self)> = accept
            .split(',')
            .enumerate()
            .filter_map(|(position, entry)| {
                let mut parts = entry.split(';');
                let media_type = Self::from_essence(parts.next()?.trim())?;
                let quality = parts
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (quality > 0.0).then_some((quality, position, media_type))
            })
            .collect();

        candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

        candidates
            .first()
            .map(|(_, _, media_type)| *media_type)
            .ok_or_else(|| {
                ApiError::NotAcceptable(format!("None of [{accept}] can be produced"))
            })
    }

    /// Reads the request body type. A missing header means JSON.
    pub fn from_content_type(content_type: Option<&str>) -> Result<Self, ApiError> {
        let Some(content_type) = content_type.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(Self::Json);
        };

        let essence = content_type.split(';').next().unwrap_or_default().trim();
        match Self::from_essence(essence) {
            Some(media_type) if !essence.contains('*') => Ok(media_type),
            _ => Err(ApiError::UnsupportedMediaType(format!(
                "Content type '{content_type}' not supported"
            ))),
        }
    }

    fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn render<T: Serialize + XmlRoot>(&self, value: &T) -> Result<String, ApiError> {
        match self {
            Self::Json => serde_json::to_string(value).map_err(|e| ApiError::internal(e.to_string())),
            Self::Xml => quick_xml::se::to_string_with_root(T::XML_ROOT, value)
                .map_err(|e| ApiError::internal(e.to_string())),
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| ApiError::internal(e.to_string())),
        }
    }

    /// Parses a request body. Empty bodies and explicit nulls give `None`.
    pub fn parse<T: DeserializeOwned>(&self, body: &[u8]) -> Result<Option<T>, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let invalid = |e: String| ApiError::validation(format!("Malformed request body: {e}"));

        match self {
            Self::Json => serde_json::from_slice::<Option<T>>(body).map_err(|e| invalid(e.to_string())),
            Self::Xml => {
                let text = std::str::from_utf8(body).map_err(|e| invalid(e.to_string()))?;
                quick_xml::de::from_str::<T>(text)
                    .map(Some)
                    .map_err(|e| invalid(e.to_string()))
            }
            Self::Yaml => serde_yaml::from_slice::<Option<T>>(body).map_err(|e| invalid(e.to_string())),
        }
    }
}

/// Response type chosen from the `Accept` header.
#[derive(Debug, Clone, Copy)]
pub struct Accepts(pub MediaType);

impl<S: Send + Sync> FromRequestParts<S> for Accepts {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        MediaType::from_accept(MediaType::header_value(&parts.headers, header::ACCEPT)).map(Self)
    }
}

/// Request body decoded according to `Content-Type`; `None` for an absent object.
#[derive(Debug)]
pub struct Payload<T>(pub Option<T>);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let media_type =
            MediaType::from_content_type(MediaType::header_value(req.headers(), header::CONTENT_TYPE))?;

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;

        media_type.parse(&body).map(Self)
    }
}

/// Serializes `T` in the negotiated media type.
pub struct Negotiated<T> {
    pub media_type: MediaType,
    pub status: StatusCode,
    pub value: T,
}

impl<T> Negotiated<T> {
    pub const fn ok(media_type: MediaType, value: T) -> Self {
        Self {
            media_type,
            status: StatusCode::OK,
            value,
        }
    }
}

impl<T: Serialize + XmlRoot> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match self.media_type.render(&self.value) {
            Ok(body) => (
                self.status,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(self.media_type.as_str()),
                )],
                body,
            )
                .into_response(),
            Err(err) => err.into_response(),
        }
    }
}
