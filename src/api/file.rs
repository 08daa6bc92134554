use axum::{
    extract::{Multipart, Path, Request, State, multipart::Field},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::services::ServeFile;

use super::negotiate::{Accepts, Negotiated};
use super::{ApiError, AppState};
use crate::constants::routes;
use crate::models::UploadFileResponseVo;
use crate::services::FileStorageError;

impl From<FileStorageError> for ApiError {
    fn from(err: FileStorageError) -> Self {
        match err {
            FileStorageError::InvalidName(_) => Self::validation(err.to_string()),
            FileStorageError::NotFound(_) => Self::NotFound(err.to_string()),
            FileStorageError::Init(_) | FileStorageError::Io { .. } => {
                Self::internal(err.to_string())
            }
        }
    }
}

async fn store_field(
    state: &AppState,
    field: Field<'_>,
) -> Result<UploadFileResponseVo, ApiError> {
    let original_name = field.file_name().unwrap_or_default().to_string();
    let declared_type = field.content_type().map(str::to_string);

    let content = field
        .bytes()
        .await
        .map_err(|e| ApiError::validation(format!("Failed to read upload: {e}")))?;

    let file_name = state
        .shared
        .file_storage
        .store(&original_name, &content)
        .await?;

    let file_type = declared_type.unwrap_or_else(|| {
        mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string()
    });

    let file_download_uri = state
        .shared
        .links
        .to(&format!(
            "{}/{}/{}",
            routes::FILE,
            routes::DOWNLOAD_FILE,
            urlencoding::encode(&file_name)
        ))
        .href;

    tracing::info!(file = %file_name, bytes = content.len(), "File uploaded");

    Ok(UploadFileResponseVo {
        file_name,
        file_download_uri,
        file_type,
        size: content.len() as u64,
    })
}

/// POST /api/file/v1/uploadFile
/// Multipart form with a single `file` field
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    mut multipart: Multipart,
) -> Result<Negotiated<UploadFileResponseVo>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.body_text()))?
    {
        if field.name() == Some("file") {
            let uploaded = store_field(&state, field).await?;
            return Ok(Negotiated::ok(media_type, uploaded));
        }
    }

    Err(ApiError::validation("Missing multipart field 'file'"))
}

/// POST /api/file/v1/uploadMultipleFiles
/// Multipart form with one or more `files` fields
pub async fn upload_multiple_files(
    State(state): State<Arc<AppState>>,
    Accepts(media_type): Accepts,
    mut multipart: Multipart,
) -> Result<Negotiated<Vec<UploadFileResponseVo>>, ApiError> {
    let mut uploaded = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.body_text()))?
    {
        if field.name() == Some("files") {
            uploaded.push(store_field(&state, field).await?);
        }
    }

    Ok(Negotiated::ok(media_type, uploaded))
}

/// GET /api/file/v1/downloadFile/{filename}
/// Streams the stored file as an attachment
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let path = state.shared.file_storage.load(&filename).await?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    let display_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(&filename)
        .replace('"', "");
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{display_name}\""))
        .map_err(|e| ApiError::internal(format!("Invalid file name header: {e}")))?;

    let mut response = ServeFile::new_with_mime(&path, &mime)
        .try_call(request)
        .await
        .map_err(|e| ApiError::internal(format!("Streaming error: {e}")))?
        .into_response();

    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, disposition);

    Ok(response)
}
