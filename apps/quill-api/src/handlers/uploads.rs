//! Media upload handler.
//!
//! Uploads are their own step: the client stores a file, gets back a stable
//! filename, and references it from a post. The store only returns a
//! filename once the bytes are durably written.

use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::StreamExt;

use quill_core::ports::MediaStore;
use quill_shared::ApiResponse;
use quill_shared::dto::UploadResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};

/// Uploads above this size are rejected outright.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// POST /api/uploads
pub async fn upload(
    media: web::Data<Arc<dyn MediaStore>>,
    _identity: Identity,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?;

        let Some(filename) = field.content_disposition().get_filename().map(str::to_string)
        else {
            // Not a file part; skip form fields.
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::BadRequest(format!("Upload interrupted: {e}")))?;
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::BadRequest("File too large".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }

        let stored = media.store(&filename, bytes).await?;
        return Ok(HttpResponse::Created().json(ApiResponse::ok(UploadResponse {
            filename: stored,
        })));
    }

    Err(AppError::BadRequest("No file in upload".to_string()))
}
