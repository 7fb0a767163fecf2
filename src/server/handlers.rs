use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, Response},
};
use rust_embed::RustEmbed;
use tracing::{debug, error, info, warn};

use crate::constants::{REPORT_CONTENT_TYPE, REPORT_FILE_NAME};
use crate::geocoding::{GoogleGeocoder, ReverseGeocoder};
use crate::processing::{process_batch, StagedPhoto};
use crate::record::summarize;
use crate::report::{self, ReportOptions};

use super::state::AppState;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

pub const PHOTOS_FIELD: &str = "photos";
pub const API_KEY_FIELD: &str = "api_key";

pub async fn index_html() -> Result<Html<Vec<u8>>, StatusCode> {
    let page = Asset::get("index.html").ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(page.data.into_owned()))
}

/// Accepts the multipart upload form, geocodes every photo and answers with
/// the spreadsheet as an attachment.
///
/// Files are staged in a directory private to this request, removed when the
/// handler returns whatever the outcome.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, StatusCode> {
    let settings = &state.settings;

    let staging = tempfile::Builder::new()
        .prefix("upload-")
        .tempdir_in(&settings.upload_dir)
        .map_err(|e| {
            error!(dir = %settings.upload_dir.display(), error = %e, "Failed to create staging directory");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let mut photos: Vec<StagedPhoto> = Vec::new();
    let mut form_api_key: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(error = %e, "Malformed multipart body");
        StatusCode::BAD_REQUEST
    })? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(PHOTOS_FIELD) => {
                let original = field.file_name().map(str::to_owned).unwrap_or_default();
                let data = field.bytes().await.map_err(|e| {
                    warn!(error = %e, "Failed to read uploaded file");
                    StatusCode::BAD_REQUEST
                })?;
                // Browsers send an empty part when no file was picked
                if original.is_empty() && data.is_empty() {
                    continue;
                }

                let index = photos.len();
                let filename = sanitize_filename(&original, index);
                let path = staging.path().join(staged_name(index, &filename));
                tokio::fs::write(&path, &data).await.map_err(|e| {
                    error!(file = %filename, error = %e, "Failed to stage upload");
                    StatusCode::INTERNAL_SERVER_ERROR
                })?;
                debug!(file = %filename, bytes = data.len(), "Staged upload");
                photos.push(StagedPhoto { path, filename });
            }
            Some(API_KEY_FIELD) => {
                let text = field.text().await.map_err(|e| {
                    warn!(error = %e, "Failed to read api_key field");
                    StatusCode::BAD_REQUEST
                })?;
                form_api_key = Some(text);
            }
            other => debug!(field = ?other, "Ignoring form field"),
        }
    }

    let api_key = form_api_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .or_else(|| settings.api_key.clone())
        .ok_or_else(|| {
            warn!("Upload rejected: no api_key in form and none configured");
            StatusCode::BAD_REQUEST
        })?;

    info!(photos = photos.len(), "Processing upload");
    let geocoder = GoogleGeocoder::new(
        state.http_client.clone(),
        settings.geocode_endpoint.clone(),
        api_key,
    );
    let records = process_batch(&photos, Some(&geocoder as &dyn ReverseGeocoder)).await;
    let summary = summarize(&records);

    let options = ReportOptions { thumbnail_size: settings.thumbnail_size };
    let workbook = tokio::task::spawn_blocking(move || report::assemble(&records, &options))
        .await
        .map_err(|e| {
            error!(error = %e, "Report task panicked");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!(error = %e, "Failed to build report");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    // Staged files are no longer needed once the workbook holds the thumbnails
    drop(staging);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, REPORT_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", REPORT_FILE_NAME),
        )
        .header("x-photos-total", summary.total.to_string())
        .header("x-photos-located", summary.located.to_string())
        .header("x-photos-failed", summary.failed.to_string())
        .body(Body::from(workbook))
        .map_err(|e| {
            error!(error = %e, "Failed to build response");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Keeps only the last path component of a client-supplied filename.
fn sanitize_filename(original: &str, index: usize) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        format!("photo_{}", index + 1)
    } else {
        cleaned
    }
}

/// Name of the staged copy. Report links are URLs, so `#` and `%` are kept
/// out of the path; the display name keeps them.
fn staged_name(index: usize, filename: &str) -> String {
    format!("{:04}_{}", index, filename.replace(['#', '%'], "_"))
}
