//! HTTP handlers
//!
//! Upload runs the whole pipeline for one document: persist the file,
//! decode, extract, assemble, summarize, write the CSV and XLSX
//! artifacts, and return the first 100 rows with the insight report.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{error, info};

use pdfsift_core::{assemble, export, summarize, Dataset, DocumentExtractor, InsightReport};
use pdfsift_utils::{
    sanitize_filename, validate_file_size, validate_file_type, AppConfig, ErrorResponse,
    PdfsiftError, PdfsiftResult,
};

use crate::pdf_decoder::PdfDecoder;

/// Rows of the dataset included inline in the upload response.
const PREVIEW_ROWS: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub decoder: Arc<dyn PdfDecoder>,
    pub config: AppConfig,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(error: PdfsiftError) -> ApiError {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(error)))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pdfsift-extraction-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Upload response payload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub csv_file: String,
    pub xlsx_file: String,
    pub insights: InsightReport,
    pub data: Vec<serde_json::Value>,
    pub columns: Vec<String>,
    pub total_rows: usize,
}

/// Upload a PDF and extract its data.
///
/// POST /api/upload
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(PdfsiftError::validation("file", e.to_string())))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| api_error(PdfsiftError::validation("file", e.to_string())))?;
        file = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) =
        file.ok_or_else(|| api_error(PdfsiftError::validation("file", "No file part")))?;
    if filename.is_empty() {
        return Err(api_error(PdfsiftError::validation("file", "No selected file")));
    }
    validate_file_type(&filename, &["pdf"]).map_err(api_error)?;
    validate_file_size(data.len() as u64, state.config.server.max_upload_bytes as u64)
        .map_err(api_error)?;

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let stored_name = format!("{}_{}", timestamp, sanitize_filename(&filename));
    let upload_path = state.config.storage.upload_dir.join(&stored_name);
    tokio::fs::write(&upload_path, &data)
        .await
        .map_err(|e| api_error(PdfsiftError::storage(e.to_string())))?;
    info!(file = %stored_name, bytes = data.len(), "stored upload");

    // The pipeline is blocking CPU work; keep it off the runtime workers.
    let decoder = state.decoder.clone();
    let (dataset, insights, csv_bytes, xlsx_bytes) = tokio::task::spawn_blocking(move || {
        run_pipeline(decoder.as_ref(), &data)
    })
    .await
    .map_err(|e| api_error(PdfsiftError::internal(e.to_string())))?
    .map_err(|e| {
        error!(error = %e, file = %stored_name, "extraction failed");
        api_error(e)
    })?;

    let csv_file = format!("{}_output.csv", timestamp);
    let xlsx_file = format!("{}_output.xlsx", timestamp);
    tokio::fs::write(state.config.storage.output_dir.join(&csv_file), &csv_bytes)
        .await
        .map_err(|e| api_error(PdfsiftError::storage(e.to_string())))?;
    tokio::fs::write(state.config.storage.output_dir.join(&xlsx_file), &xlsx_bytes)
        .await
        .map_err(|e| api_error(PdfsiftError::storage(e.to_string())))?;

    info!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "extraction complete"
    );

    Ok(Json(UploadResponse {
        success: true,
        csv_file,
        xlsx_file,
        data: dataset.head(PREVIEW_ROWS),
        columns: dataset.column_names(),
        total_rows: dataset.row_count(),
        insights,
    }))
}

/// Decode → extract → assemble → summarize → render artifacts.
fn run_pipeline(
    decoder: &dyn PdfDecoder,
    data: &[u8],
) -> PdfsiftResult<(Dataset, InsightReport, Vec<u8>, Vec<u8>)> {
    let pages = decoder.decode(data)?;

    let (tables, key_values) = DocumentExtractor::new().extract_all(&pages);
    let dataset = assemble(tables, key_values);
    let insights = summarize(&dataset);

    let csv_bytes =
        export::to_csv(&dataset).map_err(|e| PdfsiftError::internal(e.to_string()))?;
    let xlsx_bytes =
        export::to_xlsx(&dataset).map_err(|e| PdfsiftError::internal(e.to_string()))?;

    Ok((dataset, insights, csv_bytes, xlsx_bytes))
}

/// Download a generated artifact as an attachment.
///
/// GET /api/download/:filename
pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    // Artifact names are single path components; anything else is a
    // traversal attempt.
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(api_error(PdfsiftError::not_found(filename)));
    }

    let path = state.config.storage.output_dir.join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| api_error(PdfsiftError::not_found(filename.clone())))?;

    let content_type = match std::path::Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some("csv") => "text/csv",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}
