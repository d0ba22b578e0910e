// src/handlers/export.rs
use log::{error, info};
use warp::http::header::{HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use warp::hyper::Body;
use warp::reply::Response;
use warp::Rejection;

use super::error::ApiError;
use crate::models::AnalysisResult;
use crate::services::export;

fn download_response(
    bytes: Vec<u8>,
    content_type: &'static str,
    filename: &str,
) -> Result<Response, ApiError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let mut response = Response::new(Body::from(bytes));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response.headers_mut().insert(CONTENT_DISPOSITION, disposition);
    Ok(response)
}

/// Serializes a previously returned result as a JSON download.
pub async fn export_json(result: AnalysisResult) -> Result<Response, Rejection> {
    info!("Handling JSON export for package '{}'", result.package_id);
    let bytes = export::to_json(&result).map_err(|e| {
        error!("JSON export failed: {}", e);
        warp::reject::custom(ApiError::internal(e.to_string()))
    })?;
    let filename = format!("{}.json", export::file_stem(&result));
    download_response(bytes, "application/json", &filename).map_err(warp::reject::custom)
}

/// Serializes a previously returned result as a flat CSV download.
pub async fn export_csv(result: AnalysisResult) -> Result<Response, Rejection> {
    info!("Handling CSV export for package '{}'", result.package_id);
    let bytes = export::to_csv(&result).map_err(|e| {
        error!("CSV export failed: {}", e);
        warp::reject::custom(ApiError::internal(e.to_string()))
    })?;
    let filename = format!("{}.csv", export::file_stem(&result));
    download_response(bytes, "text/csv", &filename).map_err(warp::reject::custom)
}
