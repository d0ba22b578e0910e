// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::info;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::analyze::analyze;
use crate::handlers::error::{ApiError, ApiErrorKind};
use crate::handlers::export::{export_csv, export_json};
use crate::handlers::packages::{get_package, list_packages, list_packages_for_type};
use crate::services::sanity::SanityThresholds;

// Request bodies are small form payloads; anything bigger is not ours.
const MAX_BODY_BYTES: u64 = 64 * 1024;

// Translate our custom rejections into JSON error replies.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = match api_error.kind {
            ApiErrorKind::NotFound => warp::http::StatusCode::NOT_FOUND,
            ApiErrorKind::BadRequest => warp::http::StatusCode::BAD_REQUEST,
            ApiErrorKind::Internal => warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        message = api_error.message.clone();
    } else if let Some(body_error) = err.find::<warp::filters::body::BodyDeserializeError>() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = body_error.to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    thresholds: Arc<SanityThresholds>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let thresholds_filter = warp::any().map(move || thresholds.clone());

    let list_packages_route = warp::path!("api" / "v1" / "packages")
        .and(warp::get())
        .and_then(list_packages);

    let packages_for_type_route = warp::path!("api" / "v1" / "packages" / String)
        .and(warp::get())
        .and_then(list_packages_for_type);

    let package_route = warp::path!("api" / "v1" / "packages" / String / String)
        .and(warp::get())
        .and_then(get_package);

    let analyze_route = warp::path!("api" / "v1" / "analyze")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(thresholds_filter.clone())
        .and_then(analyze);

    let export_json_route = warp::path!("api" / "v1" / "export" / "json")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and_then(export_json);

    let export_csv_route = warp::path!("api" / "v1" / "export" / "csv")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and_then(export_csv);

    info!("All routes configured successfully.");

    list_packages_route
        .or(package_route)
        .or(packages_for_type_route)
        .or(analyze_route)
        .or(export_json_route)
        .or(export_csv_route)
        .recover(handle_rejection)
}
