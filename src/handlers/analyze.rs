// src/handlers/analyze.rs
use std::sync::Arc;

use log::info;
use warp::reply::Json;
use warp::Rejection;

use crate::models::AnalyzeRequest;
use crate::services::calculator;
use crate::services::sanity::SanityThresholds;

/// Runs one analysis. Anticipated failures (unknown package, validation
/// errors, sanity violations) come back inside the structured result with
/// status 200; the rejection path is reserved for malformed transport.
pub async fn analyze(
    request: AnalyzeRequest,
    thresholds: Arc<SanityThresholds>,
) -> Result<Json, Rejection> {
    info!(
        "Handling analysis request for package '{}'",
        request.package_id
    );

    let result = calculator::run_analysis(&request.package_id, &request.property_data, &thresholds);

    info!(
        "Analysis for package '{}' finished: success={}, {} warning(s)",
        request.package_id,
        result.success,
        result.warnings.len()
    );
    Ok(warp::reply::json(&result))
}
