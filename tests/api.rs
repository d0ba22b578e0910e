// tests/api.rs
//
// Integration tests driving the full warp filter tree with warp::test.
use std::sync::Arc;

use serde_json::{json, Value};

use cre_dashboard_api::routes::routes;
use cre_dashboard_api::services::sanity::SanityThresholds;

fn api() -> impl warp::Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone
{
    routes(Arc::new(SanityThresholds::default()))
}

fn analyze_body() -> Value {
    json!({
        "packageId": "office-basic",
        "propertyData": {
            "purchasePrice": 1_000_000,
            "currentNOI": 70_000,
            "grossAnnualIncome": 120_000,
            "analysisDate": "2026-08-07"
        }
    })
}

#[tokio::test]
async fn lists_the_full_catalog() {
    let res = warp::test::request()
        .path("/api/v1/packages")
        .reply(&api())
        .await;
    assert_eq!(res.status(), 200);

    let catalog: Value = serde_json::from_slice(res.body()).unwrap();
    let packages = catalog.as_array().unwrap();
    assert_eq!(packages.len(), 15);
    assert!(packages.iter().any(|p| p["id"] == "mixed-use-institutional"));
}

#[tokio::test]
async fn filters_packages_by_property_type() {
    let res = warp::test::request()
        .path("/api/v1/packages/multifamily")
        .reply(&api())
        .await;
    assert_eq!(res.status(), 200);

    let packages: Value = serde_json::from_slice(res.body()).unwrap();
    let packages = packages.as_array().unwrap();
    assert_eq!(packages.len(), 3);
    assert!(packages
        .iter()
        .all(|p| p["propertyType"] == "multifamily"));
}

#[tokio::test]
async fn unknown_property_type_is_404() {
    let res = warp::test::request()
        .path("/api/v1/packages/warehouse")
        .reply(&api())
        .await;
    assert_eq!(res.status(), 404);

    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!(body["error"].as_str().unwrap().contains("warehouse"));
}

#[tokio::test]
async fn fetches_a_single_package() {
    let res = warp::test::request()
        .path("/api/v1/packages/office/office-institutional")
        .reply(&api())
        .await;
    assert_eq!(res.status(), 200);

    let package: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(package["id"], "office-institutional");
    assert_eq!(package["tier"], "institutional");
    assert!(package["includedMetrics"]
        .as_array()
        .unwrap()
        .iter()
        .any(|m| m == "assetAnalysis"));
}

#[tokio::test]
async fn package_under_wrong_type_is_404() {
    let res = warp::test::request()
        .path("/api/v1/packages/retail/office-basic")
        .reply(&api())
        .await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn analyze_computes_the_cap_rate_scenario() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/analyze")
        .json(&analyze_body())
        .reply(&api())
        .await;
    assert_eq!(res.status(), 200);

    let result: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(result["success"], true);
    let cap_rate = result["metrics"]["capRate"].as_f64().unwrap();
    assert!((cap_rate - 7.0).abs() < 1e-9);
}

#[tokio::test]
async fn analyze_with_unknown_package_is_a_structured_failure() {
    let mut body = analyze_body();
    body["packageId"] = json!("office-premium");

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/analyze")
        .json(&body)
        .reply(&api())
        .await;
    // Anticipated bad input rides inside the result, not the status code.
    assert_eq!(res.status(), 200);

    let result: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(result["success"], false);
    assert!(result["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn analyze_reports_missing_required_fields() {
    let mut body = analyze_body();
    body["propertyData"]
        .as_object_mut()
        .unwrap()
        .remove("currentNOI");

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/analyze")
        .json(&body)
        .reply(&api())
        .await;
    assert_eq!(res.status(), 200);

    let result: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(result["success"], false);
    assert!(result["validationErrors"]["currentNOI"]
        .as_str()
        .unwrap()
        .contains("required"));
}

#[tokio::test]
async fn analyze_is_idempotent() {
    let first = warp::test::request()
        .method("POST")
        .path("/api/v1/analyze")
        .json(&analyze_body())
        .reply(&api())
        .await;
    let second = warp::test::request()
        .method("POST")
        .path("/api/v1/analyze")
        .json(&analyze_body())
        .reply(&api())
        .await;
    assert_eq!(first.body(), second.body());
}

#[tokio::test]
async fn malformed_body_is_400() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/analyze")
        .body("{not json")
        .reply(&api())
        .await;
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn export_json_is_a_download() {
    let analysis = warp::test::request()
        .method("POST")
        .path("/api/v1/analyze")
        .json(&analyze_body())
        .reply(&api())
        .await;
    let result: Value = serde_json::from_slice(analysis.body()).unwrap();

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/export/json")
        .json(&result)
        .reply(&api())
        .await;
    assert_eq!(res.status(), 200);
    let disposition = res
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains("cre-analysis-office-basic.json"));

    let exported: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(exported["metrics"]["capRate"], result["metrics"]["capRate"]);
}

#[tokio::test]
async fn export_csv_is_a_download() {
    let analysis = warp::test::request()
        .method("POST")
        .path("/api/v1/analyze")
        .json(&analyze_body())
        .reply(&api())
        .await;
    let result: Value = serde_json::from_slice(analysis.body()).unwrap();

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/export/csv")
        .json(&result)
        .reply(&api())
        .await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers().get("content-type").unwrap(), "text/csv");

    let text = String::from_utf8(res.body().to_vec()).unwrap();
    assert!(text.contains("Cap Rate"));
}
