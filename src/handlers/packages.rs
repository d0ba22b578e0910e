// src/handlers/packages.rs
use log::info;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::PropertyType;
use crate::services::packages;

pub async fn list_packages() -> Result<Json, Rejection> {
    info!("Handling request to list all calculation packages");
    Ok(warp::reply::json(&packages::catalog()))
}

pub async fn list_packages_for_type(property_type: String) -> Result<Json, Rejection> {
    info!("Handling request to list packages for '{}'", property_type);
    let property_type: PropertyType = property_type
        .parse()
        .map_err(|e: String| warp::reject::custom(ApiError::not_found(e)))?;
    Ok(warp::reply::json(&packages::for_property_type(property_type)))
}

pub async fn get_package(property_type: String, package_id: String) -> Result<Json, Rejection> {
    info!(
        "Handling request for package '{}' under '{}'",
        package_id, property_type
    );
    let property_type: PropertyType = property_type
        .parse()
        .map_err(|e: String| warp::reject::custom(ApiError::not_found(e)))?;

    let package = packages::find(&package_id)
        .filter(|p| p.property_type == property_type)
        .ok_or_else(|| {
            warp::reject::custom(ApiError::not_found(format!(
                "Package '{}' not found for property type '{}'",
                package_id, property_type
            )))
        })?;
    Ok(warp::reply::json(package))
}
