//! Version information endpoint handler.

use crate::models::VersionResponse;
use actix_web::{web, Error, Result};
use paperclip::actix::api_v2_operation;

/// Git commit the binary was built from, when built inside a checkout
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

pub const BUILD_TIMESTAMP: &str = match option_env!("VERGEN_BUILD_TIMESTAMP") {
    Some(ts) => ts,
    None => "unknown",
};

/// Version information endpoint
#[api_v2_operation(
    summary = "Version Information Endpoint",
    description = "Returns the current proxy version, commit hash, and build time.",
    tags("Version"),
    responses(
        (status = 200, description = "Successful response", body = VersionResponse)
    )
)]
pub async fn version() -> Result<web::Json<VersionResponse>, Error> {
    Ok(web::Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: GIT_SHA.to_string(),
        build_time: BUILD_TIMESTAMP.to_string(),
    }))
}
