//! Door command endpoint handlers.

use crate::{models::Command, services::DoorController};
use actix_web::{web, Error, HttpMessage, HttpRequest, HttpResponse, Result};
use paperclip::actix::api_v2_operation;

/// Lock both bolts
///
/// Always answers `200 OK` once both dispatches have finished; per-device
/// failures are logged and counted, not returned.
#[api_v2_operation(
    summary = "Lock Door Endpoint",
    description = "Sends the lock command (82) to both configured Sesame devices, one after the other. Always responds with plain-text OK once both dispatches have completed, regardless of their outcome.",
    tags("Door"),
    responses(
        (status = 200, description = "Commands dispatched", content_type = "text/plain"),
        (status = 503, description = "Door controller not configured")
    )
)]
pub async fn lock(req: HttpRequest) -> Result<HttpResponse, Error> {
    run_door_command(&req, Command::Lock).await
}

/// Unlock both bolts
#[api_v2_operation(
    summary = "Unlock Door Endpoint",
    description = "Sends the unlock command (83) to both configured Sesame devices, one after the other. Always responds with plain-text OK once both dispatches have completed, regardless of their outcome.",
    tags("Door"),
    responses(
        (status = 200, description = "Commands dispatched", content_type = "text/plain"),
        (status = 503, description = "Door controller not configured")
    )
)]
pub async fn unlock(req: HttpRequest) -> Result<HttpResponse, Error> {
    run_door_command(&req, Command::Unlock).await
}

async fn run_door_command(req: &HttpRequest, command: Command) -> Result<HttpResponse, Error> {
    let door = req
        .app_data::<web::Data<DoorController>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorServiceUnavailable("Door controller not configured"))?;

    let request_id = req
        .extensions()
        .get::<String>()
        .cloned()
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info!(request_id = %request_id, command = %command, "Door command requested");

    for report in door.operate(command).await {
        if let Err(e) = &report.result {
            tracing::debug!(
                request_id = %request_id,
                slot = report.slot,
                device_id = %report.device_id,
                error = %e,
                "Device command not applied"
            );
        }
    }

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("OK"))
}
