//! Endpoint tests against the fully wired application.

mod common;

use actix_web::{http::StatusCode, test};
use common::{test_door, UNREACHABLE_BASE_URL};
use sesame3_proxy::{create_app, MetricsConfig};

/// `/lock` answers 200 OK even when neither device can be reached
#[actix_web::test]
async fn test_lock_returns_ok_when_both_devices_unreachable() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::post().uri("/lock").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/plain"), "got {content_type}");

    let body = test::read_body(resp).await;
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn test_unlock_returns_ok_when_both_devices_unreachable() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::post().uri("/unlock").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "OK");
}

/// Failed dispatches are counted per device even though the caller sees OK
#[actix_web::test]
async fn test_failed_dispatches_are_counted() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics.clone(), MetricsConfig::default())).await;

    let req = test::TestRequest::post().uri("/lock").to_request();
    test::call_service(&app, req).await;

    for slot in ["1", "2"] {
        let success = metrics
            .device_commands_total
            .with_label_values(&[slot, "lock", "success"])
            .get();
        assert_eq!(success, 0.0, "device {slot} should not report success");
    }

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("sesame_device_commands_total"));
    assert!(text.contains(r#"command="lock""#));
}

#[actix_web::test]
async fn test_lock_requires_post() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::get().uri("/lock").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_client_error(), "got {}", resp.status());
}

#[actix_web::test]
async fn test_toggle_is_not_exposed() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::post().uri("/toggle").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json, serde_json::json!({ "status": "healthy" }));
}

#[actix_web::test]
async fn test_version_endpoint() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["commit"].is_string());
    assert!(json["build_time"].is_string());
}

#[actix_web::test]
async fn test_metrics_can_be_disabled() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig { enabled: false })).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_openapi_spec_lists_door_endpoints() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert!(json["paths"].get("/lock").is_some());
    assert!(json["paths"].get("/unlock").is_some());
}

#[actix_web::test]
async fn test_request_id_is_generated_and_echoed() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "door-panel-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "door-panel-42");
}

/// The door handlers read the request ID stored by the middleware
#[actix_web::test]
async fn test_lock_carries_request_id() {
    let (door, metrics) = test_door(UNREACHABLE_BASE_URL);
    let app = test::init_service(create_app(door, metrics, MetricsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/lock")
        .insert_header(("X-Request-ID", "door-panel-7"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "door-panel-7");
    assert_eq!(test::read_body(resp).await, "OK");
}
