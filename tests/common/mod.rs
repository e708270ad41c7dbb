//! Shared fixtures: configuration and a local stand-in for the Sesame cloud.

#![allow(dead_code)]

use actix_web::{dev::ServerHandle, http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use sesame3_proxy::{AppMetrics, CommandRequest, DoorController, SesameConfig};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

pub const API_KEY: &str = "test-api-key";
pub const UUID1: &str = "488ABAAB-164F-7A86-595F-DDD778CB86C3";
pub const UUID2: &str = "6F1F7C0E-3B7A-4F1E-9C55-0E3A1D2B4C5D";
pub const SECRET_KEY1: &str = "00112233445566778899aabbccddeeff";
pub const SECRET_KEY2: &str = "ffeeddccbbaa99887766554433221100";

/// Nothing listens on port 1, so every dispatch fails with a refused connection
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1/api/sesame2";

/// One command as seen by the fake cloud
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    pub device_id: String,
    pub api_key: Option<String>,
    pub body: CommandRequest,
    pub received_at: Instant,
    pub responded_at: Instant,
}

pub type Recorded = Arc<Mutex<Vec<RecordedCommand>>>;

struct FakeCloudState {
    received: Recorded,
    status: StatusCode,
    delay: Option<(String, Duration)>,
}

/// Running fake Sesame cloud
pub struct FakeCloud {
    pub base_url: String,
    pub received: Recorded,
    handle: ServerHandle,
}

impl FakeCloud {
    /// Start a fake cloud that answers every command with `status`
    pub async fn start(status: StatusCode) -> Self {
        Self::spawn(status, None).await
    }

    /// Like [`FakeCloud::start`], but holds every response for `device_id` by `delay`
    pub async fn start_with_delay(status: StatusCode, device_id: &str, delay: Duration) -> Self {
        Self::spawn(status, Some((device_id.to_string(), delay))).await
    }

    async fn spawn(status: StatusCode, delay: Option<(String, Duration)>) -> Self {
        let received: Recorded = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(FakeCloudState {
            received: received.clone(),
            status,
            delay,
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/api/sesame2/{device_id}/cmd", web::post().to(record_command))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("failed to bind fake cloud");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}/api/sesame2"),
            received,
            handle,
        }
    }

    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.received.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn record_command(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<CommandRequest>,
    state: web::Data<FakeCloudState>,
) -> HttpResponse {
    let received_at = Instant::now();
    let device_id = path.into_inner();

    if let Some((delayed, delay)) = &state.delay {
        if *delayed == device_id {
            actix_web::rt::time::sleep(*delay).await;
        }
    }

    let api_key = req
        .headers()
        .get("x-api-key")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    state.received.lock().unwrap().push(RecordedCommand {
        device_id,
        api_key,
        body: body.into_inner(),
        received_at,
        responded_at: Instant::now(),
    });

    HttpResponse::build(state.status).json(serde_json::json!({}))
}

/// Configuration for both test devices against `base_url`
pub fn test_config(base_url: &str) -> SesameConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("PORT", "8080".to_string()),
        ("API_KEY", API_KEY.to_string()),
        ("SESAME3_UUID1", UUID1.to_string()),
        ("SESAME3_UUID2", UUID2.to_string()),
        ("SESAME3_SECRET_KEY1", SECRET_KEY1.to_string()),
        ("SESAME3_SECRET_KEY2", SECRET_KEY2.to_string()),
        ("SESAME_API_BASE_URL", base_url.to_string()),
        ("SESAME_REQUEST_TIMEOUT_SECONDS", "2".to_string()),
        ("SESAME_CONNECT_TIMEOUT_SECONDS", "1".to_string()),
    ]);

    SesameConfig::from_lookup(|name| vars.get(name).cloned()).expect("test config should load")
}

/// Door controller plus the metrics it records into
pub fn test_door(base_url: &str) -> (web::Data<DoorController>, web::Data<AppMetrics>) {
    let metrics = AppMetrics::new().expect("Failed to create metrics");
    let door = DoorController::from_config(&test_config(base_url))
        .expect("Failed to build client")
        .with_metrics(metrics.clone());

    (web::Data::new(door), web::Data::new(metrics))
}
