//! OpenAPI specification generation and app factory.

use crate::{
    config::MetricsConfig,
    handlers::{get_metrics, health, lock, unlock, version},
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    services::{AppMetrics, DoorController},
};
use actix_web::App;
use paperclip::actix::{web, OpenApiExt};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the OpenAPI specification served at `/api/spec/v2`
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Sesame3 Proxy".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Locks and unlocks a two-bolt door through the Sesame cloud API.\n\n\
                ## Door commands\n\
                `POST /lock` and `POST /unlock` take no body. Each sends the command to both \
                configured devices, one after the other, and always answers `200 OK` with the \
                plain-text body `OK`.\n\
                \n\
                ## Outbound signing\n\
                Every outbound command carries a fresh AES-CMAC tag in its `sign` field:\n\
                1. Take the current Unix time as a little-endian `u32`\n\
                2. Drop the lowest byte, keeping a 3-byte message (~256 second buckets)\n\
                3. Compute AES-CMAC over it with the device secret key\n\
                4. Encode the 16-byte tag as hexadecimal\n\
                \n\
                **Configuration:**\n\
                - `API_KEY`: Sesame cloud API key, sent as `x-api-key`\n\
                - `SESAME3_UUID1`, `SESAME3_UUID2`: device UUIDs\n\
                - `SESAME3_SECRET_KEY1`, `SESAME3_SECRET_KEY2`: hex device secret keys"
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the proxy application around an already-built door controller
///
/// Used by `main` and by the integration tests, which inject a controller
/// pointed at a local stand-in for the Sesame cloud.
pub fn create_app(
    door: web::Data<DoorController>,
    metrics: web::Data<AppMetrics>,
    metrics_config: MetricsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(door)
        .app_data(metrics)
        .app_data(web::Data::new(metrics_config))
        .service(web::resource("/lock").route(web::post().to(lock)))
        .service(web::resource("/unlock").route(web::post().to(unlock)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
