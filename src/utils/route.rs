//! Route label extraction for metrics.

use actix_web::HttpRequest;

const KNOWN_ROUTES: &[&str] = &[
    "/lock",
    "/unlock",
    "/api/health",
    "/api/version",
    "/api/metrics",
    "/api/spec/v2",
];

/// Metric label for a request path
///
/// Unknown paths collapse to `/unknown` so scanners cannot blow up label
/// cardinality.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    route_label(req.path()).to_string()
}

fn route_label(path: &str) -> &str {
    let trimmed = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    KNOWN_ROUTES
        .iter()
        .find(|route| **route == trimmed)
        .copied()
        .unwrap_or("/unknown")
}
