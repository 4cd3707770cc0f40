// API module entry
// Cell lookup endpoints and the map page

mod handlers;
mod map;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::logger;
use crate::routing::{Endpoint, RouteMatch, Router};

/// Route table for the service.
///
/// Built once at startup and owned by `AppState`; nothing mutates it
/// afterwards.
pub fn app_router() -> Router {
    Router::new()
        .route("/map", Endpoint::MapPage)
        .route("/cell/id/:id", Endpoint::CellById)
        .route("/cell/token/:token", Endpoint::CellByToken)
        .route("/cell/lat/:lat/lng/:lng", Endpoint::CellByLatLng)
        .route("/parents/id/:id", Endpoint::ParentsById)
}

/// Main entry point for request handling.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    // 1. Lookups are read-only; gate the method first
    if let Some(resp) = check_http_method(&method, state.config.http.enable_cors) {
        return Ok(resp);
    }

    // 2. Reject oversized declared bodies
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    // 3. Dispatch on the route table
    let mut resp = match state.router.matches(&path) {
        Some(matched) => dispatch(&matched, is_head),
        None => response::not_found(),
    };

    if state.config.http.enable_cors {
        resp.headers_mut().insert(
            "Access-Control-Allow-Origin",
            HeaderValue::from_static("*"),
        );
    }

    if state.config.logging.access_log {
        logger::log_request(
            &peer_addr,
            method.as_str(),
            &path,
            resp.status().as_u16(),
            started.elapsed(),
        );
    }

    Ok(resp)
}

/// Resolve a matched route to its handler.
///
/// Parse failures come back as 200 responses whose body carries the error;
/// the status code never changes on bad input.
fn dispatch(matched: &RouteMatch<'_>, is_head: bool) -> Response<Full<Bytes>> {
    let result = match matched.endpoint {
        Endpoint::MapPage => return map::serve_map(is_head),
        Endpoint::CellById => handlers::lookup_by_id(matched.param("id").unwrap_or_default()),
        Endpoint::CellByToken => {
            handlers::lookup_by_token(matched.param("token").unwrap_or_default())
        }
        Endpoint::CellByLatLng => handlers::lookup_by_lat_lng(
            matched.param("lat").unwrap_or_default(),
            matched.param("lng").unwrap_or_default(),
        ),
        Endpoint::ParentsById => handlers::parents_by_id(matched.param("id").unwrap_or_default()),
    };
    response::json_response(StatusCode::OK, &result, is_head)
}

/// Check HTTP method and return the appropriate response for non-GET/HEAD
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(response::options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(response::method_not_allowed())
        }
    }
}

/// Validate the Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_router_covers_every_endpoint() {
        let router = app_router();
        let cases = [
            ("/map", Endpoint::MapPage),
            ("/cell/id/3932700003", Endpoint::CellById),
            ("/cell/token/89c259", Endpoint::CellByToken),
            ("/cell/lat/0/lng/0", Endpoint::CellByLatLng),
            ("/parents/id/3932700003", Endpoint::ParentsById),
        ];
        for (path, endpoint) in cases {
            assert_eq!(
                router.matches(path).map(|m| m.endpoint),
                Some(endpoint),
                "path {path} did not resolve"
            );
        }
        assert!(router.matches("/").is_none());
        assert!(router.matches("/cell/id").is_none());
    }

    #[test]
    fn test_dispatch_parse_failure_keeps_success_status() {
        let router = app_router();
        let matched = router.matches("/cell/id/abc").unwrap();
        let resp = dispatch(&matched, false);
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_method_gate() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());

        let options = check_http_method(&Method::OPTIONS, false).unwrap();
        assert_eq!(options.status(), StatusCode::NO_CONTENT);

        let post = check_http_method(&Method::POST, false).unwrap();
        assert_eq!(post.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
