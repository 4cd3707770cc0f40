// Map page - embedded cell explorer UI

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::response;

/// Serve the embedded map page.
pub fn serve_map(is_head: bool) -> Response<Full<Bytes>> {
    response::html_response(include_str!("map.html"), is_head)
}
