//! Route matching module
//!
//! Matches request paths against a fixed table of segment patterns. A
//! pattern segment starting with `:` captures the request's segment under
//! that name; everything else must match literally.

/// Handler identity a matched path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    MapPage,
    CellById,
    CellByToken,
    CellByLatLng,
    ParentsById,
}

#[derive(Debug)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

#[derive(Debug)]
struct Route {
    segments: Vec<Segment>,
    endpoint: Endpoint,
}

/// Result of a successful match: the endpoint plus captured parameters.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub endpoint: Endpoint,
    params: Vec<(&'static str, &'a str)>,
}

impl<'a> RouteMatch<'a> {
    /// Captured value of a named path parameter.
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }
}

/// Fixed route table.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a route pattern for an endpoint.
    #[must_use]
    pub fn route(mut self, pattern: &'static str, endpoint: Endpoint) -> Self {
        let segments = pattern
            .trim_matches('/')
            .split('/')
            .map(|s| {
                s.strip_prefix(':')
                    .map_or(Segment::Literal(s), Segment::Param)
            })
            .collect();
        self.routes.push(Route { segments, endpoint });
        self
    }

    /// Find the first registered route matching the path.
    pub fn matches<'a>(&self, path: &'a str) -> Option<RouteMatch<'a>> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        self.routes.iter().find_map(|route| route.matches(&segments))
    }
}

impl Route {
    fn matches<'a>(&self, segments: &[&'a str]) -> Option<RouteMatch<'a>> {
        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (pattern, value) in self.segments.iter().zip(segments.iter()) {
            match pattern {
                Segment::Literal(lit) => {
                    if lit != value {
                        return None;
                    }
                }
                Segment::Param(name) => params.push((*name, *value)),
            }
        }

        Some(RouteMatch {
            endpoint: self.endpoint,
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Router {
        Router::new()
            .route("/map", Endpoint::MapPage)
            .route("/cell/id/:id", Endpoint::CellById)
            .route("/cell/token/:token", Endpoint::CellByToken)
            .route("/cell/lat/:lat/lng/:lng", Endpoint::CellByLatLng)
            .route("/parents/id/:id", Endpoint::ParentsById)
    }

    #[test]
    fn test_match_literal_route() {
        let m = table().matches("/map").unwrap();
        assert_eq!(m.endpoint, Endpoint::MapPage);
        assert_eq!(m.param("id"), None);
    }

    #[test]
    fn test_match_captures_param() {
        let router = table();
        let m = router.matches("/cell/id/3932700003").unwrap();
        assert_eq!(m.endpoint, Endpoint::CellById);
        assert_eq!(m.param("id"), Some("3932700003"));
    }

    #[test]
    fn test_match_captures_two_params() {
        let router = table();
        let m = router.matches("/cell/lat/48.8584/lng/-2.25").unwrap();
        assert_eq!(m.endpoint, Endpoint::CellByLatLng);
        assert_eq!(m.param("lat"), Some("48.8584"));
        assert_eq!(m.param("lng"), Some("-2.25"));
    }

    #[test]
    fn test_no_match_on_segment_count() {
        let router = table();
        assert!(router.matches("/cell/id").is_none());
        assert!(router.matches("/cell/id/1/extra").is_none());
    }

    #[test]
    fn test_no_match_on_unknown_path() {
        let router = table();
        assert!(router.matches("/").is_none());
        assert!(router.matches("/cells/id/1").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let router = Router::new()
            .route("/cell/:a", Endpoint::CellById)
            .route("/cell/:b", Endpoint::CellByToken);
        let m = router.matches("/cell/x").unwrap();
        assert_eq!(m.endpoint, Endpoint::CellById);
        assert_eq!(m.param("a"), Some("x"));
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let router = table();
        assert_eq!(
            router.matches("/parents/id/5/").map(|m| m.endpoint),
            Some(Endpoint::ParentsById)
        );
    }
}
