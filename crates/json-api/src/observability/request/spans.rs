//! Route labels for request spans and metrics.

/// Collections whose next path segment is a record id.
const COLLECTIONS: [&str; 2] = ["proposals", "usages"];

/// Fixed sub-routes that live beside record ids.
const FIXED_ROUTES: [&str; 1] = ["ping"];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_for_path(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

/// Replace record ids in `path` with `{id}` so labels stay low-cardinality.
///
/// Ids are recognised by position rather than shape, so legacy non-UUID ids
/// collapse too.
fn route_for_path(path: &str) -> String {
    let mut route = String::new();
    let mut previous = "";

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        route.push('/');

        if COLLECTIONS.contains(&previous) && !FIXED_ROUTES.contains(&segment) {
            route.push_str("{id}");
        } else {
            route.push_str(segment);
        }

        previous = segment;
    }

    if route.is_empty() {
        route.push('/');
    }

    route
}
