use tower_http::cors::CorsLayer;

/// Creates the CORS layer.
///
/// Any origin, method and header is allowed. The request's `Origin` is mirrored back, so
/// credentialed requests from browsers work as well.
pub(crate) fn layer() -> CorsLayer {
	CorsLayer::very_permissive()
}
