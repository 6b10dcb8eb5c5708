//! HTTP plumbing shared by all services.
//!
//! Every response body produced by the gateway is one of two shapes: `{"success": true, "data":
//! ...}` for successful calls, or `{"detail": "..."}` for failures. [`Success`] and
//! [`ErrorResponse`] are the only types that produce them.

use axum::Router;
use tower::ServiceBuilder;

pub(crate) mod json;
pub(crate) mod middleware;
pub(crate) mod response;

pub(crate) use self::json::Json;
pub(crate) use self::response::{AsErrorResponse, ErrorBody, ErrorResponse, Success, SuccessBody};

pub(crate) type Body = axum::body::Body;
pub(crate) type Request = http::Request<Body>;
pub(crate) type Response = http::Response<Body>;

/// Convenience alias for handler return types.
pub(crate) type Result<T, E = ErrorResponse> = std::result::Result<T, E>;

/// Wraps the given router with fallbacks and the middleware stack shared by every route.
///
/// CORS is the outermost layer, so every response carries CORS headers, including the ones
/// produced for panics.
pub(crate) fn finish(router: Router, include_http_headers: bool) -> Router {
	router
		.fallback(not_found)
		.method_not_allowed_fallback(method_not_allowed)
		.layer(
			ServiceBuilder::new()
				.layer(middleware::cors::layer())
				.layer(middleware::request_id::set_layer())
				.layer(middleware::request_id::propagate_layer())
				.layer(middleware::catch_panic::layer())
				.layer(middleware::trace::layer::<Body>(include_http_headers)),
		)
}

async fn not_found() -> ErrorResponse {
	ErrorResponse::new(http::StatusCode::NOT_FOUND, "Not Found")
}

async fn method_not_allowed() -> ErrorResponse {
	ErrorResponse::new(http::StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

#[cfg(test)]
mod tests {
	use axum::routing::get;
	use http::header;
	use tower::ServiceExt;

	use super::*;
	use crate::testing;

	async fn panic() -> &'static str {
		panic!("oh no")
	}

	#[tokio::test]
	async fn panics_keep_cors_headers() -> testing::Result {
		let router = finish(Router::new().route("/panic", get(panic)), false);
		let request = http::Request::get("/panic")
			.header(header::ORIGIN, "https://chat.example.com")
			.body(Body::empty())?;

		let response = router.oneshot(request).await?;

		assert_eq!(response.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(
			response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
			Some(&header::HeaderValue::from_static("https://chat.example.com")),
		);
		assert!(response.headers().contains_key("x-request-id"));

		let body = testing::json_body(response).await?;

		assert_eq!(
			body,
			serde_json::json!({ "detail": "something unexpected happened; please report this incident" }),
		);

		Ok(())
	}
}
