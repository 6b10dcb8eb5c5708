//! HTTP handlers for this service.

use axum::{Json, Router, routing};
use serde::Serialize;

use super::HealthService;

impl From<HealthService> for Router {
	fn from(svc: HealthService) -> Self {
		Router::new()
			.route("/", routing::get(root))
			.route("/health", routing::get(health))
			.with_state(svc)
	}
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub(crate) struct ServiceStatus {
	#[schema(example = "Steam Games API")]
	message: &'static str,

	#[schema(example = "running")]
	status: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub(crate) struct HealthStatus {
	#[schema(example = "ok")]
	status: &'static str,
}

/// Service status.
#[utoipa::path(get, path = "/", tag = "Status", responses((status = 200, body = ServiceStatus)))]
pub(crate) async fn root() -> Json<ServiceStatus> {
	Json(ServiceStatus {
		message: "Steam Games API",
		status: "running",
	})
}

/// Health probe.
///
/// Always succeeds while the process is up, regardless of upstream availability.
#[utoipa::path(get, path = "/health", tag = "Status", responses((status = 200, body = HealthStatus)))]
pub(crate) async fn health() -> Json<HealthStatus> {
	Json(HealthStatus { status: "ok" })
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use tower::ServiceExt;

	use super::*;
	use crate::testing;

	async fn get(path: &str) -> testing::Result<serde_json::Value> {
		let request = http::Request::get(path).body(axum::body::Body::empty())?;
		let response = Router::from(HealthService::new()).oneshot(request).await?;

		assert_eq!(response.status(), http::StatusCode::OK);

		testing::json_body(response).await
	}

	#[tokio::test]
	async fn status_route() -> testing::Result {
		assert_eq!(get("/").await?, json!({ "message": "Steam Games API", "status": "running" }));

		Ok(())
	}

	#[tokio::test]
	async fn health_route() -> testing::Result {
		assert_eq!(get("/health").await?, json!({ "status": "ok" }));

		Ok(())
	}
}
