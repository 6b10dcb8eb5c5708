//! The OpenAPI document.
//!
//! It is generated from the handlers' `#[utoipa::path]` annotations and served both as raw JSON
//! (for tool integrations that discover the API on their own) and through Swagger UI.

use axum::Router;
use axum::routing::get;
use bytes::Bytes;
use url::Url;
use utoipa::openapi::OpenApi;
use utoipa::openapi::server::Server;
use utoipa_swagger_ui::SwaggerUi;

static DESCRIPTION: &str = "\
A JSON gateway over the Steam Web API, the Steam Store, and SteamCharts.

Every `/steam/*` endpoint takes a JSON body with either `app_ids` (a list) or `app_id` (a single
value). App IDs may be numbers or numeric strings; at most 50 are accepted per request.

# Responses

Successful calls return `{\"success\": true, \"data\": ...}`.

Failed calls return `{\"detail\": \"...\"}` with an appropriate status code:

- `400 Bad Request` on missing or invalid app IDs and out-of-range options
- `404 Not Found` when the upstream does not know the requested app
- `415 Unsupported Media Type` if the body is not sent as JSON
- `422 Unprocessable Entity` if the body is not valid JSON, or has fields of the wrong type
- `500 Internal Server Error` if the gateway is missing credentials required by the endpoint
- `502 Bad Gateway` if an upstream could not be reached or returned something unexpected
- `504 Gateway Timeout` if an upstream took too long to respond

Every response also includes an `x-request-id` header, which is useful to include in bug reports.
";

#[derive(Debug, utoipa::OpenApi)]
#[openapi(
	info(
		title = "Steam Games API",
		description = DESCRIPTION,
		license(name = "GPL-3.0", url = "https://www.gnu.org/licenses/gpl-3.0.txt"),
	),
	tags(
		(name = "Steam", description = "Steam store data, player counts, reviews, and history"),
		(name = "Status", description = "Liveness of the gateway itself"),
	),
	paths(
		crate::services::health::http::root,
		crate::services::health::http::health,
		crate::services::steam::http::game_data,
		crate::services::steam::http::current_players,
		crate::services::steam::http::historical_data,
		crate::services::steam::http::game_reviews,
		crate::services::steam::http::recent_games,
	),
)]
pub struct Schema;

impl Schema {
	/// Generates the document, advertising `public_url` as the only server if given.
	pub fn generate(public_url: Option<&Url>) -> OpenApi {
		let mut schema = <Self as utoipa::OpenApi>::openapi();

		if let Some(public_url) = public_url {
			schema.servers = Some(vec![Server::new(public_url.as_str().trim_end_matches('/'))]);
		}

		schema
	}

	/// Generates the document as pretty-printed JSON.
	pub fn json() -> serde_json::Result<String> {
		Self::generate(None).to_pretty_json()
	}
}

/// Serves the document at `/openapi.json`, `/.well-known/openapi.json`, and `/docs/openapi.json`,
/// with Swagger UI at `/docs/swagger-ui`.
pub(crate) fn router(public_url: Option<&Url>) -> serde_json::Result<Router> {
	let schema = Schema::generate(public_url);
	let document = Bytes::from(schema.to_json()?);
	let serve_document = move || {
		let document = document.clone();

		async move { ([(http::header::CONTENT_TYPE, "application/json")], document) }
	};

	let swagger_ui = SwaggerUi::new("/docs/swagger-ui").url("/docs/openapi.json", schema);

	Ok(Router::new()
		.route("/openapi.json", get(serve_document.clone()))
		.route("/.well-known/openapi.json", get(serve_document))
		.merge(swagger_ui))
}

#[cfg(test)]
mod tests {
	use tower::ServiceExt;

	use super::*;
	use crate::testing;

	#[test]
	fn documents_every_route() -> testing::Result {
		let schema = Schema::generate(None);
		let paths = schema.paths.paths.keys().map(String::as_str).collect::<Vec<_>>();

		for path in [
			"/",
			"/health",
			"/steam/game-data",
			"/steam/current-players",
			"/steam/historical-data",
			"/steam/game-reviews",
			"/steam/recent-games",
		] {
			assert!(paths.contains(&path), "{path} is missing from {paths:?}");
		}

		assert_eq!(schema.info.title, "Steam Games API");

		Ok(())
	}

	#[test]
	fn advertises_public_url() -> testing::Result {
		let public_url = "https://gateway.example.com/".parse::<Url>()?;
		let schema = Schema::generate(Some(&public_url));
		let servers = schema.servers.unwrap_or_default();

		assert_eq!(servers.len(), 1);
		assert_eq!(servers[0].url, "https://gateway.example.com");

		Ok(())
	}

	#[tokio::test]
	async fn serves_json() -> testing::Result {
		for path in ["/openapi.json", "/.well-known/openapi.json"] {
			let request = http::Request::get(path).body(axum::body::Body::empty())?;
			let response = router(None)?.oneshot(request).await?;

			assert_eq!(response.status(), http::StatusCode::OK);

			let document = testing::json_body(response).await?;

			assert_eq!(document["info"]["title"], "Steam Games API", "{path}");
		}

		Ok(())
	}
}
