//! Utilities for unit & integration tests.

use std::time::Duration;

use anyhow::Context;
use axum::response::Response;
use tokio::net::TcpListener;
use url::Url;

pub(crate) type Error = anyhow::Error;
pub(crate) type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Buffers a response body and parses it as JSON.
pub(crate) async fn json_body(response: Response) -> Result<serde_json::Value> {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.context("buffer response body")?;

	serde_json::from_slice(&bytes).context("parse response body")
}

/// Serves `router` on an ephemeral localhost port and returns its base URL.
///
/// This is used to stand in for Steam / SteamCharts. The server lives until the test's runtime
/// shuts down.
pub(crate) async fn spawn_upstream(router: axum::Router) -> Result<Url> {
	let listener = TcpListener::bind("127.0.0.1:0")
		.await
		.context("bind upstream listener")?;

	let addr = listener.local_addr()?;

	tokio::spawn(async move {
		if let Err(error) = axum::serve(listener, router).await {
			error!(%error, "mock upstream failed");
		}
	});

	format!("http://{addr}")
		.parse::<Url>()
		.context("build upstream url")
}

/// An HTTP client for talking to [`spawn_upstream()`] servers.
///
/// Ignores any proxy configured in the environment, since the upstreams are local.
pub(crate) fn http_client() -> Result<reqwest::Client> {
	http_client_with_timeout(Duration::from_secs(5))
}

/// Like [`http_client()`], but gives up on requests after `timeout`.
pub(crate) fn http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client> {
	reqwest::Client::builder()
		.no_proxy()
		.timeout(timeout)
		.build()
		.context("build http client")
}

/// A base URL nothing is listening on.
pub(crate) async fn unreachable_upstream() -> Result<Url> {
	let listener = TcpListener::bind("127.0.0.1:0").await?;
	let addr = listener.local_addr()?;

	drop(listener);

	format!("http://{addr}")
		.parse::<Url>()
		.context("build upstream url")
}
