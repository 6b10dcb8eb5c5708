use derive_more::Display;
use http::StatusCode;
use thiserror::Error;

use super::AppId;
use crate::http::AsErrorResponse;

/// The upstream services the gateway talks to.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
	#[display("the Steam Web API")]
	WebApi,

	#[display("the Steam Store")]
	Store,

	#[display("SteamCharts")]
	SteamCharts,
}

/// Errors that can occur when fetching data from an [`Upstream`].
#[derive(Debug, Error)]
pub enum Error {
	/// The operation needs the Steam WebAPI key, but none was configured.
	#[error("`STEAM_API_KEY` is not configured on this server")]
	MissingApiKey,

	/// The upstream does not know the requested app.
	#[error("{upstream} has no data for app {app_id}")]
	UnknownApp { upstream: Upstream, app_id: AppId },

	/// A scraped page did not have the expected structure.
	#[error("could not read the {upstream} page for app {app_id}: {reason}")]
	MalformedPage {
		upstream: Upstream,
		app_id: AppId,
		reason: &'static str,
	},

	/// The upstream answered, but reported that it could not serve the request.
	#[error("{upstream} reported an unsuccessful request")]
	Unsuccessful { upstream: Upstream },

	#[error("request to {upstream} timed out")]
	Timeout {
		upstream: Upstream,
		#[source]
		source: reqwest::Error,
	},

	#[error("{upstream} responded with `{status}`")]
	Status {
		upstream: Upstream,
		status: StatusCode,
		#[source]
		source: reqwest::Error,
	},

	#[error("failed to decode the response from {upstream}")]
	Decode {
		upstream: Upstream,
		#[source]
		source: reqwest::Error,
	},

	#[error("failed to reach {upstream}")]
	Request {
		upstream: Upstream,
		#[source]
		source: reqwest::Error,
	},
}

impl Error {
	/// Classifies a [`reqwest::Error`].
	///
	/// The URL is stripped from the error before it is stored, because Steam WebAPI URLs carry the
	/// API key in their query string.
	pub(super) fn http(upstream: Upstream, error: reqwest::Error) -> Self {
		let source = error.without_url();

		if source.is_timeout() {
			Self::Timeout { upstream, source }
		} else if let Some(status) = source.status() {
			Self::Status { upstream, status, source }
		} else if source.is_decode() {
			Self::Decode { upstream, source }
		} else {
			Self::Request { upstream, source }
		}
	}

	/// Turns a `404 Not Found` from the upstream into [`Error::UnknownApp`].
	pub(super) fn not_found_as_unknown(self, app_id: AppId) -> Self {
		match self {
			Self::Status {
				upstream,
				status: StatusCode::NOT_FOUND,
				..
			} => Self::UnknownApp { upstream, app_id },
			error => error,
		}
	}
}

impl AsErrorResponse for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
			Self::UnknownApp { .. } => StatusCode::NOT_FOUND,
			Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
			Self::MalformedPage { .. }
			| Self::Unsuccessful { .. }
			| Self::Status { .. }
			| Self::Decode { .. }
			| Self::Request { .. } => StatusCode::BAD_GATEWAY,
		}
	}
}
