use std::borrow::Cow;
use std::error::Error;

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

/// A failed response.
///
/// Serialized as `{"detail": "..."}`.
#[derive(Debug)]
pub(crate) struct ErrorResponse {
	status: StatusCode,
	detail: Cow<'static, str>,
}

/// The body of an [`ErrorResponse`].
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub(crate) struct ErrorBody {
	/// A human-readable description of what went wrong.
	pub detail: Cow<'static, str>,
}

impl ErrorResponse {
	pub(crate) fn new(status: StatusCode, detail: impl Into<Cow<'static, str>>) -> Self {
		let mut detail = detail.into();

		if detail.trim().is_empty() {
			detail = Cow::Borrowed(status.canonical_reason().unwrap_or("unknown error"));
		}

		Self { status, detail }
	}

	pub(crate) fn status(&self) -> StatusCode {
		self.status
	}

	pub(crate) fn detail(&self) -> &str {
		&self.detail
	}
}

impl IntoResponse for ErrorResponse {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorBody { detail: self.detail })).into_response()
	}
}

/// Errors that know how they should be presented to API consumers.
pub(crate) trait AsErrorResponse: Error + Sized + 'static {
	/// The HTTP status code for this error.
	fn status(&self) -> StatusCode;

	/// The message for the `detail` field.
	///
	/// Defaults to the error's [`Display`] implementation.
	///
	/// [`Display`]: std::fmt::Display
	fn detail(&self) -> Cow<'static, str> {
		Cow::Owned(self.to_string())
	}

	fn as_error_response(&self) -> ErrorResponse {
		let status = self.status();

		if status.is_server_error() {
			error!(error = self as &dyn Error, %status, "request failed");
		} else {
			debug!(error = self as &dyn Error, %status, "rejecting request");
		}

		ErrorResponse::new(status, self.detail())
	}
}
