use std::borrow::Cow;

use axum::extract::rejection::BytesRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use crate::http::AsErrorResponse;

/// Rejection for the [`Json`] extractor.
///
/// [`Json`]: super::Json
#[derive(Debug, Error)]
pub(crate) enum JsonRejection {
	#[error("expected `Content-Type: application/json`")]
	UnsupportedContentType,

	#[error("request body is empty; expected a JSON object")]
	EmptyBody,

	#[error("failed to read request body: {0}")]
	BufferBody(#[from] BytesRejection),

	#[error("invalid request body: {0}")]
	Deserialize(#[source] serde_json::Error),
}

impl AsErrorResponse for JsonRejection {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			Self::EmptyBody => StatusCode::BAD_REQUEST,
			Self::BufferBody(rejection) => rejection.status(),
			Self::Deserialize(_) => StatusCode::UNPROCESSABLE_ENTITY,
		}
	}

	fn detail(&self) -> Cow<'static, str> {
		match self {
			Self::BufferBody(rejection) => Cow::Owned(rejection.body_text()),
			_ => Cow::Owned(self.to_string()),
		}
	}
}

impl IntoResponse for JsonRejection {
	fn into_response(self) -> Response {
		self.as_error_response().into_response()
	}
}
