//! A middleware to catch panics and turn them into responses.
//!
//! See [`tower_http::catch_panic`] for more details.

use std::any::Any;

use axum::response::IntoResponse;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::http::ErrorResponse;

/// Creates a [`tower::Layer`], which produces a middleware that will catch panics in its inner
/// service and turn them into `500` responses with the usual error envelope.
pub(crate) fn layer() -> CatchPanicLayer<PanicResponse> {
	CatchPanicLayer::custom(PanicResponse)
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PanicResponse;

impl ResponseForPanic for PanicResponse {
	type ResponseBody = crate::http::Body;

	fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> crate::http::Response {
		let panic_message = err
			.downcast_ref::<String>()
			.map(String::as_str)
			.or_else(|| err.downcast_ref::<&str>().copied());

		error!(?panic_message, "http handler panicked");

		ErrorResponse::new(
			http::StatusCode::INTERNAL_SERVER_ERROR,
			"something unexpected happened; please report this incident",
		)
		.into_response()
	}
}
