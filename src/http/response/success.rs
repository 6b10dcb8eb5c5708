use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A successful response.
///
/// Serialized as `{"success": true, "data": T}` with a `200 OK` status.
#[derive(Debug)]
pub(crate) struct Success<T>(pub T);

/// The body of a [`Success`] response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub(crate) struct SuccessBody<T> {
	/// Always `true`.
	pub success: bool,
	pub data: T,
}

impl<T> IntoResponse for Success<T>
where
	T: Serialize,
{
	fn into_response(self) -> Response {
		Json(SuccessBody {
			success: true,
			data: self.0,
		})
		.into_response()
	}
}
