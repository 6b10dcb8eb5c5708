//! The response envelope.

mod error;
mod success;

pub(crate) use self::error::{AsErrorResponse, ErrorBody, ErrorResponse};
pub(crate) use self::success::{Success, SuccessBody};

#[cfg(test)]
mod tests {
	use axum::response::IntoResponse;
	use serde_json::json;

	use super::*;
	use crate::testing;

	#[tokio::test]
	async fn success_has_no_detail() -> testing::Result {
		let response = Success(json!({ "current_players": 42 })).into_response();

		assert_eq!(response.status(), http::StatusCode::OK);

		let body = testing::json_body(response).await?;

		assert_eq!(body, json!({ "success": true, "data": { "current_players": 42 } }));

		Ok(())
	}

	#[tokio::test]
	async fn errors_have_no_success_flag() -> testing::Result {
		let response =
			ErrorResponse::new(http::StatusCode::BAD_GATEWAY, "Steam is down").into_response();

		assert_eq!(response.status(), http::StatusCode::BAD_GATEWAY);
		assert_eq!(
			response.headers().get(http::header::CONTENT_TYPE),
			Some(&http::HeaderValue::from_static("application/json")),
		);

		let body = testing::json_body(response).await?;

		assert_eq!(body, json!({ "detail": "Steam is down" }));

		Ok(())
	}

	#[test]
	fn empty_details_are_replaced() {
		let error = ErrorResponse::new(http::StatusCode::BAD_REQUEST, "");

		assert!(!error.detail().is_empty());
	}
}
