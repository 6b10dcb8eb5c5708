//! A JSON extractor that rejects requests with our own error envelope.

mod rejection;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use mime::Mime;
use serde::de::DeserializeOwned;

pub(crate) use self::rejection::JsonRejection;

/// An [extractor] for JSON request bodies.
///
/// This is the same as [`axum::Json`], except that rejections are reported as `{"detail": ...}`.
/// A missing `Content-Type` header is tolerated, since some tool-calling clients omit it.
///
/// [extractor]: axum::extract
#[derive(Debug)]
pub(crate) struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
	T: DeserializeOwned,
	S: Send + Sync,
{
	type Rejection = JsonRejection;

	#[instrument(level = "debug", skip_all, err(Debug, level = "debug"))]
	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		if !accepts_content_type(req.headers()) {
			return Err(JsonRejection::UnsupportedContentType);
		}

		let body = Bytes::from_request(req, state).await?;

		if body.iter().all(u8::is_ascii_whitespace) {
			return Err(JsonRejection::EmptyBody);
		}

		serde_json::from_slice(&body[..])
			.map(Self)
			.map_err(JsonRejection::Deserialize)
	}
}

/// Checks whether the request's `Content-Type` (if any) is JSON-like.
fn accepts_content_type(headers: &http::HeaderMap) -> bool {
	let Some(content_type) = headers.get(http::header::CONTENT_TYPE) else {
		trace!("request has no `Content-Type` header; assuming JSON");
		return true;
	};

	let Ok(content_type) = content_type.to_str() else {
		debug!("request has a `Content-Type` header, but it's not UTF-8");
		return false;
	};

	let Ok(mime) = content_type.parse::<Mime>() else {
		debug!(content_type, "request has a `Content-Type` header, but it's not a valid mime type");
		return false;
	};

	mime.type_() == mime::APPLICATION
		&& (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn headers(content_type: Option<&'static str>) -> http::HeaderMap {
		let mut headers = http::HeaderMap::new();

		if let Some(content_type) = content_type {
			headers.insert(
				http::header::CONTENT_TYPE,
				http::HeaderValue::from_static(content_type),
			);
		}

		headers
	}

	#[test]
	fn json_content_types() {
		assert!(accepts_content_type(&headers(None)));
		assert!(accepts_content_type(&headers(Some("application/json"))));
		assert!(accepts_content_type(&headers(Some("application/json; charset=utf-8"))));
		assert!(accepts_content_type(&headers(Some("application/problem+json"))));
	}

	#[test]
	fn non_json_content_types() {
		assert!(!accepts_content_type(&headers(Some("text/plain"))));
		assert!(!accepts_content_type(&headers(Some("application/x-www-form-urlencoded"))));
		assert!(!accepts_content_type(&headers(Some("not a mime type"))));
	}
}
