use std::num::NonZero;
use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A Steam application ID.
///
/// Every game, DLC, tool, etc. in Steam's catalog has one. `0` is never a valid ID.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
#[schema(value_type = u32, example = 730)]
pub struct AppId(NonZero<u32>);

impl AppId {
	pub const fn new(value: u32) -> Option<Self> {
		match NonZero::new(value) {
			Some(value) => Some(Self(value)),
			None => None,
		}
	}

	pub const fn get(self) -> u32 {
		self.0.get()
	}
}

/// An app ID as it appears in a request body.
///
/// Clients send both `730` and `"730"`, so both are accepted here and validated later via
/// [`TryFrom`], which lets us report bad IDs as a `400` with a proper message rather than a generic
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AppIdInput {
	Number(i64),
	Text(String),
}

/// An app ID that is not a positive 32-bit integer.
#[derive(Debug, Error)]
#[error("`{input}` is not a valid app ID")]
pub struct InvalidAppId {
	input: String,
}

impl FromStr for AppId {
	type Err = InvalidAppId;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		input
			.trim()
			.parse::<u32>()
			.ok()
			.and_then(Self::new)
			.ok_or_else(|| InvalidAppId { input: input.to_owned() })
	}
}

impl TryFrom<AppIdInput> for AppId {
	type Error = InvalidAppId;

	fn try_from(input: AppIdInput) -> Result<Self, Self::Error> {
		match input {
			AppIdInput::Number(number) => u32::try_from(number)
				.ok()
				.and_then(Self::new)
				.ok_or_else(|| InvalidAppId { input: number.to_string() }),
			AppIdInput::Text(text) => text.parse(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_numbers_and_numeric_strings() -> crate::testing::Result {
		let from_number = AppId::try_from(AppIdInput::Number(730))?;
		let from_text = AppId::try_from(AppIdInput::Text(String::from(" 730 ")))?;

		assert_eq!(from_number, from_text);
		assert_eq!(from_number.get(), 730);

		Ok(())
	}

	#[test]
	fn rejects_zero_negative_and_oversized_ids() {
		for input in [0, -730, i64::from(u32::MAX) + 1] {
			assert!(AppId::try_from(AppIdInput::Number(input)).is_err(), "{input}");
		}
	}

	#[test]
	fn rejects_non_numeric_strings() {
		let error = AppId::try_from(AppIdInput::Text(String::from("counter-strike")))
			.err()
			.map(|error| error.to_string());

		assert_eq!(error.as_deref(), Some("`counter-strike` is not a valid app ID"));
	}

	#[test]
	fn deserializes_from_json_either_way() -> crate::testing::Result {
		let inputs = serde_json::from_str::<Vec<AppIdInput>>(r#"[570, "440"]"#)?;

		let ids = inputs
			.into_iter()
			.map(AppId::try_from)
			.collect::<Result<Vec<_>, _>>()?;

		assert_eq!(ids.iter().map(|id| id.get()).collect::<Vec<_>>(), [570, 440]);

		Ok(())
	}

	#[test]
	fn zero_is_rejected_when_deserializing_upstream_data() {
		assert!(serde_json::from_str::<AppId>("0").is_err());
		assert!(serde_json::from_str::<AppId>("10").is_ok());
	}
}
