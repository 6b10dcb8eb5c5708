//! Request bodies for the Steam endpoints, and their validation.
//!
//! Bodies are deserialized leniently (every field optional, app IDs as numbers or strings) and then
//! validated into the query types the [`SteamService`] works with. This way a missing or empty
//! identifier is reported as a `400` with a useful `detail` instead of a generic `422`.
//!
//! [`SteamService`]: super::SteamService

use std::ops::RangeInclusive;

use serde::Deserialize;
use thiserror::Error;

use super::app_id::{AppId, AppIdInput, InvalidAppId};
use crate::http::AsErrorResponse;

/// The maximum number of app IDs accepted in a single request.
pub const MAX_APP_IDS: usize = 50;

const MAX_REVIEWS: RangeInclusive<u32> = 1..=500;
const DEFAULT_MAX_REVIEWS: u32 = 50;

const NUM_PLAYERS: RangeInclusive<u32> = 1..=100;
const DEFAULT_NUM_PLAYERS: u32 = 10;

const MAX_LANGUAGE_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum RequestError {
	#[error("`app_ids` must contain at least one app ID")]
	MissingAppIds,

	#[error("`app_id` is required")]
	MissingAppId,

	#[error(transparent)]
	InvalidAppId(#[from] InvalidAppId),

	#[error("at most {max} app IDs are allowed per request (got {count})", max = MAX_APP_IDS)]
	TooManyAppIds { count: usize },

	#[error("`{field}` must be between {} and {} (got {value})", .range.start(), .range.end())]
	OutOfRange {
		field: &'static str,
		value: u32,
		range: RangeInclusive<u32>,
	},

	#[error("`{language}` is not a valid Steam language name")]
	InvalidLanguage { language: String },
}

impl AsErrorResponse for RequestError {
	fn status(&self) -> http::StatusCode {
		http::StatusCode::BAD_REQUEST
	}
}

/// Request body for `POST /steam/game-data`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct GameDataRequest {
	/// The apps to fetch. Takes precedence over `app_id`.
	#[schema(value_type = Option<Vec<u32>>, example = json!([730, 570]))]
	pub app_ids: Option<Vec<AppIdInput>>,

	#[schema(value_type = Option<u32>)]
	pub app_id: Option<AppIdInput>,

	/// Steam language name for localized store data, e.g. `english`.
	pub language: Option<String>,

	/// Maximum number of reviews to include per app (1-500, default 50).
	pub max_reviews: Option<u32>,
}

/// Request body for `POST /steam/current-players`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CurrentPlayersRequest {
	#[schema(value_type = u32, example = 730)]
	pub app_id: Option<AppIdInput>,
}

/// Request body for `POST /steam/historical-data`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct HistoricalDataRequest {
	#[schema(value_type = Option<Vec<u32>>)]
	pub app_ids: Option<Vec<AppIdInput>>,

	#[schema(value_type = Option<u32>, example = 730)]
	pub app_id: Option<AppIdInput>,
}

/// Request body for `POST /steam/game-reviews`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct GameReviewsRequest {
	#[schema(value_type = Option<Vec<u32>>)]
	pub app_ids: Option<Vec<AppIdInput>>,

	#[schema(value_type = Option<u32>, example = 730)]
	pub app_id: Option<AppIdInput>,

	/// Steam language name of the reviews to fetch, e.g. `english`.
	pub language: Option<String>,

	/// Maximum number of reviews to fetch per app (1-500, default 50).
	pub max_reviews: Option<u32>,
}

/// Request body for `POST /steam/recent-games`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct RecentGamesRequest {
	#[schema(value_type = Option<Vec<u32>>)]
	pub app_ids: Option<Vec<AppIdInput>>,

	#[schema(value_type = Option<u32>, example = 730)]
	pub app_id: Option<AppIdInput>,

	/// How many recent reviewers to sample per app (1-100, default 10).
	pub num_players: Option<u32>,
}

/// A validated [`GameDataRequest`] or [`GameReviewsRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewedAppsQuery {
	pub app_ids: Vec<AppId>,
	pub language: Box<str>,
	pub max_reviews: u32,
}

/// A validated [`RecentGamesRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentGamesQuery {
	pub app_ids: Vec<AppId>,
	pub num_players: u32,
}

impl GameDataRequest {
	pub fn validate(self, default_language: &str) -> Result<ReviewedAppsQuery, RequestError> {
		Ok(ReviewedAppsQuery {
			app_ids: resolve_app_ids(self.app_ids, self.app_id)?,
			language: language(self.language, default_language)?,
			max_reviews: in_range("max_reviews", self.max_reviews, MAX_REVIEWS, DEFAULT_MAX_REVIEWS)?,
		})
	}
}

impl CurrentPlayersRequest {
	pub fn validate(self) -> Result<AppId, RequestError> {
		let app_id = self.app_id.ok_or(RequestError::MissingAppId)?;

		Ok(AppId::try_from(app_id)?)
	}
}

impl HistoricalDataRequest {
	pub fn validate(self) -> Result<Vec<AppId>, RequestError> {
		resolve_app_ids(self.app_ids, self.app_id)
	}
}

impl GameReviewsRequest {
	pub fn validate(self, default_language: &str) -> Result<ReviewedAppsQuery, RequestError> {
		Ok(ReviewedAppsQuery {
			app_ids: resolve_app_ids(self.app_ids, self.app_id)?,
			language: language(self.language, default_language)?,
			max_reviews: in_range("max_reviews", self.max_reviews, MAX_REVIEWS, DEFAULT_MAX_REVIEWS)?,
		})
	}
}

impl RecentGamesRequest {
	pub fn validate(self) -> Result<RecentGamesQuery, RequestError> {
		Ok(RecentGamesQuery {
			app_ids: resolve_app_ids(self.app_ids, self.app_id)?,
			num_players: in_range("num_players", self.num_players, NUM_PLAYERS, DEFAULT_NUM_PLAYERS)?,
		})
	}
}

/// Picks the app IDs out of a request.
///
/// A non-empty `app_ids` wins over `app_id`. Duplicates are kept, so responses line up with the
/// request.
fn resolve_app_ids(
	app_ids: Option<Vec<AppIdInput>>,
	app_id: Option<AppIdInput>,
) -> Result<Vec<AppId>, RequestError> {
	let inputs = match (app_ids, app_id) {
		(Some(app_ids), _) if !app_ids.is_empty() => app_ids,
		(_, Some(app_id)) => vec![app_id],
		(Some(_), None) => return Err(RequestError::MissingAppIds),
		(None, None) => return Err(RequestError::MissingAppId),
	};

	if inputs.len() > MAX_APP_IDS {
		return Err(RequestError::TooManyAppIds { count: inputs.len() });
	}

	inputs
		.into_iter()
		.map(|input| AppId::try_from(input).map_err(RequestError::from))
		.collect()
}

fn language(language: Option<String>, default: &str) -> Result<Box<str>, RequestError> {
	let Some(language) = language.filter(|language| !language.trim().is_empty()) else {
		return Ok(Box::from(default));
	};

	let trimmed = language.trim();

	if trimmed.len() > MAX_LANGUAGE_LEN || !trimmed.bytes().all(|byte| byte.is_ascii_alphabetic()) {
		return Err(RequestError::InvalidLanguage { language });
	}

	Ok(trimmed.to_ascii_lowercase().into_boxed_str())
}

fn in_range(
	field: &'static str,
	value: Option<u32>,
	range: RangeInclusive<u32>,
	default: u32,
) -> Result<u32, RequestError> {
	match value {
		None => Ok(default),
		Some(value) if range.contains(&value) => Ok(value),
		Some(value) => Err(RequestError::OutOfRange { field, value, range }),
	}
}
