//! The data returned by the Steam endpoints.

use serde::Serialize;

use super::AppId;

/// Store metadata about an app, combined with its live player count and a sample of its reviews.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct GameData {
	pub app_id: AppId,

	#[schema(example = "Counter-Strike 2")]
	pub name: String,

	/// The short description from the store page.
	pub description: String,

	/// The release date as displayed by the store.
	///
	/// This is free-form text localized in the requested language.
	pub release_date: String,

	pub genres: Vec<String>,
	pub categories: Vec<String>,

	/// The formatted final price, e.g. `R$ 49,99`.
	///
	/// Empty for free apps and apps without a price in the requested region.
	pub price: String,

	/// `0` if Steam could not tell.
	pub current_players: u64,

	pub total_reviews: u64,

	/// Steam's own summary, e.g. "Very Positive".
	pub review_score: String,

	/// The text of the most recent reviews.
	pub reviews: Vec<String>,

	pub pc_requirements_minimum: String,
	pub pc_requirements_recommended: String,
}

/// The number of players currently in-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct PlayerCount {
	#[schema(example = 912_345)]
	pub current_players: u64,
}

/// One row of an app's monthly player history.
///
/// Numeric fields are `null` when the source did not have a value for that month.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct MonthlyPlayers {
	pub app_id: AppId,

	/// `Last 30 Days` for the ongoing month, `<Month> <Year>` otherwise.
	#[schema(example = "March 2025")]
	pub month: String,

	pub average_players: Option<f64>,
	pub gain: Option<f64>,
	pub gain_percent: Option<f64>,
	pub peak_players: Option<u64>,
}

/// A user review.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Review {
	pub app_id: AppId,
	pub review: String,

	/// The author's SteamID64.
	#[schema(example = "76561198282622073")]
	pub user_id: String,

	/// The author's lifetime playtime, in hours.
	pub hours_played: f64,

	pub sentiment: Sentiment,
}

/// Whether a review recommends the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
	Positive,
	Negative,
}

impl From<bool> for Sentiment {
	fn from(voted_up: bool) -> Self {
		if voted_up { Self::Positive } else { Self::Negative }
	}
}

/// A game that reviewers of another game played recently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct RecentGame {
	pub name: String,
	pub app_id: AppId,

	/// How many of the sampled reviewers played this game recently.
	pub player_count: u64,

	/// The app whose reviewers were sampled.
	pub source_app_id: AppId,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn sentiment_is_lowercase() -> crate::testing::Result {
		assert_eq!(serde_json::to_value(Sentiment::from(true))?, json!("positive"));
		assert_eq!(serde_json::to_value(Sentiment::from(false))?, json!("negative"));

		Ok(())
	}

	#[test]
	fn missing_history_values_are_null() -> crate::testing::Result {
		let row = MonthlyPlayers {
			app_id: AppId::new(730).unwrap_or_else(|| unreachable!()),
			month: String::from("Last 30 Days"),
			average_players: Some(912_345.5),
			gain: None,
			gain_percent: None,
			peak_players: Some(1_802_853),
		};

		assert_eq!(
			serde_json::to_value(&row)?,
			json!({
				"app_id": 730,
				"month": "Last 30 Days",
				"average_players": 912_345.5,
				"gain": null,
				"gain_percent": null,
				"peak_players": 1_802_853,
			}),
		);

		Ok(())
	}
}
