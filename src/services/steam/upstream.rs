//! Response bodies of the upstream Steam APIs.
//!
//! Steam omits fields freely, so nearly everything here is `#[serde(default)]`.

use std::collections::HashMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use super::AppId;

/// `GET store.steampowered.com/api/appdetails?appids={app_id}`
///
/// The body is an object keyed by the requested app ID.
pub(super) type AppDetailsResponse = HashMap<String, AppDetailsEntry>;

#[derive(Debug, Deserialize)]
pub(super) struct AppDetailsEntry {
	pub success: bool,

	#[serde(default)]
	pub data: Option<AppDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AppDetails {
	pub name: Option<String>,
	pub short_description: String,
	pub release_date: Option<ReleaseDate>,
	pub genres: Vec<Described>,
	pub categories: Vec<Described>,
	pub price_overview: Option<PriceOverview>,

	#[serde(deserialize_with = "requirements")]
	pub pc_requirements: PcRequirements,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ReleaseDate {
	pub date: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Described {
	pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PriceOverview {
	pub final_formatted: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PcRequirements {
	pub minimum: String,
	pub recommended: String,
}

/// Steam sends `[]` instead of an object for apps without requirements.
fn requirements<'de, D>(deserializer: D) -> Result<PcRequirements, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Helper {
		Object(PcRequirements),
		Other(IgnoredAny),
	}

	Helper::deserialize(deserializer).map(|helper| match helper {
		Helper::Object(requirements) => requirements,
		Helper::Other(_) => PcRequirements::default(),
	})
}

/// `GET store.steampowered.com/appreviews/{app_id}?json=1`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ReviewsPage {
	/// `1` on success.
	pub success: u8,

	/// Only included in the first page.
	pub query_summary: Option<QuerySummary>,

	pub reviews: Vec<ReviewEntry>,

	/// Passed back to fetch the next page.
	pub cursor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct QuerySummary {
	pub total_reviews: u64,
	pub review_score_desc: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ReviewEntry {
	#[serde(default)]
	pub review: String,

	#[serde(default)]
	pub voted_up: bool,

	#[serde(default)]
	pub author: ReviewAuthor,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ReviewAuthor {
	pub steamid: String,

	/// In minutes.
	pub playtime_forever: u64,
}

/// `GET api.steampowered.com/ISteamUserStats/GetNumberOfCurrentPlayers/v1`
#[derive(Debug, Deserialize)]
pub(super) struct CurrentPlayersResponse {
	pub response: CurrentPlayers,
}

#[derive(Debug, Deserialize)]
pub(super) struct CurrentPlayers {
	#[serde(default)]
	pub player_count: Option<u64>,
}

/// `GET api.steampowered.com/IPlayerService/GetRecentlyPlayedGames/v1`
#[derive(Debug, Deserialize)]
pub(super) struct RecentlyPlayedResponse {
	pub response: RecentlyPlayed,
}

/// `games` is missing entirely for private profiles.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RecentlyPlayed {
	pub games: Vec<RecentlyPlayedGame>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RecentlyPlayedGame {
	pub appid: AppId,

	#[serde(default)]
	pub name: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn app_details_with_empty_requirements() -> crate::testing::Result {
		let mut response = serde_json::from_str::<AppDetailsResponse>(
			r#"{
				"730": {
					"success": true,
					"data": {
						"name": "Counter-Strike 2",
						"short_description": "For over two decades...",
						"release_date": { "coming_soon": false, "date": "21 ago. 2012" },
						"genres": [{ "id": "1", "description": "Ação" }],
						"categories": [{ "id": 1, "description": "Multijogador" }],
						"pc_requirements": []
					}
				}
			}"#,
		)?;

		let details = response
			.remove("730")
			.and_then(|entry| entry.data)
			.ok_or_else(|| anyhow::anyhow!("missing data"))?;

		assert_eq!(details.name.as_deref(), Some("Counter-Strike 2"));
		assert_eq!(details.genres[0].description, "Ação");
		assert!(details.price_overview.is_none());
		assert!(details.pc_requirements.minimum.is_empty());

		Ok(())
	}

	#[test]
	fn app_details_with_requirements() -> crate::testing::Result {
		let details = serde_json::from_str::<AppDetails>(
			r#"{ "pc_requirements": { "minimum": "<strong>Mínimos:</strong>" } }"#,
		)?;

		assert_eq!(details.pc_requirements.minimum, "<strong>Mínimos:</strong>");
		assert!(details.pc_requirements.recommended.is_empty());

		Ok(())
	}

	#[test]
	fn unsuccessful_app_details() -> crate::testing::Result {
		let response = serde_json::from_str::<AppDetailsResponse>(r#"{"999999999":{"success":false}}"#)?;

		assert!(response.get("999999999").is_some_and(|entry| !entry.success && entry.data.is_none()));

		Ok(())
	}

	#[test]
	fn reviews_page() -> crate::testing::Result {
		let page = serde_json::from_str::<ReviewsPage>(
			r#"{
				"success": 1,
				"query_summary": { "num_reviews": 1, "review_score_desc": "Muito positivas", "total_reviews": 1234 },
				"reviews": [{
					"recommendationid": "1",
					"author": { "steamid": "76561198282622073", "playtime_forever": 90 },
					"review": "gg",
					"voted_up": true
				}],
				"cursor": "AoJ4"
			}"#,
		)?;

		assert_eq!(page.success, 1);
		assert_eq!(page.query_summary.as_ref().map(|summary| summary.total_reviews), Some(1234));
		assert_eq!(page.reviews[0].author.playtime_forever, 90);
		assert_eq!(page.cursor.as_deref(), Some("AoJ4"));

		Ok(())
	}

	#[test]
	fn unknown_app_player_count() -> crate::testing::Result {
		let response = serde_json::from_str::<CurrentPlayersResponse>(r#"{"response":{"result":42}}"#)?;

		assert_eq!(response.response.player_count, None);

		Ok(())
	}

	#[test]
	fn private_profile() -> crate::testing::Result {
		let response = serde_json::from_str::<RecentlyPlayedResponse>(r#"{"response":{}}"#)?;

		assert!(response.response.games.is_empty());

		Ok(())
	}
}
