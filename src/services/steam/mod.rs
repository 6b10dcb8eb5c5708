//! This module contains the [`SteamService`].
//!
//! It talks to three upstreams: the Steam Web API (player counts, recently played games), the
//! Steam Store (app details, reviews), and SteamCharts (monthly player history, via
//! [`PlayerHistory`]).

use std::collections::HashMap;
use std::sync::Arc;

use derive_more::Debug;
use futures_util::{StreamExt, TryStreamExt, stream};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Credentials, SteamConfig};

mod app_id;
pub use app_id::{AppId, AppIdInput, InvalidAppId};

mod errors;
pub use errors::{Error, Upstream};

pub mod charts;
pub use charts::{PlayerHistory, SteamCharts};

pub mod models;
pub use models::{GameData, MonthlyPlayers, PlayerCount, RecentGame, Review, Sentiment};

pub mod requests;
pub use requests::{RecentGamesQuery, RequestError, ReviewedAppsQuery};

mod upstream;
use upstream::{AppDetails, ReviewsPage};

pub(crate) mod http;


/// How many upstream requests a single gateway request may have in flight at once.
///
/// Every fan-out is a `buffered(MAX_CONCURRENCY)` stream whose items issue their requests
/// sequentially.
const MAX_CONCURRENCY: usize = 4;

/// Steam refuses to return more reviews than this per page.
const MAX_REVIEWS_PER_PAGE: u32 = 100;

/// How many reviews are fetched for the summary in [`GameData`].
const MAX_SUMMARY_REVIEWS: u32 = 50;

/// The Steam service.
#[derive(Debug, Clone)]
pub struct SteamService {
	#[debug("reqwest::Client")]
	http_client: reqwest::Client,

	/// Steam WebAPI key. Only needed for player-specific endpoints.
	#[debug("{}", if api_key.is_some() { "Some(<redacted>)" } else { "None" })]
	api_key: Option<Arc<str>>,

	#[debug("{:?}", api_url.as_str())]
	api_url: Url,

	#[debug("{:?}", store_url.as_str())]
	store_url: Url,

	default_language: Arc<str>,
	history: Arc<dyn PlayerHistory>,
}

/// Query parameters for `appreviews`.
#[derive(Debug, Serialize)]
struct ReviewsParams<'a> {
	json: u8,
	filter: &'static str,
	language: &'a str,
	review_type: &'static str,
	purchase_type: &'static str,
	num_per_page: u32,
	cursor: &'a str,
}

impl<'a> ReviewsParams<'a> {
	fn recent(language: &'a str, num_per_page: u32, cursor: &'a str) -> Self {
		Self {
			json: 1,
			filter: "recent",
			language,
			review_type: "all",
			purchase_type: "all",
			num_per_page,
			cursor,
		}
	}
}

impl SteamService {
	/// Creates a new [`SteamService`] backed by [`SteamCharts`].
	pub fn new(config: &SteamConfig, credentials: &Credentials, http_client: reqwest::Client) -> Self {
		let history = SteamCharts::new(http_client.clone(), config.charts_url.clone());

		Self {
			api_key: credentials.steam_api_key.as_deref().map(Arc::from),
			api_url: config.api_url.clone(),
			store_url: config.store_url.clone(),
			default_language: Arc::from(&*config.default_language),
			history: Arc::new(history),
			http_client,
		}
	}

	/// Replaces the source of monthly player statistics.
	pub fn with_history(self, history: impl PlayerHistory) -> Self {
		Self {
			history: Arc::new(history),
			..self
		}
	}

	/// Builds the HTTP client shared by every upstream request.
	pub fn http_client(config: &SteamConfig) -> reqwest::Result<reqwest::Client> {
		reqwest::Client::builder()
			.timeout(config.request_timeout)
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()
	}

	/// The language used when a request does not specify one.
	pub fn default_language(&self) -> &str {
		&self.default_language
	}

	fn api_key(&self) -> Result<&str, Error> {
		self.api_key.as_deref().ok_or(Error::MissingApiKey)
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		upstream: Upstream,
		url: Url,
		query: &(impl Serialize + ?Sized),
	) -> Result<T, Error> {
		self.http_client
			.get(url)
			.query(query)
			.send()
			.await
			.and_then(reqwest::Response::error_for_status)
			.map_err(|error| Error::http(upstream, error))?
			.json::<T>()
			.await
			.map_err(|error| Error::http(upstream, error))
	}

	/// Fetches the number of players currently in-game.
	#[instrument(err(level = "debug"))]
	pub async fn get_current_players(&self, app_id: AppId) -> Result<PlayerCount, Error> {
		let url = endpoint(&self.api_url, &["ISteamUserStats", "GetNumberOfCurrentPlayers", "v1"]);
		let response = self
			.get_json::<upstream::CurrentPlayersResponse>(Upstream::WebApi, url, &[("appid", app_id)])
			.await
			.map_err(|error| error.not_found_as_unknown(app_id))?;

		response
			.response
			.player_count
			.map(|current_players| PlayerCount { current_players })
			.ok_or(Error::UnknownApp {
				upstream: Upstream::WebApi,
				app_id,
			})
	}

	/// Fetches an app's store page data.
	///
	/// Returns [`None`] if the store does not know the app.
	#[instrument(level = "debug", err(level = "debug"))]
	async fn get_app_details(&self, app_id: AppId, language: &str) -> Result<Option<AppDetails>, Error> {
		let url = endpoint(&self.store_url, &["api", "appdetails"]);
		let mut response = self
			.get_json::<upstream::AppDetailsResponse>(
				Upstream::Store,
				url,
				&[("appids", app_id.to_string().as_str()), ("l", language)],
			)
			.await?;

		let entry = response
			.remove(&app_id.to_string())
			.ok_or(Error::Unsuccessful {
				upstream: Upstream::Store,
			})?;

		Ok(entry.data.filter(|_| entry.success))
	}

	#[instrument(level = "debug", skip(params), fields(cursor = params.cursor), err(level = "debug"))]
	async fn get_reviews_page(&self, app_id: AppId, params: &ReviewsParams<'_>) -> Result<ReviewsPage, Error> {
		let url = endpoint(&self.store_url, &["appreviews", &app_id.to_string()]);
		let page = self
			.get_json::<ReviewsPage>(Upstream::Store, url, params)
			.await
			.map_err(|error| error.not_found_as_unknown(app_id))?;

		if page.success != 1 {
			return Err(Error::Unsuccessful {
				upstream: Upstream::Store,
			});
		}

		Ok(page)
	}

	/// Fetches store data, player counts, and recent reviews for every requested app.
	///
	/// Apps the store does not know are skipped.
	#[instrument(err(level = "debug"))]
	pub async fn get_game_data(&self, query: &ReviewedAppsQuery) -> Result<Vec<GameData>, Error> {
		let games = stream::iter(query.app_ids.iter().copied())
			.map(|app_id| self.get_single_game_data(app_id, &query.language, query.max_reviews))
			.buffered(MAX_CONCURRENCY)
			.try_collect::<Vec<_>>()
			.await?;

		Ok(games.into_iter().flatten().collect())
	}

	async fn get_single_game_data(
		&self,
		app_id: AppId,
		language: &str,
		max_reviews: u32,
	) -> Result<Option<GameData>, Error> {
		let Some(details) = self.get_app_details(app_id, language).await? else {
			warn!(%app_id, "store has no data for app; skipping");
			return Ok(None);
		};

		// Sequential, so each app holds at most one of the `MAX_CONCURRENCY` slots.
		let current_players = match self.get_current_players(app_id).await {
			Ok(PlayerCount { current_players }) => current_players,
			Err(Error::UnknownApp { .. }) => 0,
			Err(error) => return Err(error),
		};

		let params = ReviewsParams::recent(language, max_reviews.min(MAX_SUMMARY_REVIEWS), "*");
		let reviews = self.get_reviews_page(app_id, &params).await?;

		let summary = reviews.query_summary.unwrap_or_default();

		Ok(Some(GameData {
			app_id,
			name: details.name.unwrap_or_else(|| String::from("Unknown")),
			description: details.short_description,
			release_date: details.release_date.unwrap_or_default().date,
			genres: details.genres.into_iter().map(|genre| genre.description).collect(),
			categories: details
				.categories
				.into_iter()
				.map(|category| category.description)
				.collect(),
			price: details
				.price_overview
				.map(|price| price.final_formatted)
				.unwrap_or_default(),
			current_players,
			total_reviews: summary.total_reviews,
			review_score: summary.review_score_desc,
			reviews: reviews.reviews.into_iter().map(|review| review.review).collect(),
			pc_requirements_minimum: details.pc_requirements.minimum,
			pc_requirements_recommended: details.pc_requirements.recommended,
		}))
	}

	/// Fetches up to `max_reviews` recent reviews for every requested app.
	#[instrument(err(level = "debug"))]
	pub async fn get_reviews(&self, query: &ReviewedAppsQuery) -> Result<Vec<Review>, Error> {
		let reviews = stream::iter(query.app_ids.iter().copied())
			.map(|app_id| self.get_app_reviews(app_id, &query.language, query.max_reviews))
			.buffered(MAX_CONCURRENCY)
			.try_collect::<Vec<_>>()
			.await?;

		Ok(reviews.into_iter().flatten().collect())
	}

	/// Walks the review cursor of a single app.
	///
	/// Stops once `max_reviews` are collected, a page comes back empty, or the cursor stops moving.
	/// If a later page fails, whatever was collected so far is returned.
	async fn get_app_reviews(&self, app_id: AppId, language: &str, max_reviews: u32) -> Result<Vec<Review>, Error> {
		let limit = usize::try_from(max_reviews).unwrap_or(usize::MAX);
		let mut reviews = Vec::new();
		let mut cursor = String::from("*");

		while reviews.len() < limit {
			let remaining = u32::try_from(limit - reviews.len()).unwrap_or(u32::MAX);
			let params = ReviewsParams::recent(language, remaining.min(MAX_REVIEWS_PER_PAGE), &cursor);

			let page = match self.get_reviews_page(app_id, &params).await {
				Ok(page) => page,
				Err(error) if reviews.is_empty() => return Err(error),
				Err(error) => {
					warn!(%app_id, collected = reviews.len(), %error, "failed to fetch more reviews; returning partial result");
					break;
				},
			};

			if page.reviews.is_empty() {
				break;
			}

			let page_size = page.reviews.len().min(limit - reviews.len());

			reviews.extend(page.reviews.into_iter().take(page_size).map(|review| Review {
				app_id,
				review: review.review,
				user_id: review.author.steamid,
				hours_played: minutes_to_hours(review.author.playtime_forever),
				sentiment: review.voted_up.into(),
			}));

			match page.cursor {
				Some(next) if next != cursor => cursor = next,
				_ => break,
			}
		}

		Ok(reviews)
	}

	/// Finds out which games the recent reviewers of each app have been playing.
	///
	/// Requires the Steam WebAPI key.
	#[instrument(err(level = "debug"))]
	pub async fn get_recent_games(&self, query: &RecentGamesQuery) -> Result<Vec<RecentGame>, Error> {
		let api_key = self.api_key()?;
		let mut games = Vec::new();

		for &app_id in &query.app_ids {
			games.extend(self.get_recent_games_of_reviewers(app_id, api_key, query.num_players).await?);
		}

		Ok(games)
	}

	async fn get_recent_games_of_reviewers(
		&self,
		source_app_id: AppId,
		api_key: &str,
		num_players: u32,
	) -> Result<Vec<RecentGame>, Error> {
		let params = ReviewsParams::recent("all", num_players, "*");
		let page = self.get_reviews_page(source_app_id, &params).await?;

		let mut reviewers = Vec::<String>::new();

		for review in page.reviews {
			let steam_id = review.author.steamid;

			if !steam_id.is_empty() && !reviewers.contains(&steam_id) {
				reviewers.push(steam_id);
			}
		}

		debug!(%source_app_id, reviewers = reviewers.len(), "fetching recently played games");

		let url = endpoint(&self.api_url, &["IPlayerService", "GetRecentlyPlayedGames", "v1"]);
		let played = stream::iter(reviewers)
			.map(|steam_id| {
				let url = url.clone();

				async move {
					let query = [("key", api_key), ("steamid", steam_id.as_str())];

					match self
						.get_json::<upstream::RecentlyPlayedResponse>(Upstream::WebApi, url, &query)
						.await
					{
						Ok(response) => response.response.games,
						Err(error) => {
							debug!(%steam_id, %error, "skipping reviewer");
							Vec::new()
						},
					}
				}
			})
			.buffered(MAX_CONCURRENCY)
			.collect::<Vec<_>>()
			.await;

		let mut counts = HashMap::<AppId, RecentGame>::new();

		for game in played.into_iter().flatten() {
			counts
				.entry(game.appid)
				.or_insert_with(|| RecentGame {
					name: game.name,
					app_id: game.appid,
					player_count: 0,
					source_app_id,
				})
				.player_count += 1;
		}

		let mut games = counts.into_values().collect::<Vec<_>>();

		games.sort_by(|lhs, rhs| {
			rhs.player_count
				.cmp(&lhs.player_count)
				.then(lhs.app_id.cmp(&rhs.app_id))
		});

		Ok(games)
	}

	/// Fetches the monthly player history of every requested app.
	#[instrument(err(level = "debug"))]
	pub async fn get_historical_data(&self, app_ids: &[AppId]) -> Result<Vec<MonthlyPlayers>, Error> {
		let history = stream::iter(app_ids.iter().copied())
			.map(|app_id| self.history.monthly_players(app_id))
			.buffered(MAX_CONCURRENCY)
			.try_collect::<Vec<_>>()
			.await?;

		Ok(history.into_iter().flatten().collect())
	}
}

/// Appends path segments to a base URL.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
	let mut url = base.clone();

	if let Ok(mut path) = url.path_segments_mut() {
		path.pop_if_empty().extend(segments);
	}

	url
}

#[expect(clippy::cast_precision_loss, reason = "nobody has played for 2^52 minutes")]
fn minutes_to_hours(minutes: u64) -> f64 {
	minutes as f64 / 60.0
}
