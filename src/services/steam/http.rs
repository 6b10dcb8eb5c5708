//! HTTP handlers for this service.

use axum::extract::State;
use axum::{Router, routing};

use super::requests::{
	CurrentPlayersRequest,
	GameDataRequest,
	GameReviewsRequest,
	HistoricalDataRequest,
	RecentGamesRequest,
};
use super::{GameData, MonthlyPlayers, PlayerCount, RecentGame, Review, SteamService};
use crate::http::{AsErrorResponse, ErrorBody, Json, Result, Success, SuccessBody};

impl From<SteamService> for Router {
	fn from(svc: SteamService) -> Self {
		Router::new()
			.route("/steam/game-data", routing::post(game_data))
			.route("/steam/current-players", routing::post(current_players))
			.route("/steam/historical-data", routing::post(historical_data))
			.route("/steam/game-reviews", routing::post(game_reviews))
			.route("/steam/recent-games", routing::post(recent_games))
			.with_state(svc)
	}
}

/// Store data, live player counts, and recent reviews for one or more apps.
///
/// Apps the Steam Store does not know are left out of the result.
#[instrument(skip(svc), err(Debug, level = "debug"))]
#[utoipa::path(
	post,
	path = "/steam/game-data",
	tag = "Steam",
	request_body = GameDataRequest,
	responses(
		(status = 200, body = SuccessBody<Vec<GameData>>),
		(status = 400, description = "missing or invalid app IDs", body = ErrorBody),
		(status = 502, description = "Steam could not be reached", body = ErrorBody),
		(status = 504, description = "Steam took too long to respond", body = ErrorBody),
	),
)]
pub(crate) async fn game_data(
	State(svc): State<SteamService>,
	Json(request): Json<GameDataRequest>,
) -> Result<Success<Vec<GameData>>> {
	let query = request
		.validate(svc.default_language())
		.map_err(|error| error.as_error_response())?;

	let games = svc
		.get_game_data(&query)
		.await
		.map_err(|error| error.as_error_response())?;

	Ok(Success(games))
}

/// The number of players currently in-game.
#[instrument(skip(svc), err(Debug, level = "debug"))]
#[utoipa::path(
	post,
	path = "/steam/current-players",
	tag = "Steam",
	request_body = CurrentPlayersRequest,
	responses(
		(status = 200, body = SuccessBody<PlayerCount>),
		(status = 400, description = "missing or invalid app ID", body = ErrorBody),
		(status = 404, description = "unknown app", body = ErrorBody),
		(status = 502, description = "Steam could not be reached", body = ErrorBody),
	),
)]
pub(crate) async fn current_players(
	State(svc): State<SteamService>,
	Json(request): Json<CurrentPlayersRequest>,
) -> Result<Success<PlayerCount>> {
	let app_id = request.validate().map_err(|error| error.as_error_response())?;
	let player_count = svc
		.get_current_players(app_id)
		.await
		.map_err(|error| error.as_error_response())?;

	Ok(Success(player_count))
}

/// Monthly player history, scraped from SteamCharts.
#[instrument(skip(svc), err(Debug, level = "debug"))]
#[utoipa::path(
	post,
	path = "/steam/historical-data",
	tag = "Steam",
	request_body = HistoricalDataRequest,
	responses(
		(status = 200, body = SuccessBody<Vec<MonthlyPlayers>>),
		(status = 400, description = "missing or invalid app IDs", body = ErrorBody),
		(status = 404, description = "SteamCharts does not track this app", body = ErrorBody),
		(status = 502, description = "SteamCharts could not be reached or scraped", body = ErrorBody),
	),
)]
pub(crate) async fn historical_data(
	State(svc): State<SteamService>,
	Json(request): Json<HistoricalDataRequest>,
) -> Result<Success<Vec<MonthlyPlayers>>> {
	let app_ids = request.validate().map_err(|error| error.as_error_response())?;
	let history = svc
		.get_historical_data(&app_ids)
		.await
		.map_err(|error| error.as_error_response())?;

	Ok(Success(history))
}

/// Recent user reviews.
#[instrument(skip(svc), err(Debug, level = "debug"))]
#[utoipa::path(
	post,
	path = "/steam/game-reviews",
	tag = "Steam",
	request_body = GameReviewsRequest,
	responses(
		(status = 200, body = SuccessBody<Vec<Review>>),
		(status = 400, description = "missing or invalid app IDs", body = ErrorBody),
		(status = 404, description = "unknown app", body = ErrorBody),
		(status = 502, description = "Steam could not be reached", body = ErrorBody),
	),
)]
pub(crate) async fn game_reviews(
	State(svc): State<SteamService>,
	Json(request): Json<GameReviewsRequest>,
) -> Result<Success<Vec<Review>>> {
	let query = request
		.validate(svc.default_language())
		.map_err(|error| error.as_error_response())?;

	let reviews = svc
		.get_reviews(&query)
		.await
		.map_err(|error| error.as_error_response())?;

	Ok(Success(reviews))
}

/// Games recently played by the people who recently reviewed an app.
#[instrument(skip(svc), err(Debug, level = "debug"))]
#[utoipa::path(
	post,
	path = "/steam/recent-games",
	tag = "Steam",
	request_body = RecentGamesRequest,
	responses(
		(status = 200, body = SuccessBody<Vec<RecentGame>>),
		(status = 400, description = "missing or invalid app IDs", body = ErrorBody),
		(status = 500, description = "no Steam WebAPI key configured", body = ErrorBody),
		(status = 502, description = "Steam could not be reached", body = ErrorBody),
	),
)]
pub(crate) async fn recent_games(
	State(svc): State<SteamService>,
	Json(request): Json<RecentGamesRequest>,
) -> Result<Success<Vec<RecentGame>>> {
	let query = request.validate().map_err(|error| error.as_error_response())?;
	let games = svc
		.get_recent_games(&query)
		.await
		.map_err(|error| error.as_error_response())?;

	Ok(Success(games))
}
