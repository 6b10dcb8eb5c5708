/*
 * steam-gateway - a JSON gateway over Steam's web APIs.
 * Copyright (C) 2025  AlphaKeks <alphakeks@dawn.sh>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

#[macro_use]
extern crate tracing as _;

#[cfg(test)]
mod testing;

mod http;
mod logging;
mod signals;

pub mod config;
pub use config::Config;

pub mod openapi;
pub mod services;

use self::services::{HealthService, SteamService};

/// Runs the HTTP server.
pub async fn run(config: Config) -> Result<(), RunError> {
	let tracing_guard = logging::init(&config.tracing).map_err(RunError::InitLogging)?;

	info!(credentials = ?config.credentials, "loaded upstream credentials");

	if config.credentials.steam_api_key.is_none() {
		warn!("`STEAM_API_KEY` is not set; `/steam/recent-games` will not work");
	}

	let http_client = SteamService::http_client(&config.steam).map_err(RunError::BuildHttpClient)?;
	let steam_service = SteamService::new(&config.steam, &config.credentials, http_client);
	let service = router(&config, steam_service)?.into_make_service_with_connect_info::<SocketAddr>();

	let tcp_listener = TcpListener::bind(config.http.socket_addr()).await?;
	let addr = tcp_listener.local_addr()?;

	info!(%addr, "listening for http requests");

	axum::serve(tcp_listener, service)
		.with_graceful_shutdown(signals::shutdown())
		.await?;

	warn!("shut down");

	drop(tracing_guard);

	Ok(())
}

/// Builds the full application: every route, plus fallbacks and middleware.
pub(crate) fn router(config: &Config, steam_service: SteamService) -> Result<axum::Router, RunError> {
	let router = axum::Router::new()
		.merge(HealthService::new())
		.merge(steam_service)
		.merge(openapi::router(config.http.public_url.as_ref())?);

	Ok(http::finish(router, config.tracing.include_http_headers))
}

/// Errors returned by [`run()`].
#[derive(Debug, Error)]
pub enum RunError {
	#[error("failed to initialize logging: {0}")]
	InitLogging(#[source] io::Error),

	#[error("failed to build HTTP client: {0}")]
	BuildHttpClient(#[source] reqwest::Error),

	#[error("failed to serialize OpenAPI document: {0}")]
	SerializeOpenApi(#[from] serde_json::Error),

	/// Binding or serving the TCP listener failed.
	#[error(transparent)]
	Io(#[from] io::Error),
}
