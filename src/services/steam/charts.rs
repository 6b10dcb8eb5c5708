//! Monthly player history.
//!
//! Steam does not publish historical player counts, so they are scraped from SteamCharts. Handlers
//! only ever see the [`PlayerHistory`] trait, which makes the scraper easy to swap out in tests.

use std::fmt;

use futures_util::future::BoxFuture;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::errors::{Error, Upstream};
use super::models::MonthlyPlayers;
use super::{AppId, endpoint};

/// A source of monthly player statistics.
pub trait PlayerHistory: fmt::Debug + Send + Sync + 'static {
	/// Returns the monthly history of `app_id`, most recent month first.
	fn monthly_players(&self, app_id: AppId) -> BoxFuture<'_, Result<Vec<MonthlyPlayers>, Error>>;
}

/// Scrapes `steamcharts.com/app/{app_id}`.
#[derive(Debug, Clone)]
pub struct SteamCharts {
	http_client: reqwest::Client,
	base_url: Url,
}

impl SteamCharts {
	pub fn new(http_client: reqwest::Client, base_url: Url) -> Self {
		Self { http_client, base_url }
	}

	#[instrument(level = "debug", skip(self), err(level = "debug"))]
	async fn fetch(&self, app_id: AppId) -> Result<Vec<MonthlyPlayers>, Error> {
		let url = endpoint(&self.base_url, &["app", &app_id.to_string()]);
		let html = self
			.http_client
			.get(url)
			.send()
			.await
			.and_then(reqwest::Response::error_for_status)
			.map_err(|error| Error::http(Upstream::SteamCharts, error).not_found_as_unknown(app_id))?
			.text()
			.await
			.map_err(|error| Error::http(Upstream::SteamCharts, error))?;

		parse_history(app_id, &html)
	}
}

impl PlayerHistory for SteamCharts {
	fn monthly_players(&self, app_id: AppId) -> BoxFuture<'_, Result<Vec<MonthlyPlayers>, Error>> {
		Box::pin(self.fetch(app_id))
	}
}

/// Extracts the rows of the `table.common-table` on a SteamCharts app page.
///
/// The columns are: month, average players, gain, % gain, peak players. Rows without `<td>`s are
/// headers. Rows with fewer than five cells are skipped.
pub(super) fn parse_history(app_id: AppId, html: &str) -> Result<Vec<MonthlyPlayers>, Error> {
	let document = Html::parse_document(html);
	let table_selector = selector("table.common-table");
	let row_selector = selector("tr");
	let cell_selector = selector("td");

	let table = document
		.select(&table_selector)
		.next()
		.ok_or(Error::MalformedPage {
			upstream: Upstream::SteamCharts,
			app_id,
			reason: "missing player history table",
		})?;

	let mut history = Vec::new();

	for row in table.select(&row_selector) {
		let cells = row.select(&cell_selector).map(cell_text).collect::<Vec<_>>();

		let [month, average, gain, gain_percent, peak, ..] = cells.as_slice() else {
			if !cells.is_empty() {
				warn!(%app_id, cells = cells.len(), "skipping incomplete player history row");
			}

			continue;
		};

		history.push(MonthlyPlayers {
			app_id,
			month: month.clone(),
			average_players: parse_number(average),
			gain: parse_number(gain),
			gain_percent: parse_number(gain_percent),
			peak_players: parse_count(peak),
		});
	}

	Ok(history)
}

fn cell_text(cell: ElementRef<'_>) -> String {
	cell.text().collect::<String>().trim().to_owned()
}

/// Parses numbers like `912,345.5`, `+1,234.5` or `-3.25%`. SteamCharts shows `-` for "no data".
fn parse_number(text: &str) -> Option<f64> {
	let cleaned = text
		.chars()
		.filter(|&symbol| !matches!(symbol, ',' | '+' | '%'))
		.collect::<String>();

	cleaned.trim().parse().ok()
}

fn parse_count(text: &str) -> Option<u64> {
	text.replace(',', "").trim().parse().ok()
}

#[expect(clippy::expect_used, reason = "the selectors are hardcoded")]
fn selector(css: &'static str) -> Selector {
	Selector::parse(css).expect("valid css selector")
}

#[cfg(test)]
mod tests {
	use axum::Router;
	use axum::routing::get;
	use http::StatusCode;

	use super::*;
	use crate::testing;

	const PAGE: &str = r#"
		<!DOCTYPE html>
		<html>
		<body>
			<div id="app-heading"><h1 id="app-title">Counter-Strike 2</h1></div>
			<table class="common-table">
				<thead>
					<tr><th>Month</th><th>Avg. Players</th><th>Gain</th><th>% Gain</th><th>Peak Players</th></tr>
				</thead>
				<tbody>
					<tr class="odd">
						<td class="month-cell left italic">Last 30 Days</td>
						<td class="right num-f italic">1,012,345.67</td>
						<td class="right num-p gainorloss italic">+12,345.6</td>
						<td class="right gainorloss italic">+1.23%</td>
						<td class="right num italic">1,802,853</td>
					</tr>
					<tr>
						<td class="month-cell left">March 2025</td>
						<td class="right num-f">1,000,000.07</td>
						<td class="right num-p gainorloss">-3,210.5</td>
						<td class="right gainorloss">-0.32%</td>
						<td class="right num">1,700,001</td>
					</tr>
					<tr><td>broken</td><td>1</td></tr>
					<tr>
						<td class="month-cell left">August 2012</td>
						<td class="right num-f">13,012.4</td>
						<td class="right num-p gainorloss">-</td>
						<td class="right gainorloss">-</td>
						<td class="right num">18,321</td>
					</tr>
				</tbody>
			</table>
		</body>
		</html>
	"#;

	fn app_id() -> AppId {
		AppId::new(730).unwrap_or_else(|| unreachable!())
	}

	#[test]
	fn parses_rows() -> testing::Result {
		let history = parse_history(app_id(), PAGE)?;

		assert_eq!(history.len(), 3);

		assert_eq!(history[0].month, "Last 30 Days");
		assert_eq!(history[0].average_players, Some(1_012_345.67));
		assert_eq!(history[0].gain, Some(12_345.6));
		assert_eq!(history[0].gain_percent, Some(1.23));
		assert_eq!(history[0].peak_players, Some(1_802_853));

		assert_eq!(history[1].gain, Some(-3_210.5));
		assert_eq!(history[1].gain_percent, Some(-0.32));

		assert_eq!(history[2].month, "August 2012");
		assert_eq!(history[2].gain, None);
		assert_eq!(history[2].gain_percent, None);
		assert_eq!(history[2].peak_players, Some(18_321));

		Ok(())
	}

	#[test]
	fn missing_table_is_malformed() {
		let result = parse_history(app_id(), "<html><body><p>Not here.</p></body></html>");

		assert!(matches!(result, Err(Error::MalformedPage { .. })));
	}

	#[tokio::test]
	async fn scrapes_over_http() -> testing::Result {
		let upstream = testing::spawn_upstream(
			Router::new()
				.route("/app/730", get(|| async { PAGE }))
				.route("/app/10", get(|| async { (StatusCode::NOT_FOUND, "not found") })),
		)
		.await?;

		let charts = SteamCharts::new(testing::http_client()?, upstream);

		assert_eq!(charts.monthly_players(app_id()).await?.len(), 3);

		let unknown = AppId::new(10).unwrap_or_else(|| unreachable!());
		let result = charts.monthly_players(unknown).await;

		assert!(matches!(result, Err(Error::UnknownApp { app_id, .. }) if app_id == unknown));

		Ok(())
	}
}
