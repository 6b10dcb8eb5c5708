//! steam-gateway - a JSON gateway over Steam's web APIs.
//! Copyright (C) 2025  AlphaKeks <alphakeks@dawn.sh>
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program. If not, see https://www.gnu.org/licenses.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use steam_gateway::Config;

mod cli;

const DEFAULT_CONFIG_PATH: &str = "./steam-gateway.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	if let Err(error) = dotenvy::dotenv() {
		if !error.not_found() {
			return Err(error).context("failed to load `.env` file");
		}
	}

	let cli_args = cli::args();

	if cli_args.action.unwrap_or_default() == cli::Action::Openapi {
		let schema = steam_gateway::openapi::Schema::json().context("failed to serialize OpenAPI document")?;

		return writeln!(io::stdout().lock(), "{schema}").context("failed to write to stdout");
	}

	let mut config = if let Some(config_path) = cli_args.config_path.as_deref() {
		load_config(config_path)?
	} else if fs::exists(DEFAULT_CONFIG_PATH)? {
		load_config(Path::new(DEFAULT_CONFIG_PATH))?
	} else {
		Config::from_env()
	};

	cli_args.apply_to_config(&mut config);

	steam_gateway::run(config).await.context("failed to run gateway")
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
	Config::load_from_file(path).with_context(|| format!("failed to load `{}`", path.display()))
}
