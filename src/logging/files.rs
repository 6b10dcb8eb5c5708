//! JSON logs, one file per day.

use std::{fs, io};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::Layer;
use tracing_subscriber::registry::LookupSpan;

use crate::config::tracing::FilesConfig;

/// Creates a tracing layer that writes one JSON object per line to daily-rotated files.
///
/// Writes happen on a background thread; the returned [`WorkerGuard`] flushes it on drop.
pub(super) fn layer<S>(config: &FilesConfig) -> io::Result<Option<(impl Layer<S>, WorkerGuard)>>
where
	S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
	if !config.enable {
		return Ok(None);
	}

	fs::create_dir_all(&config.directory)?;

	let mut appender = RollingFileAppender::builder()
		.rotation(Rotation::DAILY)
		.filename_prefix(&*config.filename_prefix)
		.filename_suffix("json");

	if let Some(max_files) = config.max_files {
		appender = appender.max_log_files(max_files.get());
	}

	let (writer, guard) = appender
		.build(&config.directory)
		.map(tracing_appender::non_blocking)
		.map_err(io::Error::other)?;

	let layer = tracing_subscriber::fmt::layer()
		.json()
		.flatten_event(true)
		.with_current_span(true)
		.with_span_list(false)
		.with_file(true)
		.with_line_number(true)
		.with_span_events(super::span_events(config.span_events))
		.with_thread_ids(true)
		.with_writer(writer);

	Ok(Some((layer, guard)))
}
