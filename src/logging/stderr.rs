//! Human-readable logs on stderr.

use std::io;

use tracing_subscriber::Layer;
use tracing_subscriber::registry::LookupSpan;

use crate::config::tracing::StderrConfig;

/// Creates a tracing layer that pretty-prints logs to stderr.
///
/// Source locations are only included in debug builds.
pub(super) fn layer<S>(config: &StderrConfig) -> Option<impl Layer<S>>
where
	S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
	config.enable.then(|| {
		tracing_subscriber::fmt::layer()
			.pretty()
			.with_ansi(config.ansi)
			.with_file(cfg!(debug_assertions))
			.with_line_number(cfg!(debug_assertions))
			.with_span_events(super::span_events(config.span_events))
			.with_target(true)
			.with_writer(io::stderr)
	})
}
