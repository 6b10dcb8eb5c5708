//! Logging setup.

use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{SpanEvents, TracingConfig};

mod files;
mod stderr;

/// Installs the global tracing subscriber.
///
/// The returned guard flushes the file writer when dropped, so it has to be kept alive for as long
/// as the process wants to write logs.
pub(crate) fn init(config: &TracingConfig) -> io::Result<Option<WorkerGuard>> {
	if !config.enable {
		return Ok(None);
	}

	let stderr = stderr::layer(&config.stderr);
	let (files, guard) = files::layer(&config.files)?.unzip();

	tracing_subscriber::registry()
		.with(Layer::and_then(stderr, files).with_filter(config.env_filter()))
		.try_init()
		.map_err(io::Error::other)?;

	info!("initialized tracing");

	Ok(guard)
}

fn span_events(events: SpanEvents) -> FmtSpan {
	match events {
		SpanEvents::None => FmtSpan::NONE,
		SpanEvents::Close => FmtSpan::CLOSE,
		SpanEvents::Full => FmtSpan::FULL,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn span_events_map_to_fmt_spans() {
		assert_eq!(span_events(SpanEvents::None), FmtSpan::NONE);
		assert_eq!(span_events(SpanEvents::Close), FmtSpan::CLOSE);
		assert_eq!(span_events(SpanEvents::Full), FmtSpan::FULL);
	}
}
