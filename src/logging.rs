use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::{Level, Metadata};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::opts::LoggingOpts;
use crate::prelude::*;

/// Initialises Sentry and tracing.
///
/// The returned guard flushes pending Sentry events when dropped.
pub fn init(opts: &LoggingOpts) -> Result<ClientInitGuard> {
    let sentry_filter = EnvFilter::try_new(&opts.sentry_log)
        .with_context(|| format!("invalid Sentry log filter `{}`", opts.sentry_log))?;
    let format_filter = EnvFilter::try_new(&opts.log)
        .with_context(|| format!("invalid log filter `{}`", opts.log))?;

    let guard = sentry::init((
        opts.sentry_dsn.as_deref(),
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate: opts.traces_sample_rate,
            ..Default::default()
        },
    ));

    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(event_filter)
        .span_filter(|metadata| metadata.level() <= &Level::DEBUG)
        .with_filter(sentry_filter);
    let format_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_filter(format_filter);

    tracing_subscriber::Registry::default()
        .with(sentry_layer)
        .with(format_layer)
        .try_init()
        .context("failed to initialise tracing")?;

    Ok(guard)
}

/// Warnings and errors are reported, the rest only leaves breadcrumbs.
fn event_filter(metadata: &Metadata) -> EventFilter {
    if metadata.level() <= &Level::WARN {
        EventFilter::Event
    } else {
        EventFilter::Breadcrumb
    }
}
