//! `tracing` output routed to the browser console.

use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

/// Install the console subscriber. Debug builds log at `DEBUG`.
pub fn init() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    subscriber(level).init();
}

fn subscriber(level: LevelFilter) -> impl Subscriber + Send + Sync + 'static {
    let console = fmt::layer()
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(level);
    tracing_subscriber::registry().with(console)
}
