use clap::Parser;

use crate::opts::Opts;
use crate::prelude::*;

mod logging;
mod model;
mod opts;
mod plot;
mod prelude;
mod registry;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = logging::init(&opts.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");
    web::run(opts.web).await
}
