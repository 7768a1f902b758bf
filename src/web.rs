use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, CookieJarManager, Cors, Tracing};
use poem::web::cookie::CookieKey;
use poem::{get, post, Endpoint, EndpointExt, Route, Server};

use crate::opts::WebOpts;
use crate::prelude::*;
use crate::web::middleware::{ErrorMiddleware, SecurityHeadersMiddleware, SentryMiddleware};
use crate::web::state::State;

pub mod cookies;
mod middleware;
mod session;
pub mod state;
#[cfg(test)]
mod test;
mod views;

const SHUTDOWN_TIMEOUT: StdDuration = StdDuration::from_secs(5);

pub async fn run(opts: WebOpts) -> Result {
    let state = State::from_opts(&opts).await?;
    let cookie_key = opts.cookie_key.unwrap_or_else(|| {
        warn!("no cookie key is set, sessions will not survive a restart");
        CookieKey::generate()
    });
    let app = create_app(state, cookie_key);

    info!(host = opts.host.as_str(), port = opts.port, "listening…");
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run_with_graceful_shutdown(app, shutdown_signal(), Some(SHUTDOWN_TIMEOUT))
        .await?;
    info!("stopped");
    Ok(())
}

/// Browsers may call the API from any origin, cookies included.
pub fn create_app(state: State, cookie_key: CookieKey) -> impl Endpoint {
    let store = state.backend.name();
    Route::new()
        .at("/train", post(views::train::post))
        .at("/predict", post(views::predict::post))
        .at("/coefficients", get(views::coefficients::get))
        .at("/plot", get(views::plot::get))
        .at("/health", get(views::api::get_health))
        .data(state)
        .with(CookieJarManager::with_key(cookie_key))
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(Cors::new().allow_credentials(true))
        .with(SecurityHeadersMiddleware)
        .with(SentryMiddleware { store })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down…"),
        Err(error) => {
            error!("failed to listen for the shutdown signal: {:#}", error);
            std::future::pending::<()>().await;
        }
    }
}
