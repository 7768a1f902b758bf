use poem::web::cookie::CookieJar;
use poem::web::Data;
use poem::{handler, IntoResponse, Response};

use crate::model;
use crate::prelude::*;
use crate::web::session::Session;
use crate::web::state::State;

const CACHE_CONTROL: &str = "no-store";

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(jar: &CookieJar, Data(state): Data<&State>) -> poem::Result<Response> {
    let session = Session::open(state, jar);
    let coefficients = session.load_model().await?.coefficients()?;
    let samples = session
        .load_samples()
        .await?
        .ok_or(model::Error::MissingSamples)?;

    let start_instant = Instant::now();
    let markup = crate::plot::render(&samples, coefficients)?;
    debug!(elapsed = ?start_instant.elapsed(), "rendered");

    Ok(markup
        .into_string()
        .with_content_type("image/svg+xml")
        .with_header("Cache-Control", CACHE_CONTROL)
        .into_response())
}
