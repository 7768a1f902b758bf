use poem::web::cookie::CookieJar;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};
use serde::Serialize;

use crate::model::{Regression, Samples};
use crate::prelude::*;
use crate::web::session::Session;
use crate::web::state::State;

#[derive(Serialize)]
struct TrainResponse {
    message: &'static str,
}

/// Fits a fresh model on the posted samples.
///
/// Nothing is stored unless the fit succeeds, so the previous model survives a bad request.
/// The model is written last: if storing the samples fails, the previous model stays in place.
#[handler]
#[instrument(skip_all, level = "info", fields(n_samples = samples.len()))]
pub async fn post(
    Json(samples): Json<Samples>,
    jar: &CookieJar,
    Data(state): Data<&State>,
) -> poem::Result<Response> {
    let session = Session::open(state, jar);

    let mut model = Regression::new();
    model.fit(&samples.x, &samples.y)?;
    info!(slope = model.slope()?, intercept = model.intercept()?, "fitted");

    session.store_samples(&samples).await?;
    session.store_model(&model).await?;

    let response = TrainResponse {
        message: "Model trained successfully",
    };
    Ok(Json(response).into_response())
}
