use poem::web::cookie::CookieJar;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::web::session::Session;
use crate::web::state::State;

#[derive(Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "X")]
    pub x: Vec<f64>,
}

#[derive(Serialize)]
struct PredictResponse {
    prediction: [f64; 1],
}

#[handler]
#[instrument(skip_all, level = "info", fields(n_values = request.x.len()))]
pub async fn post(
    Json(request): Json<PredictRequest>,
    jar: &CookieJar,
    Data(state): Data<&State>,
) -> poem::Result<Response> {
    let model = Session::open(state, jar).load_model().await?;
    let prediction = model.predict(&request.x)?;
    debug!(prediction);
    Ok(Json(PredictResponse {
        prediction: [prediction],
    })
    .into_response())
}
