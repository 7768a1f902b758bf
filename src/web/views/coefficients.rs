use poem::web::cookie::CookieJar;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};

use crate::prelude::*;
use crate::web::session::Session;
use crate::web::state::State;

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(jar: &CookieJar, Data(state): Data<&State>) -> poem::Result<Response> {
    let model = Session::open(state, jar).load_model().await?;
    Ok(Json(model.coefficients()?).into_response())
}
