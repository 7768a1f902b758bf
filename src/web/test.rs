use std::collections::BTreeMap;

use itertools::Itertools;
use poem::http::header;
use poem::test::{TestClient, TestRequestBuilder, TestResponse};
use poem::web::cookie::CookieKey;
use poem::Endpoint;

use crate::prelude::*;
use crate::web::create_app;
use crate::web::state::{Backend, State};

pub fn create_standalone_test_client(backend: Backend) -> TestClient<impl Endpoint> {
    let state = State::new(backend, StdDuration::from_secs(3600));
    TestClient::new(create_app(state, CookieKey::generate()))
}

/// Remembers the cookies set by the responses, like a browser would.
#[derive(Default)]
pub struct Cookies(BTreeMap<String, String>);

impl Cookies {
    pub fn update(&mut self, response: &TestResponse) {
        for value in response.0.headers().get_all(header::SET_COOKIE) {
            let pair = value
                .to_str()
                .ok()
                .and_then(|value| value.split(';').next())
                .and_then(|pair| pair.split_once('='));
            if let Some((name, value)) = pair {
                self.0.insert(name.trim().to_string(), value.trim().to_string());
            }
        }
    }

    pub fn apply<'a, E: Endpoint>(
        &self,
        request: TestRequestBuilder<'a, E>,
    ) -> TestRequestBuilder<'a, E> {
        if self.0.is_empty() {
            return request;
        }
        let value = self
            .0
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .join("; ");
        request.header(header::COOKIE, value)
    }
}

pub async fn into_json(response: TestResponse) -> Result<serde_json::Value> {
    let body = response.0.into_body().into_string().await?;
    Ok(serde_json::from_str(&body)?)
}
