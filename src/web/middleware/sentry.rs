use std::collections::BTreeMap;

use poem::http::header;
use poem::{Endpoint, Middleware, Request, Result};

/// Tags the Sentry scope with the request being handled and the state store behind it.
pub struct SentryMiddleware {
    pub store: &'static str,
}

impl<E: Endpoint> Middleware<E> for SentryMiddleware {
    type Output = SentryMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        SentryMiddlewareImpl {
            ep,
            store: self.store,
        }
    }
}

pub struct SentryMiddlewareImpl<E> {
    ep: E,
    store: &'static str,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for SentryMiddlewareImpl<E> {
    type Output = E::Output;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        sentry::configure_scope(|scope| {
            scope.set_transaction(Some(&format!("{} {}", request.method(), request.uri().path())));
            scope.set_tag("app", "linreg");
            scope.set_tag("store", self.store);
            scope.set_tag("request.remote_addr", request.remote_addr());

            let mut context = BTreeMap::new();
            for (key, name) in [("content_length", header::CONTENT_LENGTH), ("origin", header::ORIGIN)] {
                context.insert(key.to_string(), header_value(&request, name).into());
            }
            scope.set_context("request", sentry::protocol::Context::Other(context));
        });
        self.ep.call(request).await
    }
}

fn header_value(request: &Request, name: header::HeaderName) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}
