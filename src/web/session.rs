//! Caller identity and the state attached to it.

use poem::web::cookie::CookieJar;

use crate::model::{codec, Regression, Samples};
use crate::prelude::*;
use crate::registry::{BlobTooLarge, CookieRegistry, Registry};
use crate::web::cookies;
use crate::web::state::{Backend, State};

pub struct Session<'a> {
    identity: String,
    registry: SessionRegistry<'a>,
}

enum SessionRegistry<'a> {
    Shared(&'a dyn Registry),
    Cookie(CookieRegistry<'a>),
}

impl<'a> Session<'a> {
    pub const COOKIE_NAME: &'static str = "session-id";

    /// Picks up the caller identity from the private cookie, or starts a new session.
    /// Either way, the cookie expiry is renewed.
    pub fn open(state: &'a State, jar: &'a CookieJar) -> Self {
        let private = jar.private();
        let identity = match private.get(Self::COOKIE_NAME) {
            Some(cookie) if is_identity(cookie.value_str()) => cookie.value_str().to_string(),
            _ => {
                let identity = new_identity();
                debug!(%identity, "starting a new session");
                identity
            }
        };
        cookies::Builder::new(Self::COOKIE_NAME)
            .value(identity.as_str())
            .max_age(state.session_ttl)
            .add_to(&private);

        let registry = match &state.backend {
            Backend::Shared(registry) => SessionRegistry::Shared(registry.as_ref()),
            Backend::Cookie => SessionRegistry::Cookie(CookieRegistry::new(jar, state.session_ttl)),
        };
        Self { identity, registry }
    }

    /// Missing state reads as an untrained model.
    #[instrument(skip_all, fields(identity = self.identity.as_str()))]
    pub async fn load_model(&self) -> poem::Result<Regression> {
        let model = match self.registry().get(&self.model_key()).await? {
            Some(record) => codec::decode(&record)?,
            None => Regression::Untrained,
        };
        debug!(is_trained = model.is_trained());
        Ok(model)
    }

    #[instrument(skip_all, fields(identity = self.identity.as_str()))]
    pub async fn store_model(&self, model: &Regression) -> poem::Result<()> {
        self.registry()
            .put(&self.model_key(), codec::encode(model))
            .await
            .map_err(|error| into_poem_error(error, "failed to store the model"))
    }

    #[instrument(skip_all, fields(identity = self.identity.as_str()))]
    pub async fn load_samples(&self) -> poem::Result<Option<Samples>> {
        let samples = match self.registry().get(&self.samples_key()).await? {
            Some(blob) => Some(
                serde_json::from_slice(&blob)
                    .map_err(|_| crate::model::Error::CorruptState("malformed training samples"))?,
            ),
            None => None,
        };
        Ok(samples)
    }

    #[instrument(skip_all, fields(identity = self.identity.as_str()))]
    pub async fn store_samples(&self, samples: &Samples) -> poem::Result<()> {
        let blob = serde_json::to_vec(samples).context("failed to serialize the samples")?;
        self.registry()
            .put(&self.samples_key(), blob)
            .await
            .map_err(|error| into_poem_error(error, "failed to store the training samples"))
    }

    fn registry(&self) -> &dyn Registry {
        match &self.registry {
            SessionRegistry::Shared(registry) => *registry,
            SessionRegistry::Cookie(registry) => registry,
        }
    }

    fn model_key(&self) -> String {
        format!("model.{}", self.identity)
    }

    fn samples_key(&self) -> String {
        format!("samples.{}", self.identity)
    }
}

/// Oversized blobs are the caller's fault, everything else is ours.
fn into_poem_error(error: anyhow::Error, context: &'static str) -> poem::Error {
    match error.downcast::<BlobTooLarge>() {
        Ok(error) => error.into(),
        Err(error) => error.context(context).into(),
    }
}

fn new_identity() -> String {
    format!("{:032x}", rand::random::<u128>())
}

fn is_identity(value: &str) -> bool {
    value.len() == 32 && value.bytes().all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_identity_ok() {
        let identity = new_identity();
        assert!(is_identity(&identity), "{}", identity);
        assert_ne!(identity, new_identity());
    }

    #[test]
    fn is_identity_ok() {
        assert!(is_identity("0123456789abcdef0123456789abcdef"));
        assert!(!is_identity("0123456789ABCDEF0123456789ABCDEF"));
        assert!(!is_identity("0123456789abcdef"));
        assert!(!is_identity("model.0123456789abcdef0123456789a"));
        assert!(!is_identity(""));
    }
}
