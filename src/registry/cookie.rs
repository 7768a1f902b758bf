use async_trait::async_trait;
use poem::web::cookie::CookieJar;

use crate::prelude::*;
use crate::registry::{BlobTooLarge, Registry};
use crate::web::cookies;

/// Browsers silently drop larger cookies.
const MAX_COOKIE_SIZE: usize = 4096;

/// Nonce and authentication tag added by the encryption.
const SEAL_OVERHEAD: usize = 12 + 16;

/// Room for the `Path`, `Max-Age` and `HttpOnly` attributes.
const ATTRIBUTES_SIZE: usize = 64;

/// Keeps the blobs on the client side, in private (encrypted and authenticated) cookies
/// named after the keys.
///
/// Cookies which fail decryption read as absent.
pub struct CookieRegistry<'a> {
    jar: &'a CookieJar,
    ttl: StdDuration,
}

impl<'a> CookieRegistry<'a> {
    pub const fn new(jar: &'a CookieJar, ttl: StdDuration) -> Self {
        Self { jar, ttl }
    }
}

#[async_trait]
impl Registry for CookieRegistry<'_> {
    fn name(&self) -> &'static str {
        "cookie"
    }

    #[instrument(level = "debug", skip_all, fields(key = key))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.jar
            .private()
            .get(key)
            .map(|cookie| {
                hex::decode(cookie.value_str())
                    .with_context(|| format!("malformed `{}` cookie", key))
            })
            .transpose()
    }

    #[instrument(level = "debug", skip_all, fields(key = key, size = blob.len()))]
    async fn put(&self, key: &str, blob: Vec<u8>) -> Result {
        let size = sealed_size(key, blob.len());
        if size > MAX_COOKIE_SIZE {
            warn!(size, "the cookie would be dropped by the browser");
            return Err(BlobTooLarge {
                size,
                limit: MAX_COOKIE_SIZE,
            }
            .into());
        }
        cookies::Builder::new(key)
            .value(hex::encode(blob))
            .max_age(self.ttl)
            .add_to(&self.jar.private());
        Ok(())
    }
}

/// Size of the `Set-Cookie` value carrying the hex-encoded, sealed and base64-encoded blob.
const fn sealed_size(key: &str, blob_size: usize) -> usize {
    let sealed = 2 * blob_size + SEAL_OVERHEAD;
    key.len() + 1 + (sealed + 2) / 3 * 4 + ATTRIBUTES_SIZE
}
