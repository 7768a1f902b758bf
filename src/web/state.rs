use crate::opts::{Store, WebOpts};
use crate::prelude::*;
use crate::registry::{MemoryRegistry, RedisRegistry, Registry};

/// Where the per-caller state lives.
#[derive(Clone)]
pub enum Backend {
    /// Server-side registry shared by all the requests.
    Shared(Arc<dyn Registry>),

    /// Client-side private cookies.
    Cookie,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shared(registry) => registry.name(),
            Self::Cookie => "cookie",
        }
    }
}

/// Web application global state.
#[derive(Clone)]
pub struct State {
    pub backend: Backend,
    pub session_ttl: StdDuration,
}

impl State {
    pub const fn new(backend: Backend, session_ttl: StdDuration) -> Self {
        Self {
            backend,
            session_ttl,
        }
    }

    #[instrument(skip_all, fields(store = ?opts.store))]
    pub async fn from_opts(opts: &WebOpts) -> Result<Self> {
        let backend = match opts.store {
            Store::Memory => Backend::Shared(Arc::new(MemoryRegistry::new(opts.session_ttl))),
            Store::Redis => {
                let registry =
                    RedisRegistry::connect(&opts.redis_uri, opts.redis_pool_size, opts.session_ttl)
                        .await?;
                Backend::Shared(Arc::new(registry))
            }
            Store::Cookie => Backend::Cookie,
        };
        Ok(Self::new(backend, opts.session_ttl))
    }
}
