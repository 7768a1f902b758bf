use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::prelude::*;
use crate::registry::Registry;

/// In-process registry, lost on restart.
pub struct MemoryRegistry {
    ttl: StdDuration,
    entries: RwLock<AHashMap<String, Entry>>,
}

struct Entry {
    expires_at: Instant,
    blob: Vec<u8>,
}

impl MemoryRegistry {
    pub fn new(ttl: StdDuration) -> Self {
        Self {
            ttl,
            entries: RwLock::default(),
        }
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    fn name(&self) -> &'static str {
        "memory"
    }

    #[instrument(level = "debug", skip_all, fields(key = key))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        let blob = entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.blob.clone());
        debug!(is_hit = blob.is_some());
        Ok(blob)
    }

    #[instrument(level = "debug", skip_all, fields(key = key, size = blob.len()))]
    async fn put(&self, key: &str, blob: Vec<u8>) -> Result {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                expires_at: now + self.ttl,
                blob,
            },
        );
        debug!(n_entries = entries.len());
        Ok(())
    }
}
