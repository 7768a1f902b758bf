//! Per-caller state storage.
//!
//! A registry maps opaque keys onto opaque blobs. Whole blobs are replaced on every write,
//! concurrent writers to the same key are last-write-wins.

use async_trait::async_trait;
use thiserror::Error;

pub use self::cookie::CookieRegistry;
pub use self::memory::MemoryRegistry;
pub use self::redis::RedisRegistry;
use crate::prelude::*;

mod cookie;
mod memory;
mod redis;

/// The store cannot hold a blob this large.
///
/// Raised before anything is written, so the previous blob stays in place.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("state of {size} bytes does not fit into the {limit}-byte storage limit")]
pub struct BlobTooLarge {
    pub size: usize,
    pub limit: usize,
}

#[async_trait]
pub trait Registry: Send + Sync {
    /// Short backend name for logs and error reports.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn put(&self, key: &str, blob: Vec<u8>) -> Result;
}
