//! Durable key-value storage for client state.
//!
//! The cart and the auth session only ever see this trait, so their logic can
//! run against [`MemoryStore`] in tests and [`SqliteStore`] in the CLI.

mod memory;
mod sqlite;

use std::future::Future;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::ClientResult;

pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key was never written or has been removed.
    fn get(&self, key: &str) -> impl Future<Output = ClientResult<Option<String>>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = ClientResult<()>> + Send;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = ClientResult<()>> + Send;
}
