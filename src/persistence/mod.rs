//! Best-effort persistence
//!
//! Features:
//! - Pluggable key/value backends (LocalStorage on web, in-memory elsewhere)
//! - JSON list encoding for chapter and heart ids
//! - Failures degrade to empty/default and are only logged

pub mod backend;
pub mod store;

pub use backend::{MemoryBackend, StorageBackend, StorageError};
#[cfg(target_arch = "wasm32")]
pub use backend::LocalStorageBackend;
pub use store::PersistentStore;
