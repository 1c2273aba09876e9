//! Card collection persistence, keyed by user.

pub mod error;
pub mod memory;
pub mod repository;
pub mod schema;

pub use error::StoreError;
pub use memory::MemoryCardStore;
pub use repository::{CardStore, SqliteCardStore, UserKey};
