pub mod error;
pub mod file;
pub mod memory;
pub mod persistence;
pub mod traits;

// Re-export
pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use persistence::Persistence;
pub use traits::KeyValueStore;
