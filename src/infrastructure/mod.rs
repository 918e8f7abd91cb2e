//! Infrastructure layer - Storage, configuration and the remote endpoint

pub mod config;
pub mod remote;
pub mod repository;
pub mod store;

pub use config::Config;
pub use remote::{HttpEndpoint, NewPost, RemoteEndpoint, RemotePost, SERVER_CATEGORY};
pub use repository::{BookRepository, FileSystemRepository};
pub use store::{MemoryStore, PersistentStore, QUOTES_KEY, SELECTED_CATEGORY_KEY};
