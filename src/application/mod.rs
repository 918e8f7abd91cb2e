//! Application layer - Use cases and orchestration

pub mod init;
pub mod manage_config;
pub mod quote_book;
pub mod sync;

pub use init::{init, open_book};
pub use manage_config::ConfigService;
pub use quote_book::{default_quotes, QuoteBook};
pub use sync::{PushReport, RemoteSync, SharedBook, SyncHandle, SyncReport, SyncScheduler};
