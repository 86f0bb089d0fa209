pub mod connection;
pub mod drafts;
pub mod failure_queue;
pub mod migrations;
pub mod repositories;

pub use connection::{connect_with_settings, ping, DbPool};
pub use drafts::DraftStore;
pub use failure_queue::FailureQueue;
