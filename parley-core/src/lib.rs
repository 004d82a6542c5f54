//! parley-core - Core library for Parley
//!
//! This crate provides the conversation engine behind the Parley backend:
//!
//! - **db**: SQLite store for folders, sessions and message ledgers
//! - **chat**: Session lifecycle and the turn-submission algorithm
//! - **completion**: Client for the external chat-completion endpoint

pub mod chat;
pub mod completion;
pub mod db;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use chat::ChatService;
pub use completion::{CompletionBackend, HttpCompletionClient};
pub use db::Database;
pub use error::{Error, Result};
