//! Conversation store database migrations
//!
//! SQL migrations are embedded as strings and executed when the store opens.

use crate::Result;
use rusqlite::Connection;

/// Chat tables SQL (001)
pub const CHAT_TABLES_SQL: &str = include_str!("001_chat_tables.sql");

/// Run all store migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(CHAT_TABLES_SQL)?;
    Ok(())
}
