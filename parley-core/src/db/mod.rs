//! SQLite store for the Parley conversation engine.
//!
//! Three tables: folder, chat_session, message. Sessions reference folders
//! weakly (NULL folder_id means unfoldered); messages belong to exactly one
//! session and are never moved. Multi-entity mutations (cascading deletes,
//! batch deletes, reset) run inside a single transaction so a failure rolls
//! the whole operation back.

pub mod migrations;

use crate::error::{Error, Result};
use crate::types::{Folder, FolderGroup, GroupedSessions, Message, ChatRole, Session, SessionSummary};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::sync::Mutex;

/// Database connection wrapper.
///
/// Thread-safe via internal Mutex. All database operations acquire the lock.
pub struct Database {
    conn: Mutex<Connection>,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl Database {
    /// Open database at a specific path, running migrations
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::setup(conn)
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::setup(conn)
    }

    fn setup(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Check database connectivity
    pub fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute_batch("SELECT 1")?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Folder Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a new folder
    pub fn create_folder(&self, name: &str) -> Result<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument("folder name is required".into()));
        }

        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_millis();

        conn.execute(
            "INSERT INTO folder (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![id, name, now],
        )?;

        Ok(Folder {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get folder by ID
    pub fn get_folder(&self, folder_id: &str) -> Result<Option<Folder>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, created_at, updated_at FROM folder WHERE id = ?1",
        )?;

        Ok(stmt.query_row(params![folder_id], Self::map_folder).optional()?)
    }

    /// List all folders
    pub fn list_folders(&self) -> Result<Vec<Folder>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, created_at, updated_at FROM folder ORDER BY created_at",
        )?;

        let folders = stmt
            .query_map([], Self::map_folder)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(folders)
    }

    /// Rename a folder
    pub fn rename_folder(&self, folder_id: &str, name: &str) -> Result<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument("folder name is required".into()));
        }

        {
            let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
            let changed = conn.execute(
                "UPDATE folder SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![name, now_millis(), folder_id],
            )?;
            if changed == 0 {
                return Err(Error::FolderNotFound(folder_id.to_string()));
            }
        }

        self.get_folder(folder_id)?
            .ok_or_else(|| Error::FolderNotFound(folder_id.to_string()))
    }

    /// Delete a folder, orphaning its sessions.
    ///
    /// Owned sessions keep their ledgers and become unfoldered
    /// (folder_id = NULL). Both steps commit atomically.
    pub fn delete_folder(&self, folder_id: &str) -> Result<()> {
        let mut conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let tx = conn.transaction()?;

        if !Self::folder_exists(&tx, folder_id)? {
            return Err(Error::FolderNotFound(folder_id.to_string()));
        }

        tx.execute(
            "UPDATE chat_session SET folder_id = NULL, updated_at = ?1 WHERE folder_id = ?2",
            params![now_millis(), folder_id],
        )?;
        tx.execute("DELETE FROM folder WHERE id = ?1", params![folder_id])?;
        tx.commit()?;

        Ok(())
    }

    /// Delete a folder together with every owned session and ledger.
    ///
    /// Single transaction: messages of owned sessions, the sessions, then
    /// the folder itself. Any failure rolls back the entire cascade.
    pub fn delete_folder_with_contents(&self, folder_id: &str) -> Result<()> {
        let mut conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let tx = conn.transaction()?;

        if !Self::folder_exists(&tx, folder_id)? {
            return Err(Error::FolderNotFound(folder_id.to_string()));
        }

        tx.execute(
            "DELETE FROM message WHERE session_id IN
                 (SELECT id FROM chat_session WHERE folder_id = ?1)",
            params![folder_id],
        )?;
        tx.execute(
            "DELETE FROM chat_session WHERE folder_id = ?1",
            params![folder_id],
        )?;
        tx.execute("DELETE FROM folder WHERE id = ?1", params![folder_id])?;
        tx.commit()?;

        Ok(())
    }

    fn folder_exists(tx: &Transaction, folder_id: &str) -> Result<bool> {
        let count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM folder WHERE id = ?1",
            params![folder_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn map_folder(row: &rusqlite::Row) -> rusqlite::Result<Folder> {
        Ok(Folder {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a new session, invalid until the first assistant reply lands
    pub fn create_session(&self, folder_id: Option<&str>) -> Result<Session> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;

        if let Some(fid) = folder_id {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM folder WHERE id = ?1",
                params![fid],
                |row| row.get(0),
            )?;
            if count == 0 {
                return Err(Error::FolderNotFound(fid.to_string()));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = now_millis();

        conn.execute(
            "INSERT INTO chat_session (id, name, folder_id, valid, created_at, updated_at)
             VALUES (?1, NULL, ?2, 0, ?3, ?3)",
            params![id, folder_id, now],
        )?;

        Ok(Session {
            id,
            name: None,
            folder_id: folder_id.map(String::from),
            valid: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get session by ID, regardless of validity
    pub fn get_session(&self, session_id: &str) -> Result<Option<Session>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, folder_id, valid, created_at, updated_at
             FROM chat_session WHERE id = ?1",
        )?;

        Ok(stmt.query_row(params![session_id], Self::map_session).optional()?)
    }

    /// List valid sessions.
    ///
    /// `folder_id = None` means unfoldered valid sessions; `Some` means valid
    /// sessions in that folder. Invalid sessions never appear here.
    pub fn list_sessions(&self, folder_id: Option<&str>) -> Result<Vec<Session>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let sessions = if let Some(fid) = folder_id {
            let mut stmt = conn.prepare(
                "SELECT id, name, folder_id, valid, created_at, updated_at
                 FROM chat_session
                 WHERE valid = 1 AND folder_id = ?1
                 ORDER BY created_at",
            )?;
            stmt.query_map(params![fid], Self::map_session)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        } else {
            let mut stmt = conn.prepare(
                "SELECT id, name, folder_id, valid, created_at, updated_at
                 FROM chat_session
                 WHERE valid = 1 AND folder_id IS NULL
                 ORDER BY created_at",
            )?;
            stmt.query_map([], Self::map_session)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        };
        Ok(sessions)
    }

    /// Update session display name
    pub fn rename_session(&self, session_id: &str, name: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let changed = conn.execute(
            "UPDATE chat_session SET name = ?1, updated_at = ?2 WHERE id = ?3",
            params![name, now_millis(), session_id],
        )?;
        if changed == 0 {
            return Err(Error::SessionNotFound(session_id.to_string()));
        }
        Ok(())
    }

    /// Reassign a session's folder; `None` moves it to unfoldered.
    ///
    /// The target folder must exist, so no dangling references are created.
    pub fn move_session(&self, session_id: &str, folder_id: Option<&str>) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;

        if let Some(fid) = folder_id {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM folder WHERE id = ?1",
                params![fid],
                |row| row.get(0),
            )?;
            if count == 0 {
                return Err(Error::FolderNotFound(fid.to_string()));
            }
        }

        let changed = conn.execute(
            "UPDATE chat_session SET folder_id = ?1, updated_at = ?2 WHERE id = ?3",
            params![folder_id, now_millis(), session_id],
        )?;
        if changed == 0 {
            return Err(Error::SessionNotFound(session_id.to_string()));
        }
        Ok(())
    }

    /// Mark a session valid. Idempotent; validity never reverts.
    pub fn mark_session_valid(&self, session_id: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let changed = conn.execute(
            "UPDATE chat_session SET valid = 1, updated_at = ?1 WHERE id = ?2",
            params![now_millis(), session_id],
        )?;
        if changed == 0 {
            return Err(Error::SessionNotFound(session_id.to_string()));
        }
        Ok(())
    }

    /// Delete a batch of sessions and their ledgers.
    ///
    /// One transaction for the whole batch: ids that do not exist are
    /// skipped, existing ids all delete together or not at all.
    pub fn delete_sessions(&self, session_ids: &[String]) -> Result<()> {
        let mut conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let tx = conn.transaction()?;

        for session_id in session_ids {
            tx.execute(
                "DELETE FROM message WHERE session_id = ?1",
                params![session_id],
            )?;
            tx.execute(
                "DELETE FROM chat_session WHERE id = ?1",
                params![session_id],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    /// Full tree view: every folder with its valid sessions, plus
    /// unfoldered valid sessions.
    pub fn list_all_grouped(&self) -> Result<GroupedSessions> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;

        let mut folder_stmt = conn.prepare(
            "SELECT id, name, created_at, updated_at FROM folder ORDER BY created_at",
        )?;
        let folders = folder_stmt
            .query_map([], Self::map_folder)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut session_stmt = conn.prepare(
            "SELECT id, name FROM chat_session
             WHERE valid = 1 AND folder_id = ?1
             ORDER BY created_at",
        )?;

        let mut groups = Vec::with_capacity(folders.len());
        for folder in folders {
            let sessions = session_stmt
                .query_map(params![folder.id], Self::map_summary)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            groups.push(FolderGroup {
                id: folder.id,
                name: folder.name,
                sessions,
            });
        }

        let mut unfoldered_stmt = conn.prepare(
            "SELECT id, name FROM chat_session
             WHERE valid = 1 AND folder_id IS NULL
             ORDER BY created_at",
        )?;
        let unfoldered = unfoldered_stmt
            .query_map([], Self::map_summary)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(GroupedSessions {
            folders: groups,
            unfoldered,
        })
    }

    fn map_session(row: &rusqlite::Row) -> rusqlite::Result<Session> {
        Ok(Session {
            id: row.get(0)?,
            name: row.get(1)?,
            folder_id: row.get(2)?,
            valid: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn map_summary(row: &rusqlite::Row) -> rusqlite::Result<SessionSummary> {
        Ok(SessionSummary {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Message Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a message to a session's ledger
    pub fn append_message(
        &self,
        session_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<Message> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_millis();

        conn.execute(
            "INSERT INTO message (id, session_id, role, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, session_id, role.as_str(), content, now],
        )?;

        Ok(Message {
            id,
            session_id: session_id.to_string(),
            role,
            content: content.to_string(),
            created_at: now,
        })
    }

    /// Read a session's full ledger in insertion order
    pub fn list_messages(&self, session_id: &str) -> Result<Vec<Message>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, session_id, role, content, created_at
             FROM message WHERE session_id = ?1 ORDER BY seq",
        )?;

        let messages = stmt
            .query_map(params![session_id], Self::map_message)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(messages)
    }

    fn map_message(row: &rusqlite::Row) -> rusqlite::Result<Message> {
        let role_str: String = row.get(2)?;
        let role = ChatRole::parse(&role_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                format!("unknown chat role: {role_str}").into(),
            )
        })?;

        Ok(Message {
            id: row.get(0)?,
            session_id: row.get(1)?,
            role,
            content: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Administrative Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Irreversibly delete every message, session and folder
    pub fn reset(&self) -> Result<()> {
        let mut conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM message", [])?;
        tx.execute("DELETE FROM chat_session", [])?;
        tx.execute("DELETE FROM folder", [])?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_folder_crud() {
        let db = test_db();

        let folder = db.create_folder("Work").unwrap();
        assert_eq!(folder.name, "Work");

        let fetched = db.get_folder(&folder.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Work");

        let renamed = db.rename_folder(&folder.id, "Projects").unwrap();
        assert_eq!(renamed.name, "Projects");

        assert_eq!(db.list_folders().unwrap().len(), 1);

        db.delete_folder(&folder.id).unwrap();
        assert!(db.get_folder(&folder.id).unwrap().is_none());
    }

    #[test]
    fn test_create_folder_rejects_empty_name() {
        let db = test_db();
        assert!(matches!(
            db.create_folder("  "),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rename_folder_not_found() {
        let db = test_db();
        assert!(matches!(
            db.rename_folder("missing", "x"),
            Err(Error::FolderNotFound(_))
        ));
    }

    #[test]
    fn test_delete_folder_orphans_sessions() {
        let db = test_db();
        let folder = db.create_folder("Work").unwrap();
        let session = db.create_session(Some(&folder.id)).unwrap();
        db.append_message(&session.id, ChatRole::User, "hello").unwrap();

        db.delete_folder(&folder.id).unwrap();

        // Session survives, unfoldered, ledger intact
        let survivor = db.get_session(&session.id).unwrap().unwrap();
        assert_eq!(survivor.folder_id, None);
        assert_eq!(db.list_messages(&session.id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_folder_with_contents_cascades() {
        let db = test_db();
        let folder = db.create_folder("Work").unwrap();
        let session = db.create_session(Some(&folder.id)).unwrap();
        db.append_message(&session.id, ChatRole::User, "hello").unwrap();
        db.append_message(&session.id, ChatRole::Assistant, "hi").unwrap();

        // A session outside the folder must be untouched
        let other = db.create_session(None).unwrap();
        db.append_message(&other.id, ChatRole::User, "keep me").unwrap();

        db.delete_folder_with_contents(&folder.id).unwrap();

        assert!(db.get_folder(&folder.id).unwrap().is_none());
        assert!(db.get_session(&session.id).unwrap().is_none());
        assert!(db.list_messages(&session.id).unwrap().is_empty());
        assert_eq!(db.list_messages(&other.id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_folder_with_contents_not_found() {
        let db = test_db();
        assert!(matches!(
            db.delete_folder_with_contents("missing"),
            Err(Error::FolderNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_sessions_hidden_from_listings() {
        let db = test_db();
        let session = db.create_session(None).unwrap();
        assert!(!session.valid);

        // Invisible until the first assistant reply lands
        assert!(db.list_sessions(None).unwrap().is_empty());
        let grouped = db.list_all_grouped().unwrap();
        assert!(grouped.unfoldered.is_empty());

        // Still loadable by direct id
        assert!(db.get_session(&session.id).unwrap().is_some());

        db.mark_session_valid(&session.id).unwrap();
        assert_eq!(db.list_sessions(None).unwrap().len(), 1);
    }

    #[test]
    fn test_mark_session_valid_idempotent() {
        let db = test_db();
        let session = db.create_session(None).unwrap();
        db.mark_session_valid(&session.id).unwrap();
        db.mark_session_valid(&session.id).unwrap();
        assert!(db.get_session(&session.id).unwrap().unwrap().valid);
    }

    #[test]
    fn test_list_sessions_unfoldered_excludes_foldered() {
        let db = test_db();
        let folder = db.create_folder("Work").unwrap();
        let foldered = db.create_session(Some(&folder.id)).unwrap();
        let unfoldered = db.create_session(None).unwrap();
        db.mark_session_valid(&foldered.id).unwrap();
        db.mark_session_valid(&unfoldered.id).unwrap();

        let listed = db.list_sessions(None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, unfoldered.id);
        assert!(listed.iter().all(|s| s.folder_id.is_none()));

        let in_folder = db.list_sessions(Some(&folder.id)).unwrap();
        assert_eq!(in_folder.len(), 1);
        assert_eq!(in_folder[0].id, foldered.id);
    }

    #[test]
    fn test_create_session_unknown_folder() {
        let db = test_db();
        assert!(matches!(
            db.create_session(Some("missing")),
            Err(Error::FolderNotFound(_))
        ));
    }

    #[test]
    fn test_move_session() {
        let db = test_db();
        let folder = db.create_folder("Work").unwrap();
        let session = db.create_session(None).unwrap();

        db.move_session(&session.id, Some(&folder.id)).unwrap();
        assert_eq!(
            db.get_session(&session.id).unwrap().unwrap().folder_id,
            Some(folder.id.clone())
        );

        db.move_session(&session.id, None).unwrap();
        assert_eq!(db.get_session(&session.id).unwrap().unwrap().folder_id, None);
    }

    #[test]
    fn test_move_session_rejects_unknown_folder() {
        let db = test_db();
        let session = db.create_session(None).unwrap();
        assert!(matches!(
            db.move_session(&session.id, Some("missing")),
            Err(Error::FolderNotFound(_))
        ));
        // Session untouched
        assert_eq!(db.get_session(&session.id).unwrap().unwrap().folder_id, None);
    }

    #[test]
    fn test_move_session_not_found() {
        let db = test_db();
        assert!(matches!(
            db.move_session("missing", None),
            Err(Error::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_rename_session() {
        let db = test_db();
        let session = db.create_session(None).unwrap();
        db.rename_session(&session.id, "My chat").unwrap();
        assert_eq!(
            db.get_session(&session.id).unwrap().unwrap().name.as_deref(),
            Some("My chat")
        );

        assert!(matches!(
            db.rename_session("missing", "x"),
            Err(Error::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_delete_sessions_skips_missing_ids() {
        let db = test_db();
        let keep = db.create_session(None).unwrap();
        let drop = db.create_session(None).unwrap();
        db.append_message(&drop.id, ChatRole::User, "bye").unwrap();

        db.delete_sessions(&[drop.id.clone(), "missing".to_string()])
            .unwrap();

        assert!(db.get_session(&drop.id).unwrap().is_none());
        assert!(db.list_messages(&drop.id).unwrap().is_empty());
        assert!(db.get_session(&keep.id).unwrap().is_some());
    }

    #[test]
    fn test_message_ledger_order() {
        let db = test_db();
        let session = db.create_session(None).unwrap();
        db.append_message(&session.id, ChatRole::User, "first").unwrap();
        db.append_message(&session.id, ChatRole::Assistant, "second").unwrap();
        db.append_message(&session.id, ChatRole::User, "third").unwrap();

        let ledger = db.list_messages(&session.id).unwrap();
        let contents: Vec<&str> = ledger.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(ledger[1].role, ChatRole::Assistant);

        // Reading twice returns the identical transcript
        let again = db.list_messages(&session.id).unwrap();
        let again_contents: Vec<&str> = again.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, again_contents);
    }

    #[test]
    fn test_list_all_grouped() {
        let db = test_db();
        let folder = db.create_folder("Work").unwrap();
        let inside = db.create_session(Some(&folder.id)).unwrap();
        let outside = db.create_session(None).unwrap();
        db.mark_session_valid(&inside.id).unwrap();
        db.mark_session_valid(&outside.id).unwrap();

        let grouped = db.list_all_grouped().unwrap();
        assert_eq!(grouped.folders.len(), 1);
        assert_eq!(grouped.folders[0].name, "Work");
        assert_eq!(grouped.folders[0].sessions.len(), 1);
        assert_eq!(grouped.folders[0].sessions[0].id, inside.id);
        assert_eq!(grouped.unfoldered.len(), 1);
        assert_eq!(grouped.unfoldered[0].id, outside.id);
    }

    #[test]
    fn test_reset_wipes_everything() {
        let db = test_db();
        let folder = db.create_folder("Work").unwrap();
        let session = db.create_session(Some(&folder.id)).unwrap();
        db.append_message(&session.id, ChatRole::User, "hello").unwrap();

        db.reset().unwrap();

        assert!(db.list_folders().unwrap().is_empty());
        assert!(db.get_session(&session.id).unwrap().is_none());
        assert!(db.list_messages(&session.id).unwrap().is_empty());
    }

    #[test]
    fn test_open_path_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.db");

        let id = {
            let db = Database::open_path(&path).unwrap();
            db.create_folder("Work").unwrap().id
        };

        let db = Database::open_path(&path).unwrap();
        assert!(db.get_folder(&id).unwrap().is_some());
    }
}
