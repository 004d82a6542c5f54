//! Session lifecycle and the turn-submission algorithm.
//!
//! `ChatService` owns the path from user input to persisted assistant reply:
//! append the user message, assemble the context payload from the full
//! ledger, call the completion backend, persist the reply, mark the session
//! valid. Every operation takes the session id explicitly; the caller owns
//! the notion of "current session".

use crate::completion::CompletionBackend;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::types::{ChatMessage, ChatRole, Message, Session};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Fixed leading instruction for every context payload
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Sentinel content of the system message that marks an ended session
pub const END_OF_SESSION_MARKER: &str = "exit";

/// Conversation engine over the entity store and a completion backend.
///
/// Turns for the same session are serialized: at most one in-flight
/// completion call per session id. Turns for different sessions run in
/// parallel.
pub struct ChatService {
    db: Arc<Database>,
    backend: Arc<dyn CompletionBackend>,
    /// When set, only the last n ledger messages are sent upstream.
    /// `None` sends the full history every turn.
    history_limit: Option<usize>,
    turn_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ChatService {
    pub fn new(
        db: Arc<Database>,
        backend: Arc<dyn CompletionBackend>,
        history_limit: Option<usize>,
    ) -> Self {
        Self {
            db,
            backend,
            history_limit,
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create a new session, invalid until its first assistant reply
    pub fn new_session(&self, folder_id: Option<&str>) -> Result<Session> {
        let session = self.db.create_session(folder_id)?;
        info!(session_id = %session.id, "created session");
        Ok(session)
    }

    /// End a session by appending the system end-of-session marker.
    ///
    /// A missing session is a no-op; ending is best-effort and never fails
    /// the caller for an id that already went away.
    pub fn end_session(&self, session_id: &str) -> Result<()> {
        if self.db.get_session(session_id)?.is_none() {
            debug!(%session_id, "end_session on unknown session, ignoring");
            return Ok(());
        }
        self.db
            .append_message(session_id, ChatRole::System, END_OF_SESSION_MARKER)?;
        info!(%session_id, "session ended");
        Ok(())
    }

    /// Load a session's full transcript in insertion order, regardless of
    /// validity
    pub fn load_session(&self, session_id: &str) -> Result<Vec<Message>> {
        if self.db.get_session(session_id)?.is_none() {
            return Err(Error::SessionNotFound(session_id.to_string()));
        }
        self.db.list_messages(session_id)
    }

    /// Update a session's display name
    pub fn rename_session(&self, session_id: &str, name: &str) -> Result<()> {
        self.db.rename_session(session_id, name)
    }

    /// Delete a batch of sessions and their ledgers atomically
    pub fn delete_sessions(&self, session_ids: &[String]) -> Result<()> {
        self.db.delete_sessions(session_ids)?;
        info!(count = session_ids.len(), "deleted session batch");
        Ok(())
    }

    /// Irreversibly wipe every message, session and folder
    pub fn reset(&self) -> Result<()> {
        self.db.reset()?;
        warn!("conversation store reset: all folders, sessions and messages deleted");
        Ok(())
    }

    /// Submit a user turn and return the assistant reply.
    ///
    /// The user message commits before the upstream call. If the completion
    /// fails the turn stays recorded as asked-but-unanswered: the user
    /// message is not rolled back, no assistant message is appended and the
    /// session's validity is unchanged.
    pub async fn submit_turn(&self, session_id: &str, user_text: &str) -> Result<String> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(Error::InvalidArgument("message text is required".into()));
        }
        if self.db.get_session(session_id)?.is_none() {
            return Err(Error::SessionNotFound(session_id.to_string()));
        }

        let lock = self.turn_lock(session_id).await;
        let _guard = lock.lock().await;

        self.db
            .append_message(session_id, ChatRole::User, user_text)?;

        let ledger = self.db.list_messages(session_id)?;
        let payload = self.build_context(&ledger);
        debug!(%session_id, context_len = payload.len(), "assembled context payload");

        let reply = self.backend.complete(&payload).await?;
        let reply = reply.trim().to_string();

        self.db
            .append_message(session_id, ChatRole::Assistant, &reply)?;
        self.db.mark_session_valid(session_id)?;

        Ok(reply)
    }

    /// Assemble the upstream payload: the fixed system instruction followed
    /// by the ledger (windowed to the last `history_limit` messages when
    /// configured).
    fn build_context(&self, ledger: &[Message]) -> Vec<ChatMessage> {
        let window = match self.history_limit {
            Some(limit) if ledger.len() > limit => &ledger[ledger.len() - limit..],
            _ => ledger,
        };

        let mut payload = Vec::with_capacity(window.len() + 1);
        payload.push(ChatMessage {
            role: ChatRole::System,
            content: SYSTEM_INSTRUCTION.to_string(),
        });
        payload.extend(window.iter().map(ChatMessage::from));
        payload
    }

    async fn turn_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.turn_locks.lock().await;
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
