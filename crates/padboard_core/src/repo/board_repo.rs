//! Board persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Load/save the note metadata record as one keyed JSON value.
//! - Store note text bodies per note id, separate from metadata.
//! - Store the font-size preference.
//!
//! # Invariants
//! - Malformed persisted metadata yields an empty board, logged, never an
//!   error; missing text yields an empty string.
//! - `save_notes` persists summaries only; text is written through the
//!   per-note text APIs.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::DbError;
use crate::model::note::{FontSize, Note, NoteId};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTES_METADATA_KEY: &str = "notes_metadata";
const FONT_SIZE_KEY: &str = "note_size";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for board persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted board data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence interface the board core requires.
pub trait BoardRepository {
    /// Loads all note summaries. Malformed metadata degrades to empty.
    fn load_notes(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the full metadata record.
    fn save_notes(&self, notes: &[Note]) -> RepoResult<()>;
    /// Loads one note's text; missing content reads as empty.
    fn load_text(&self, id: NoteId) -> RepoResult<String>;
    /// Writes one note's text.
    fn save_text(&self, id: NoteId, body: &str) -> RepoResult<()>;
    /// Discards one note's text. Unknown ids are a no-op.
    fn delete_text(&self, id: NoteId) -> RepoResult<()>;
    /// Loads the font-size preference; missing or garbled reads as medium.
    fn load_font_size(&self) -> RepoResult<FontSize>;
    fn save_font_size(&self, size: FontSize) -> RepoResult<()>;
    /// Wipes all board data: metadata, texts and preferences stay intact
    /// only where noted by the caller contract (preferences survive).
    fn clear_all(&self) -> RepoResult<()>;
}

/// SQLite-backed board repository.
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_meta(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM board_meta WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_meta(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO board_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn load_notes(&self) -> RepoResult<Vec<Note>> {
        let Some(raw) = self.read_meta(NOTES_METADATA_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => Ok(notes),
            Err(err) => {
                warn!(
                    "event=board_load module=repo status=degraded error_code=metadata_parse_failed error={err}"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_notes(&self, notes: &[Note]) -> RepoResult<()> {
        let raw = serde_json::to_string(notes)
            .map_err(|err| RepoError::InvalidData(format!("metadata encode failed: {err}")))?;
        self.write_meta(NOTES_METADATA_KEY, &raw)
    }

    fn load_text(&self, id: NoteId) -> RepoResult<String> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM note_texts WHERE note_id = ?1;",
                [id.to_string()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(body.unwrap_or_default())
    }

    fn save_text(&self, id: NoteId, body: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO note_texts (note_id, body) VALUES (?1, ?2)
             ON CONFLICT(note_id) DO UPDATE SET body = excluded.body;",
            params![id.to_string(), body],
        )?;
        Ok(())
    }

    fn delete_text(&self, id: NoteId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM note_texts WHERE note_id = ?1;",
            [id.to_string()],
        )?;
        Ok(())
    }

    fn load_font_size(&self) -> RepoResult<FontSize> {
        let Some(raw) = self.read_meta(FONT_SIZE_KEY)? else {
            return Ok(FontSize::default());
        };
        Ok(FontSize::parse(&raw).unwrap_or_default())
    }

    fn save_font_size(&self, size: FontSize) -> RepoResult<()> {
        self.write_meta(FONT_SIZE_KEY, size.as_str())
    }

    fn clear_all(&self) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM board_meta WHERE key = ?1;",
            [NOTES_METADATA_KEY],
        )?;
        self.conn.execute("DELETE FROM note_texts;", [])?;
        Ok(())
    }
}
