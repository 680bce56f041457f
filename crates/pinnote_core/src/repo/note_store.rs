//! Note store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD for note records (id, geometry, floating flag).
//! - Support the partial geometry/status updates issued by the window
//!   lifecycle controller.
//!
//! # Invariants
//! - Write paths validate geometry before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `all_notes` returns rows ordered by `z_index ASC, uuid ASC` so restore
//!   recreates windows bottom-to-top.

use crate::db::DbError;
use crate::model::note::{validate_dimensions, NoteId, NoteRecord, NoteValidationError, Position};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    pos_x,
    pos_y,
    width,
    height,
    z_index,
    is_floating
FROM notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Generic store error for note persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(NoteValidationError),
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
    EmptyUpdate(NoteId),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::EmptyUpdate(id) => write!(f, "note update for {id} carries no fields"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{column}` on table `{table}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Partial update issued by the lifecycle controller.
///
/// Only fields set to `Some` are written; `id` selects the target row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoteUpdate {
    pub id: NoteId,
    pub position: Option<Position>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub z_index: Option<i64>,
    pub is_floating: Option<bool>,
}

impl NoteUpdate {
    pub fn new(id: NoteId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn z_index(mut self, z_index: i64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn floating(mut self, is_floating: bool) -> Self {
        self.is_floating = Some(is_floating);
        self
    }

    fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.z_index.is_none()
            && self.is_floating.is_none()
    }
}

/// Durable store interface consumed by the floating note window manager.
pub trait NoteStore {
    /// Creates one note record and returns its stable id.
    fn create_note(&self, note: &NoteRecord) -> StoreResult<NoteId>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> StoreResult<Option<NoteRecord>>;
    /// Lists all notes; restore filters on `is_floating` itself.
    fn all_notes(&self) -> StoreResult<Vec<NoteRecord>>;
    /// Applies a partial geometry/status update to one note.
    fn update_note(&self, update: &NoteUpdate) -> StoreResult<()>;
}

/// SQLite-backed note store.
#[derive(Debug)]
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn create_note(&self, note: &NoteRecord) -> StoreResult<NoteId> {
        note.validate()?;

        self.conn.execute(
            "INSERT INTO notes (
                uuid,
                title,
                pos_x,
                pos_y,
                width,
                height,
                z_index,
                is_floating
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.position.map(|p| p.x),
                note.position.map(|p| p.y),
                note.width,
                note.height,
                note.z_index,
                bool_to_int(note.is_floating),
            ],
        )?;

        Ok(note.id)
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<NoteRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn all_notes(&self) -> StoreResult<Vec<NoteRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY z_index ASC, uuid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn update_note(&self, update: &NoteUpdate) -> StoreResult<()> {
        if update.is_empty() {
            return Err(StoreError::EmptyUpdate(update.id));
        }
        validate_dimensions(update.width, update.height)?;

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(position) = update.position {
            assignments.push("pos_x = ?");
            bind_values.push(Value::Integer(i64::from(position.x)));
            assignments.push("pos_y = ?");
            bind_values.push(Value::Integer(i64::from(position.y)));
        }
        if let Some(width) = update.width {
            assignments.push("width = ?");
            bind_values.push(Value::Integer(i64::from(width)));
        }
        if let Some(height) = update.height {
            assignments.push("height = ?");
            bind_values.push(Value::Integer(i64::from(height)));
        }
        if let Some(z_index) = update.z_index {
            assignments.push("z_index = ?");
            bind_values.push(Value::Integer(z_index));
        }
        if let Some(is_floating) = update.is_floating {
            assignments.push("is_floating = ?");
            bind_values.push(Value::Integer(bool_to_int(is_floating)));
        }

        let sql = format!(
            "UPDATE notes
             SET {},
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Text(update.id.to_string()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(StoreError::NotFound(update.id));
        }

        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<NoteRecord> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{uuid_text}` in notes.uuid"))
    })?;

    let pos_x: Option<i32> = row.get("pos_x")?;
    let pos_y: Option<i32> = row.get("pos_y")?;
    let position = match (pos_x, pos_y) {
        (Some(x), Some(y)) => Some(Position { x, y }),
        (None, None) => None,
        _ => {
            return Err(StoreError::InvalidData(format!(
                "half-set position for note {id}: pos_x={pos_x:?} pos_y={pos_y:?}"
            )));
        }
    };

    let is_floating = match row.get::<_, i64>("is_floating")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid is_floating value `{other}` in notes.is_floating"
            )));
        }
    };

    let note = NoteRecord {
        id,
        title: row.get("title")?,
        position,
        width: row.get("width")?,
        height: row.get("height")?,
        z_index: row.get("z_index")?,
        is_floating,
    };
    note.validate()?;
    Ok(note)
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "notes")? {
        return Err(StoreError::MissingRequiredTable("notes"));
    }

    for column in [
        "uuid",
        "title",
        "pos_x",
        "pos_y",
        "width",
        "height",
        "z_index",
        "is_floating",
    ] {
        if !table_has_column(conn, "notes", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
