//! Postgres storage
//!
//! Notes and label sets as rows, the checklist as a text column

use std::time::Duration;

use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::notes::CheckList;
use crate::notes::Note;
use crate::users::UserId;

use super::CreateNoteValues;
use super::Error;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// Columns of a note, in the order of [`NoteRow`]
const NOTE_COLUMNS: &str = r"
    id,
    user_id,
    title,
    content,
    is_pinned,
    background_color,
    labels,
    check_list,
    time_stamp
";

/// Database configuration
pub enum Config {
    /// Detect configuration from environment
    DetectConfig,

    /// Use existing connection
    ExistingConnection(PgPool),
}

/// `SQLx` version of a note
#[derive(FromRow)]
struct NoteRow {
    id: Uuid,
    user_id: String,
    title: String,
    content: String,
    is_pinned: bool,
    background_color: String,
    labels: Vec<String>,
    check_list: String,
    time_stamp: i64,
}

impl NoteRow {
    fn into_note(self) -> Note {
        Note {
            id: self.id,
            user_id: UserId::from(self.user_id),
            title: self.title,
            content: self.content,
            is_pinned: self.is_pinned,
            background_color: self.background_color,
            labels: self.labels,
            check_list: CheckList::from_text_lossy(&self.check_list),
            time_stamp: self.time_stamp,
        }
    }
}

/// Postgres storage
#[derive(Clone)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Create a new Postgres storage
    pub async fn from_config(config: Config) -> Result<Self> {
        match config {
            Config::DetectConfig => Self::new().await,
            Config::ExistingConnection(pool) => Self::new_with_pool(pool).await,
        }
    }

    /// Create Postgres storage
    ///
    /// Use the `DATABASE_URL` environment variable
    async fn new() -> Result<Self> {
        let database_connection_string = std::env::var("DATABASE_URL")
            .map_err(|_| Error::Connection(String::from("`DATABASE_URL` is not set")))?;

        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_connection_string)
            .await
            .map_err(connection_error)?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    async fn new_with_pool(connection_pool: PgPool) -> Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .map_err(connection_error)?;

        Ok(Self { connection_pool })
    }
}

impl Storage for Postgres {
    async fn find_all_notes(&self) -> Result<Vec<Note>> {
        let rows = sqlx::query_as::<_, NoteRow>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes ORDER BY seq"
        ))
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(rows.into_iter().map(NoteRow::into_note).collect())
    }

    async fn find_single_note_by_id(&self, id: &Uuid) -> Result<Option<Note>> {
        let row = sqlx::query_as::<_, NoteRow>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1 LIMIT 1"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(row.map(NoteRow::into_note))
    }

    async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        let fields = values.fields;

        let row = sqlx::query_as::<_, NoteRow>(&format!(
            r"
            INSERT INTO notes (
                id,
                user_id,
                title,
                content,
                is_pinned,
                background_color,
                labels,
                check_list,
                time_stamp
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {NOTE_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4())
        .bind(values.user_id.as_str())
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(fields.is_pinned)
        .bind(&fields.background_color)
        .bind(&fields.labels)
        .bind(&fields.check_list)
        .bind(values.time_stamp)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(row.into_note())
    }

    async fn update_note(&self, id: &Uuid, values: &UpdateNoteValues) -> Result<Note> {
        let row = sqlx::query_as::<_, NoteRow>(&format!(
            r"
            UPDATE notes
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                is_pinned = COALESCE($4, is_pinned),
                background_color = COALESCE($5, background_color),
                labels = COALESCE($6, labels),
                check_list = COALESCE($7, check_list),
                time_stamp = $8
            WHERE id = $1
            RETURNING {NOTE_COLUMNS}
            "
        ))
        .bind(id)
        .bind(values.title.as_deref())
        .bind(values.content.as_deref())
        .bind(values.is_pinned)
        .bind(values.background_color.as_deref())
        .bind(values.labels.as_deref())
        .bind(values.check_list.as_deref())
        .bind(values.time_stamp)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        row.map(NoteRow::into_note)
            .ok_or(Error::MissingDocument(*id))
    }

    async fn delete_note(&self, id: &Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await
            .map_err(connection_error)?;

        if result.rows_affected() == 0 {
            return Err(Error::MissingDocument(*id));
        }

        Ok(())
    }

    async fn find_label_set(&self, user_id: &UserId) -> Result<Option<Vec<String>>> {
        sqlx::query_scalar::<_, Vec<String>>("SELECT labels FROM labels WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_optional(&self.connection_pool)
            .await
            .map_err(connection_error)
    }

    async fn save_label_set(&self, user_id: &UserId, labels: &[String]) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO labels (user_id, labels)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET labels = EXCLUDED.labels
            ",
        )
        .bind(user_id.as_str())
        .bind(labels)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(())
    }
}

fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}
