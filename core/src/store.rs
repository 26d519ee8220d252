//! SQLite-backed persistence for form definitions and submissions.
//!
//! Field-list payloads pass through as opaque serialized text; this layer
//! never inspects field schema. Each call is one statement, relying on the
//! engine's per-statement atomicity. Ids are engine-assigned rowids.

use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use crate::error::{FormsError, Result};
use crate::schema::{FormSummary, Submission};

/// Raw form row, field payload still serialized.
#[derive(Clone, Debug)]
pub struct FormRow {
    pub id: i64,
    pub name: String,
    pub form_data: String,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

#[derive(Clone)]
pub struct FormStore {
    pool: SqlitePool,
}

impl FormStore {
    /// Connect to a SQLite database (`sqlite:forms.db`, `sqlite::memory:`, ...).
    pub async fn connect(url: &str) -> Result<Self> {
        // An in-memory database is private to its connection, so the pool
        // must not hand out more than one.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        tracing::debug!("connected to form storage");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the tables if they do not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS forms (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                form_data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS form_submissions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                form_id INTEGER NOT NULL,
                submission_data TEXT NOT NULL,
                submitted_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_form_submissions_form_id
             ON form_submissions (form_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Summaries of all forms, most recently updated first.
    pub async fn list_forms(&self) -> Result<Vec<FormSummary>> {
        let rows = sqlx::query(
            "SELECT id, name, created_at, updated_at FROM forms ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| FormSummary {
                id: row.get("id"),
                name: row.get("name"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            })
            .collect())
    }

    pub async fn get_form(&self, id: i64) -> Result<Option<FormRow>> {
        let row = sqlx::query("SELECT * FROM forms WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(form_row))
    }

    /// Insert a form and return its engine-assigned id.
    pub async fn create_form(&self, name: &str, form_data: &str) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO forms (name, form_data, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(form_data)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite name and field payload, bumping `updated_at`.
    /// Returns false when no row matched the id.
    pub async fn update_form(&self, id: i64, name: &str, form_data: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE forms SET name = ?, form_data = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(form_data)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns false when the form did not exist (or was already deleted).
    /// Submissions referencing the form are kept.
    pub async fn delete_form(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM forms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a submission. `form_id` is a soft reference; no existence
    /// check is made against the forms table.
    pub async fn create_submission(&self, form_id: i64, submission_data: &str) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO form_submissions (form_id, submission_data, submitted_at) VALUES (?, ?, ?)",
        )
        .bind(form_id)
        .bind(submission_data)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Submissions captured for a form, oldest first.
    pub async fn list_submissions(&self, form_id: i64) -> Result<Vec<Submission>> {
        let rows = sqlx::query(
            "SELECT id, form_id, submission_data, submitted_at FROM form_submissions
             WHERE form_id = ? ORDER BY id",
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let data: String = row.get("submission_data");
                Ok(Submission {
                    id: row.get("id"),
                    form_id: row.get("form_id"),
                    data: serde_json::from_str(&data).map_err(FormsError::from)?,
                    submitted_at: row.get("submitted_at"),
                })
            })
            .collect()
    }
}

fn form_row(row: SqliteRow) -> FormRow {
    FormRow {
        id: row.get("id"),
        name: row.get("name"),
        form_data: row.get("form_data"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
