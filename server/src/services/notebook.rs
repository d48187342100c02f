//! Notebook service: CRUD over notes and sketches owned by a user.
//!
//! DESIGN
//! ======
//! A notebook row carries its kind (`sketch` or `notebook`), a title, and
//! opaque JSON content: a sketch snapshot for sketches, the editor document
//! for notes. The server never interprets content.
//!
//! Reads and writes by id distinguish a missing row (`NotFound`) from a row
//! owned by someone else (`Forbidden`).

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "untitled";

/// Maximum number of entries in the dashboard's recent list.
pub const RECENT_LIMIT: i64 = 10;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("notebook not found: {0}")]
    NotFound(Uuid),
    #[error("notebook {0} belongs to another user")]
    Forbidden(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotebookKind {
    Sketch,
    Notebook,
}

impl NotebookKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sketch => "sketch",
            Self::Notebook => "notebook",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sketch" => Some(Self::Sketch),
            "notebook" => Some(Self::Notebook),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotebookKind,
    pub title: String,
    pub content: serde_json::Value,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub updated_at: i64,
}

/// Dashboard list entry; omits the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotebookKind,
    pub title: String,
    pub updated_at: i64,
}

/// Per-kind counts for one owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub notes: i64,
    pub sketches: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewNotebook {
    #[serde(rename = "type")]
    pub kind: NotebookKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: serde_json::Value,
}

/// Partial update. Absent fields are left as they are; unknown fields
/// (such as an echoed `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NotebookPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<NotebookKind>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

/// Trimmed title, or [`DEFAULT_TITLE`] when blank or absent.
#[must_use]
pub fn normalize_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_owned(),
        _ => DEFAULT_TITLE.to_owned(),
    }
}

// =============================================================================
// ROW MAPPING
// =============================================================================

const NOTEBOOK_COLUMNS: &str = "id, owner_id, kind, title, content,
    (extract(epoch FROM created_at) * 1000)::bigint AS created_at_ms,
    (extract(epoch FROM updated_at) * 1000)::bigint AS updated_at_ms";

fn decode_kind(row: &PgRow) -> Result<NotebookKind, sqlx::Error> {
    let raw: String = row.try_get("kind")?;
    NotebookKind::from_str(&raw).ok_or_else(|| sqlx::Error::Decode(format!("unknown notebook kind: {raw}").into()))
}

fn row_to_notebook(row: &PgRow) -> Result<Notebook, sqlx::Error> {
    Ok(Notebook {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        kind: decode_kind(row)?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at_ms")?,
        updated_at: row.try_get("updated_at_ms")?,
    })
}

fn row_to_summary(row: &PgRow) -> Result<NotebookSummary, sqlx::Error> {
    Ok(NotebookSummary {
        id: row.try_get("id")?,
        kind: decode_kind(row)?,
        title: row.try_get("title")?,
        updated_at: row.try_get("updated_at_ms")?,
    })
}

// =============================================================================
// CRUD
// =============================================================================

/// Create a notebook for `owner_id`.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_notebook(pool: &PgPool, owner_id: Uuid, new: NewNotebook) -> Result<Notebook, NotebookError> {
    let row = sqlx::query(&format!(
        "INSERT INTO notebooks (id, owner_id, kind, title, content)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {NOTEBOOK_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(new.kind.as_str())
    .bind(normalize_title(new.title.as_deref()))
    .bind(new.content)
    .fetch_one(pool)
    .await?;

    Ok(row_to_notebook(&row)?)
}

/// List every notebook `owner_id` owns, most recently updated first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_notebooks(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Notebook>, NotebookError> {
    let rows = sqlx::query(&format!(
        "SELECT {NOTEBOOK_COLUMNS}
         FROM notebooks
         WHERE owner_id = $1
         ORDER BY updated_at DESC, created_at DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_notebook).collect::<Result<_, _>>()?)
}

/// Fetch one notebook.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, `Forbidden` if another user owns
/// it, or a database error.
pub async fn get_notebook(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<Notebook, NotebookError> {
    let row = sqlx::query(&format!("SELECT {NOTEBOOK_COLUMNS} FROM notebooks WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(NotebookError::NotFound(id))?;

    let notebook = row_to_notebook(&row)?;
    if notebook.owner_id != owner_id {
        return Err(NotebookError::Forbidden(id));
    }
    Ok(notebook)
}

/// Apply a partial update and bump `updated_at`.
///
/// # Errors
///
/// Same as [`get_notebook`].
pub async fn update_notebook(
    pool: &PgPool,
    owner_id: Uuid,
    id: Uuid,
    patch: NotebookPatch,
) -> Result<Notebook, NotebookError> {
    ensure_owner(pool, owner_id, id).await?;

    let row = sqlx::query(&format!(
        "UPDATE notebooks
         SET kind = COALESCE($3, kind),
             title = COALESCE($4, title),
             content = COALESCE($5, content),
             updated_at = now()
         WHERE id = $1 AND owner_id = $2
         RETURNING {NOTEBOOK_COLUMNS}"
    ))
    .bind(id)
    .bind(owner_id)
    .bind(patch.kind.map(NotebookKind::as_str))
    .bind(patch.title.as_deref().map(|t| normalize_title(Some(t))))
    .bind(patch.content)
    .fetch_optional(pool)
    .await?
    .ok_or(NotebookError::NotFound(id))?;

    Ok(row_to_notebook(&row)?)
}

/// Delete a notebook.
///
/// # Errors
///
/// Same as [`get_notebook`].
pub async fn delete_notebook(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<(), NotebookError> {
    ensure_owner(pool, owner_id, id).await?;

    let result = sqlx::query("DELETE FROM notebooks WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(NotebookError::NotFound(id));
    }
    Ok(())
}

async fn ensure_owner(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<(), NotebookError> {
    let owner: Uuid = sqlx::query_scalar("SELECT owner_id FROM notebooks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(NotebookError::NotFound(id))?;
    if owner != owner_id {
        return Err(NotebookError::Forbidden(id));
    }
    Ok(())
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// Count `owner_id`'s notes and sketches.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn totals(pool: &PgPool, owner_id: Uuid) -> Result<Totals, NotebookError> {
    let (notes, sketches): (i64, i64) = sqlx::query_as(
        "SELECT
             count(*) FILTER (WHERE kind = 'notebook'),
             count(*) FILTER (WHERE kind = 'sketch')
         FROM notebooks
         WHERE owner_id = $1",
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(Totals { notes, sketches })
}

/// The `limit` most recently updated notebooks, without content.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn recent(pool: &PgPool, owner_id: Uuid, limit: i64) -> Result<Vec<NotebookSummary>, NotebookError> {
    let rows = sqlx::query(&format!(
        "SELECT {NOTEBOOK_COLUMNS}
         FROM notebooks
         WHERE owner_id = $1
         ORDER BY updated_at DESC, created_at DESC
         LIMIT $2"
    ))
    .bind(owner_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_summary).collect::<Result<_, _>>()?)
}

#[cfg(test)]
#[path = "notebook_test.rs"]
mod tests;
