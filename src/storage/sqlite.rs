use crate::model::{Field, Form, Response, StorageError};
use crate::storage::{FeedbackWriter, FormRepository, ResponseRepository};
use crate::utils::parse_datetime;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

const FORM_COLUMNS: &str = "id, user_id, title, description, fields, is_active, created_at, updated_at";

pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens the database (`:memory:` works too) and creates the schema if needed.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS forms (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                fields TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS responses (
                id TEXT PRIMARY KEY,
                form_id TEXT NOT NULL,
                answers TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_responses_form_id ON responses (form_id);
            "
        )?;

        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Maps a `forms` row selected with `FORM_COLUMNS` into a `Form`.
    fn map_form(row: &Row) -> Result<Form, rusqlite::Error> {
        let fields_json: String = row.get(4)?;
        let fields: Vec<Field> = serde_json::from_str(&fields_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        let mut form = Form {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            fields,
            is_active: row.get(5)?,
            created_at: Self::timestamp(row, 6)?,
            updated_at: Self::timestamp(row, 7)?,
        };
        form.sort_fields();
        Ok(form)
    }

    fn map_response(row: &Row) -> Result<Response, rusqlite::Error> {
        let answers_json: String = row.get(2)?;
        let answers: BTreeMap<String, serde_json::Value> = serde_json::from_str(&answers_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

        Ok(Response {
            id: row.get(0)?,
            form_id: row.get(1)?,
            answers,
            created_at: Self::timestamp(row, 3)?,
        })
    }

    fn timestamp(row: &Row, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
        let raw: String = row.get(idx)?;
        parse_datetime(&raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                Box::new(StorageError::Corrupt(format!("invalid timestamp '{}'", raw))),
            )
        })
    }
}

#[async_trait]
impl FormRepository for SqliteStorage {
    async fn get_form_by_id(&self, id: &str) -> Result<Option<Form>, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM forms WHERE id = ?1", FORM_COLUMNS))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::map_form(row)?))
        } else {
            Ok(None)
        }
    }

    async fn list_forms(&self, user_id: Option<&str>) -> Result<Vec<Form>, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM forms WHERE ?1 IS NULL OR user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            FORM_COLUMNS
        ))?;

        let rows = stmt.query_map(params![user_id], Self::map_form)?;
        let mut forms = Vec::new();
        for form in rows {
            forms.push(form?);
        }

        Ok(forms)
    }
}

#[async_trait]
impl ResponseRepository for SqliteStorage {
    async fn get_responses(&self, form_id: &str) -> Result<Vec<Response>, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, form_id, answers, created_at FROM responses WHERE form_id = ?1",
        )?;

        let rows = stmt.query_map(params![form_id], Self::map_response)?;
        let mut responses = Vec::new();
        for response in rows {
            responses.push(response?);
        }

        Ok(responses)
    }
}

#[async_trait]
impl FeedbackWriter for SqliteStorage {
    async fn insert_form(&self, form: Form) -> Result<(), StorageError> {
        let fields_json = serde_json::to_string(&form.fields)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO forms (
                id, user_id, title, description, fields, is_active, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &form.id,
                &form.user_id,
                &form.title,
                &form.description,
                &fields_json,
                &form.is_active,
                &form.created_at.to_rfc3339(),
                &form.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    async fn insert_response(&self, response: Response) -> Result<(), StorageError> {
        let answers_json = serde_json::to_string(&response.answers)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO responses (id, form_id, answers, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &response.id,
                &response.form_id,
                &answers_json,
                &response.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    async fn delete_form(&self, id: &str) -> Result<bool, StorageError> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM forms WHERE id = ?1", params![id])?;
        if removed > 0 {
            tx.execute("DELETE FROM responses WHERE form_id = ?1", params![id])?;
        }
        tx.commit()?;
        Ok(removed > 0)
    }
}
