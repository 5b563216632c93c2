use employee_core::model::{Department, EmployeeRecord};
use serde::{Deserialize, Serialize};
use surrealdb::engine::any::{connect, Any};
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

use crate::config::Config;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures. `Conflict` carries the human name of the field whose
/// unique index rejected a write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] surrealdb::Error),
    #[error("counter upsert returned no document")]
    CounterMissing,
    #[error("unique index violation on {0}")]
    Conflict(&'static str),
    #[error("store returned no document for {0}")]
    MissingDocument(&'static str),
}

/// Employee record as stored, keyed by a ULID record id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRow {
    pub id: RecordId,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: Department,
    pub created_at_ms: i64,
    pub last_modified_at_ms: i64,
}

impl EmployeeRow {
    /// Converts the storage row into the domain record, flattening the
    /// record id to its string key.
    pub fn into_record(self) -> EmployeeRecord {
        EmployeeRecord {
            id: self.id.key().to_string(),
            employee_id: self.employee_id,
            full_name: self.full_name,
            email: self.email,
            department: self.department,
            created_at_ms: self.created_at_ms,
            last_modified_at_ms: self.last_modified_at_ms,
        }
    }
}

/// Field set for a new employee document. The record key is supplied
/// separately so the row id never travels inside the content.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeContent {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: Department,
    pub created_at_ms: i64,
    pub last_modified_at_ms: i64,
}

#[derive(Debug, Deserialize)]
struct CounterRow {
    sequence: i64,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

#[derive(Clone)]
pub struct Db {
    inner: Surreal<Any>,
}

impl Db {
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let inner = connect(config.db_url.as_str()).await?;
        inner
            .use_ns(config.ns.as_str())
            .use_db(config.db.as_str())
            .await?;
        Ok(Self { inner })
    }

    /// Applies table definitions, unique indexes and the counter seed.
    pub async fn bootstrap_schema(&self) -> StoreResult<()> {
        self.inner
            .query(include_str!("../schema.surql"))
            .await?
            .check()?;
        Ok(())
    }

    /// Atomically increments the named counter and returns the new value,
    /// creating the counter at 1 if it does not yet exist.
    ///
    /// The whole find-increment-return runs as a single store statement;
    /// concurrent callers never observe the same value. A result without a
    /// document is an error, never a fabricated sequence value.
    pub async fn next_sequence(&self, name: &str) -> StoreResult<i64> {
        let mut res = self
            .inner
            .query("UPSERT type::thing('counter', $name) SET sequence += 1 RETURN AFTER;")
            .bind(("name", name.to_string()))
            .await?;
        let row: Option<CounterRow> = res.take(0)?;
        let row = row.ok_or(StoreError::CounterMissing)?;
        Ok(row.sequence)
    }

    pub async fn create_employee(
        &self,
        key: &str,
        content: EmployeeContent,
    ) -> StoreResult<EmployeeRow> {
        let created: Option<EmployeeRow> = self
            .inner
            .create(("employee", key))
            .content(content)
            .await
            .map_err(index_conflict)?;
        created.ok_or(StoreError::MissingDocument("employee create"))
    }

    pub async fn find_by_key(&self, key: &str) -> StoreResult<Option<EmployeeRow>> {
        let row: Option<EmployeeRow> = self.inner.select(("employee", key)).await?;
        Ok(row)
    }

    pub async fn find_by_employee_id(&self, employee_id: &str) -> StoreResult<Option<EmployeeRow>> {
        let mut res = self
            .inner
            .query("SELECT * FROM employee WHERE employee_id = $employee_id LIMIT 1;")
            .bind(("employee_id", employee_id.to_string()))
            .await?;
        let row: Option<EmployeeRow> = res.take(0)?;
        Ok(row)
    }

    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<EmployeeRow>> {
        let mut res = self
            .inner
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1;")
            .bind(("email", email.to_string()))
            .await?;
        let row: Option<EmployeeRow> = res.take(0)?;
        Ok(row)
    }

    /// Merges the given fields into an existing employee document.
    /// Returns `None` when the record does not exist.
    pub async fn update_employee(
        &self,
        key: &str,
        merge: serde_json::Value,
    ) -> StoreResult<Option<EmployeeRow>> {
        let updated: Option<EmployeeRow> = self
            .inner
            .update(("employee", key))
            .merge(merge)
            .await
            .map_err(index_conflict)?;
        Ok(updated)
    }

    pub async fn delete_employee(&self, key: &str) -> StoreResult<Option<EmployeeRow>> {
        let deleted: Option<EmployeeRow> = self.inner.delete(("employee", key)).await?;
        Ok(deleted)
    }

    /// One page of the full listing in creation order, plus the total count.
    pub async fn list_employees(&self, start: i64, limit: i64) -> StoreResult<(Vec<EmployeeRow>, u64)> {
        let mut res = self
            .inner
            .query(
                "SELECT * FROM employee ORDER BY created_at_ms ASC, employee_id ASC LIMIT $limit START $start; \
                 SELECT count() FROM employee GROUP ALL;",
            )
            .bind(("limit", limit))
            .bind(("start", start))
            .await?;
        let rows: Vec<EmployeeRow> = res.take(0)?;
        let total: Option<CountRow> = res.take(1)?;
        Ok((rows, total.map(|t| t.count).unwrap_or(0)))
    }

    /// Case-insensitive substring search over full name and/or department,
    /// plus the total count of matches.
    pub async fn search_employees(
        &self,
        full_name: Option<String>,
        department: Option<String>,
        start: i64,
        limit: i64,
    ) -> StoreResult<(Vec<EmployeeRow>, u64)> {
        const COND: &str = "($full_name IS NOT NONE \
                AND string::contains(string::lowercase(full_name), string::lowercase($full_name))) \
            OR ($department IS NOT NONE \
                AND string::contains(string::lowercase(department), string::lowercase($department)))";
        let sql = format!(
            "SELECT * FROM employee WHERE {COND} ORDER BY created_at_ms ASC, employee_id ASC LIMIT $limit START $start; \
             SELECT count() FROM employee WHERE {COND} GROUP ALL;"
        );

        let mut res = self
            .inner
            .query(sql)
            .bind(("full_name", full_name))
            .bind(("department", department))
            .bind(("limit", limit))
            .bind(("start", start))
            .await?;
        let rows: Vec<EmployeeRow> = res.take(0)?;
        let total: Option<CountRow> = res.take(1)?;
        Ok((rows, total.map(|t| t.count).unwrap_or(0)))
    }
}

/// Translates unique-index rejections into `Conflict`; everything else stays
/// a store failure.
fn index_conflict(err: surrealdb::Error) -> StoreError {
    let msg = err.to_string();
    if msg.contains("uniq_employee_email") {
        StoreError::Conflict("email")
    } else if msg.contains("uniq_employee_external_id") {
        StoreError::Conflict("employee id")
    } else {
        StoreError::Db(err)
    }
}
