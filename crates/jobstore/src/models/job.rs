//! Job model.
//!
//! Schema: `jobs (id serial primary key, title text, salary integer,
//! equity double precision, company_handle text references companies)`.

use serde::Deserialize;
use tokio_postgres::Row;

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::fields::FieldMap;
use crate::filter::JobFilter;
use crate::row::{FromRow, RowExt};
use crate::sql::{Sql, sql};
use crate::update::SparseFields;

const SELECT_JOB: &str = "SELECT id, title, salary, equity, company_handle FROM jobs";
const RETURNING_JOB: &str = " RETURNING id, title, salary, equity, company_handle";

/// A job posting.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Input for creating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// A sparse job update, as sent by a client. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobPatch {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
}

impl JobPatch {
    fn into_sparse_fields(self) -> SparseFields {
        let mut fields = SparseFields::new();
        fields
            .set_if_some("title", self.title)
            .set_if_some("salary", self.salary)
            .set_if_some("equity", self.equity);
        fields
    }
}

impl Job {
    /// Create a job and return the stored row.
    ///
    /// Rejects a duplicate (title, company) pair with a validation error
    /// before inserting.
    pub async fn create(conn: &impl GenericClient, new: NewJob) -> StoreResult<Job> {
        let mut dup = sql("SELECT title FROM jobs WHERE title = ");
        dup.push_bind(new.title.clone())
            .push(" AND company_handle = ")
            .push_bind(new.company_handle.clone());
        if dup.fetch_opt(conn).await?.is_some() {
            return Err(StoreError::validation(format!(
                "duplicate job: {} at company: {}",
                new.title, new.company_handle
            )));
        }

        let mut stmt = sql("INSERT INTO jobs (title, salary, equity, company_handle) VALUES (");
        stmt.push_bind(new.title)
            .push(", ")
            .push_bind(new.salary)
            .push(", ")
            .push_bind(new.equity)
            .push(", ")
            .push_bind(new.company_handle)
            .push(")")
            .push(RETURNING_JOB);
        stmt.fetch_one_as(conn).await
    }

    /// List jobs matching the filter, ordered by title.
    pub async fn find_all(conn: &impl GenericClient, filter: JobFilter) -> StoreResult<Vec<Job>> {
        filter.into_query(SELECT_JOB).fetch_all_as(conn).await
    }

    /// Fetch a single job by id.
    pub async fn get(conn: &impl GenericClient, id: i32) -> StoreResult<Job> {
        let mut stmt = sql(SELECT_JOB);
        stmt.push(" WHERE id = ").push_bind(id);
        stmt.fetch_opt_as(conn)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("no job with id: {id}")))
    }

    /// Apply a sparse update and return the updated row.
    ///
    /// An empty patch fails with the builder's validation error before any
    /// store access; a missing id is a not-found error.
    pub async fn update(conn: &impl GenericClient, id: i32, patch: JobPatch) -> StoreResult<Job> {
        Self::update_sql(id, patch)?
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("no job with id: {id}")))
    }

    fn update_sql(id: i32, patch: JobPatch) -> StoreResult<Sql> {
        // Patch field names match the column names, so the map is empty and
        // every field passes through.
        let assignments = patch.into_sparse_fields().into_assignments(&FieldMap::new())?;

        let mut stmt = sql("UPDATE jobs SET ");
        stmt.push_sql(assignments);
        stmt.push(" WHERE id = ").push_bind(id).push(RETURNING_JOB);
        Ok(stmt)
    }

    /// Delete a job by id.
    pub async fn remove(conn: &impl GenericClient, id: i32) -> StoreResult<()> {
        let mut stmt = sql("DELETE FROM jobs WHERE id = ");
        stmt.push_bind(id);
        match stmt.execute(conn).await? {
            0 => Err(StoreError::not_found(format!("no job with id: {id}"))),
            _ => Ok(()),
        }
    }
}
