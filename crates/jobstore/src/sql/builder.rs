use super::parts::SqlPart;
use crate::client::GenericClient;
use crate::error::StoreResult;
use crate::row::FromRow;
use std::fmt::Write;
use std::sync::Arc;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A parameter-safe dynamic SQL builder.
///
/// `Sql` stores SQL pieces and parameters separately and generates `$1, $2, ...`
/// placeholders automatically in the final SQL string. Parameter positions are
/// always contiguous and 1-based, and `values[i]` binds to `$(i+1)` by
/// construction, so composing fragments can never skew the numbering.
#[must_use]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<Arc<dyn ToSql + Sync + Send>>,
}

impl std::fmt::Debug for Sql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sql")
            .field("parts", &self.parts)
            .field("params", &self.params.len())
            .finish()
    }
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            params: Vec::new(),
        }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self {
            parts: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Append raw SQL (no parameters).
    ///
    /// The fragment is interpolated into the statement text verbatim, so it
    /// must never contain caller-controlled strings. Anything a caller
    /// supplies goes through [`Sql::push_bind`].
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a parameter placeholder and bind its value.
    pub fn push_bind<T>(&mut self, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.parts.push(SqlPart::Param);
        self.params.push(Arc::new(value));
        self
    }

    pub(crate) fn push_bind_value(&mut self, value: Arc<dyn ToSql + Sync + Send>) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value);
        self
    }

    /// Append another `Sql` fragment, consuming it.
    ///
    /// Placeholder indices are recomputed over the combined statement, so a
    /// fragment built in isolation stays correct after composition.
    pub fn push_sql(&mut self, mut other: Sql) -> &mut Self {
        self.parts.append(&mut other.parts);
        self.params.append(&mut other.params);
        self
    }

    /// Number of bound parameters so far.
    ///
    /// The next call to [`Sql::push_bind`] will render as `$(param_count() + 1)`.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Render SQL with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        let cap: usize = self
            .parts
            .iter()
            .map(|p| match p {
                SqlPart::Raw(s) => s.len(),
                SqlPart::Param => 3,
            })
            .sum();

        let mut out = String::with_capacity(cap);
        let mut idx = 0;
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => {
                    idx += 1;
                    let _ = write!(out, "${idx}");
                }
            }
        }
        out
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect()
    }

    /// Execute the statement and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> StoreResult<Vec<Row>> {
        let sql = self.to_sql();
        tracing::debug!(sql = %sql, params = self.params.len(), "executing query");
        conn.query(&sql, &self.params_ref()).await
    }

    /// Execute the statement and return all rows mapped to type `T`.
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> StoreResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute the statement and return the first row.
    ///
    /// Returns `StoreError::NotFound` if no rows are returned.
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> StoreResult<Row> {
        let sql = self.to_sql();
        tracing::debug!(sql = %sql, params = self.params.len(), "executing query");
        conn.query_one(&sql, &self.params_ref()).await
    }

    /// Execute the statement and return the first row mapped to type `T`.
    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> StoreResult<T> {
        let row = self.fetch_one(conn).await?;
        T::from_row(&row)
    }

    /// Execute the statement and return the first row, if any.
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> StoreResult<Option<Row>> {
        let sql = self.to_sql();
        tracing::debug!(sql = %sql, params = self.params.len(), "executing query");
        conn.query_opt(&sql, &self.params_ref()).await
    }

    /// Execute the statement and return the first row mapped to `T`, if any.
    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> StoreResult<Option<T>> {
        let row = self.fetch_opt(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute the statement and return the number of affected rows.
    pub async fn execute(&self, conn: &impl GenericClient) -> StoreResult<u64> {
        let sql = self.to_sql();
        tracing::debug!(sql = %sql, params = self.params.len(), "executing statement");
        conn.execute(&sql, &self.params_ref()).await
    }
}
