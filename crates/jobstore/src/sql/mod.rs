//! Dynamic SQL builder.
//!
//! `Sql` stores SQL text and bound parameters separately and assigns
//! `$1, $2, ...` placeholders when the final string is rendered, so callers
//! compose fragments without tracking placeholder indices by hand.
//!
//! # Example
//!
//! ```ignore
//! use jobstore::sql::sql;
//!
//! let mut q = sql("SELECT id, title FROM jobs");
//! q.push(" WHERE salary >= ").push_bind(60_000_i64);
//! q.push(" ORDER BY title");
//!
//! let rows = q.fetch_all(&client).await?;
//! ```

mod builder;
mod parts;


pub use builder::Sql;

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}
