//! # jobstore
//!
//! Data-access layer for a small jobs/companies board on PostgreSQL.
//!
//! The interesting part is query construction:
//!
//! - **[`FieldMap`]**: static client-field-name to column-name table with a
//!   pass-through default.
//! - **[`SparseFields`]**: turns the sparse set of fields a caller wants to
//!   change into a parameterized `SET` clause plus its ordered values.
//! - **[`JobFilter`] / [`CompanyFilter`]**: turn optional search criteria
//!   into a dynamic conjunctive `WHERE` clause on a base `SELECT`.
//!
//! All three are pure and synchronous; the model types ([`Job`],
//! [`Company`]) execute the results through [`GenericClient`], which accepts
//! either a client or a transaction.
//!
//! Safety boundary: caller-supplied values are always bound as positional
//! parameters. Column names are interpolated into statement text, which is
//! why they may only come from a code-controlled [`FieldMap`] or from
//! literals in this crate. Never route caller strings into identifiers.
//!
//! ## Example
//!
//! ```ignore
//! use jobstore::{connect, Job, JobFilter, StoreConfig};
//!
//! let client = connect(&StoreConfig::from_env()?).await?;
//! let filter = JobFilter { min_salary: Some(60_000), ..Default::default() };
//! let jobs = Job::find_all(&client, filter).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod filter;
pub mod models;
pub mod row;
pub mod sql;
pub mod update;

pub use client::GenericClient;
pub use config::{StoreConfig, connect};
pub use error::{StoreError, StoreResult};
pub use fields::FieldMap;
pub use filter::{CompanyFilter, JobFilter};
pub use models::{Company, CompanyPatch, Job, JobPatch, NewCompany, NewJob};
pub use row::{FromRow, RowExt};
pub use sql::{Sql, sql};
pub use update::SparseFields;
