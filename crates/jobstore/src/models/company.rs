//! Company model.
//!
//! Schema: `companies (handle text primary key, name text unique,
//! description text, num_employees integer, logo_url text)`.

use std::sync::LazyLock;

use serde::Deserialize;
use tokio_postgres::Row;

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::fields::FieldMap;
use crate::filter::CompanyFilter;
use crate::row::{FromRow, RowExt};
use crate::sql::{Sql, sql};
use crate::update::SparseFields;

const SELECT_COMPANY: &str =
    "SELECT handle, name, description, num_employees, logo_url FROM companies";
const RETURNING_COMPANY: &str = " RETURNING handle, name, description, num_employees, logo_url";

// Client field names to column names; shared across calls.
static COMPANY_FIELDS: LazyLock<FieldMap> = LazyLock::new(|| {
    FieldMap::from([("numEmployees", "num_employees"), ("logoUrl", "logo_url")])
});

/// A company that posts jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// Input for creating a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A sparse company update. The handle is the row identity and cannot be
/// patched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    fn into_sparse_fields(self) -> SparseFields {
        let mut fields = SparseFields::new();
        fields
            .set_if_some("name", self.name)
            .set_if_some("description", self.description)
            .set_if_some("numEmployees", self.num_employees)
            .set_if_some("logoUrl", self.logo_url);
        fields
    }
}

impl Company {
    /// Create a company and return the stored row.
    ///
    /// Rejects a duplicate handle with a validation error before inserting.
    pub async fn create(conn: &impl GenericClient, new: NewCompany) -> StoreResult<Company> {
        let mut dup = sql("SELECT handle FROM companies WHERE handle = ");
        dup.push_bind(new.handle.clone());
        if dup.fetch_opt(conn).await?.is_some() {
            return Err(StoreError::validation(format!(
                "duplicate company: {}",
                new.handle
            )));
        }

        let mut stmt = sql(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) VALUES (",
        );
        stmt.push_bind(new.handle)
            .push(", ")
            .push_bind(new.name)
            .push(", ")
            .push_bind(new.description)
            .push(", ")
            .push_bind(new.num_employees)
            .push(", ")
            .push_bind(new.logo_url)
            .push(")")
            .push(RETURNING_COMPANY);
        stmt.fetch_one_as(conn).await
    }

    /// List companies matching the filter, ordered by name.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: CompanyFilter,
    ) -> StoreResult<Vec<Company>> {
        filter.into_query(SELECT_COMPANY)?.fetch_all_as(conn).await
    }

    /// Fetch a single company by handle.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> StoreResult<Company> {
        let mut stmt = sql(SELECT_COMPANY);
        stmt.push(" WHERE handle = ").push_bind(handle.to_string());
        stmt.fetch_opt_as(conn)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("no company: {handle}")))
    }

    /// Apply a sparse update and return the updated row.
    pub async fn update(
        conn: &impl GenericClient,
        handle: &str,
        patch: CompanyPatch,
    ) -> StoreResult<Company> {
        Self::update_sql(handle, patch)?
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("no company: {handle}")))
    }

    fn update_sql(handle: &str, patch: CompanyPatch) -> StoreResult<Sql> {
        let assignments = patch
            .into_sparse_fields()
            .into_assignments(&COMPANY_FIELDS)?;

        let mut stmt = sql("UPDATE companies SET ");
        stmt.push_sql(assignments);
        stmt.push(" WHERE handle = ")
            .push_bind(handle.to_string())
            .push(RETURNING_COMPANY);
        Ok(stmt)
    }

    /// Delete a company by handle.
    pub async fn remove(conn: &impl GenericClient, handle: &str) -> StoreResult<()> {
        let mut stmt = sql("DELETE FROM companies WHERE handle = ");
        stmt.push_bind(handle.to_string());
        match stmt.execute(conn).await? {
            0 => Err(StoreError::not_found(format!("no company: {handle}"))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_sql_maps_camel_case_fields() {
        let patch = CompanyPatch {
            num_employees: Some(250),
            logo_url: Some("https://example.com/logo.png".into()),
            ..Default::default()
        };
        let stmt = Company::update_sql("anderson-arias-morrow", patch).unwrap();
        assert_eq!(
            stmt.to_sql(),
            "UPDATE companies SET \"num_employees\"=$1, \"logo_url\"=$2 WHERE handle = $3 \
             RETURNING handle, name, description, num_employees, logo_url"
        );
        assert_eq!(stmt.params_ref().len(), 3);
    }

    #[test]
    fn unmapped_patch_fields_pass_through() {
        let patch = CompanyPatch {
            name: Some("Anderson".into()),
            description: Some("A company".into()),
            ..Default::default()
        };
        let stmt = Company::update_sql("c1", patch).unwrap();
        assert!(
            stmt.to_sql()
                .starts_with("UPDATE companies SET \"name\"=$1, \"description\"=$2")
        );
    }

    #[test]
    fn empty_patch_is_a_validation_error() {
        let err = Company::update_sql("c1", CompanyPatch::default()).unwrap_err();
        assert!(err.is_validation());
    }
}
