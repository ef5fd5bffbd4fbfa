//! Partial-update construction.
//!
//! Turns the sparse set of fields a caller wants to change into a
//! parameterized `SET` assignment list plus its ordered values, ready to be
//! spliced into an `UPDATE` statement. Values are always bound positionally;
//! only column names resolved through a code-controlled [`FieldMap`] reach
//! the statement text.

use std::sync::Arc;

use tokio_postgres::types::ToSql;

use crate::error::{StoreError, StoreResult};
use crate::fields::FieldMap;
use crate::sql::Sql;

/// An ordered sparse set of field updates.
///
/// Insertion order is a contract: assignment fragments and bound values come
/// out in exactly the order fields were set, so `values[i]` binds to
/// `$(i+1)`. Setting an explicit NULL is done by binding `None::<T>`.
#[derive(Default)]
pub struct SparseFields {
    entries: Vec<(String, Arc<dyn ToSql + Sync + Send>)>,
}

impl SparseFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field to change.
    pub fn set<T>(&mut self, field: impl Into<String>, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.entries.push((field.into(), Arc::new(value)));
        self
    }

    /// Record a field to change only when a value is present.
    ///
    /// `None` means "leave unchanged" here; to set a column to NULL, call
    /// [`SparseFields::set`] with `None::<T>` directly.
    pub fn set_if_some<T>(&mut self, field: impl Into<String>, value: Option<T>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(value) = value {
            self.set(field, value);
        }
        self
    }

    /// Number of fields recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fields have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the parameterized assignment list for an `UPDATE ... SET`.
    ///
    /// For the i-th field (1-based) this emits `"<column>"=$<i>`, fragments
    /// joined by `", "`, with the field's value bound at the same position.
    /// The caller appends its own row predicate afterwards; composition keeps
    /// the predicate's parameter index at `len() + 1` automatically.
    ///
    /// Fails with `StoreError::Validation` when no fields were set. This is
    /// checked synchronously, before any store access can happen.
    pub fn into_assignments(self, map: &FieldMap) -> StoreResult<Sql> {
        if self.entries.is_empty() {
            return Err(StoreError::validation("no data to update"));
        }

        let mut sql = Sql::empty();
        for (i, (field, value)) in self.entries.into_iter().enumerate() {
            if i > 0 {
                sql.push(", ");
            }
            let column = map.resolve(&field);
            sql.push(&format!("\"{column}\"="));
            sql.push_bind_value(value);
        }
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::sql;

    #[test]
    fn maps_fields_and_numbers_parameters() {
        let map = FieldMap::from([("firstName", "first_name"), ("lastName", "last_name")]);
        let mut fields = SparseFields::new();
        fields
            .set("firstName", "John")
            .set("lastName", "Doe")
            .set("age", 30_i32);

        let assignments = fields.into_assignments(&map).unwrap();
        assert_eq!(
            assignments.to_sql(),
            "\"first_name\"=$1, \"last_name\"=$2, \"age\"=$3"
        );
        assert_eq!(assignments.params_ref().len(), 3);
    }

    #[test]
    fn unmapped_fields_use_their_own_name() {
        let mut fields = SparseFields::new();
        fields.set("title", "engineer").set("salary", 90_000_i32);

        let assignments = fields.into_assignments(&FieldMap::new()).unwrap();
        assert_eq!(assignments.to_sql(), "\"title\"=$1, \"salary\"=$2");
    }

    #[test]
    fn value_count_matches_field_count() {
        let mut fields = SparseFields::new();
        fields.set("a", 1_i32).set("b", 2_i32).set("c", 3_i32);
        assert_eq!(fields.len(), 3);

        let assignments = fields.into_assignments(&FieldMap::new()).unwrap();
        assert_eq!(assignments.params_ref().len(), 3);
    }

    #[test]
    fn empty_set_is_a_validation_error() {
        let err = SparseFields::new()
            .into_assignments(&FieldMap::new())
            .unwrap_err();
        assert!(err.is_validation());

        let map = FieldMap::from([("firstName", "first_name")]);
        let err = SparseFields::new().into_assignments(&map).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn explicit_null_binds_a_parameter() {
        let mut fields = SparseFields::new();
        fields.set("salary", None::<i32>);

        let assignments = fields.into_assignments(&FieldMap::new()).unwrap();
        assert_eq!(assignments.to_sql(), "\"salary\"=$1");
        assert_eq!(assignments.params_ref().len(), 1);
    }

    #[test]
    fn set_if_some_skips_absent_values() {
        let mut fields = SparseFields::new();
        fields
            .set_if_some("title", Some("engineer"))
            .set_if_some("salary", None::<i32>);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn row_predicate_lands_after_the_assignments() {
        let mut fields = SparseFields::new();
        fields.set("title", "engineer").set("salary", 90_000_i32);

        let mut stmt = sql("UPDATE jobs SET ");
        stmt.push_sql(fields.into_assignments(&FieldMap::new()).unwrap());
        stmt.push(" WHERE id = ").push_bind(7_i32);

        assert_eq!(
            stmt.to_sql(),
            "UPDATE jobs SET \"title\"=$1, \"salary\"=$2 WHERE id = $3"
        );
        assert_eq!(stmt.params_ref().len(), 3);
    }
}
