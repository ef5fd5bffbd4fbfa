//! Static field-name to column-name mapping.

use std::collections::HashMap;

/// A fixed table translating client-facing field names to storage column
/// names, e.g. `companyHandle` -> `company_handle`.
///
/// Fields absent from the table resolve to themselves. Resolved names are
/// interpolated into statement text (Postgres cannot parameterize
/// identifiers), which is only safe while every entry is code-controlled:
/// the `&'static str` bound exists to keep caller-derived strings out of the
/// table. Built once per model and shared across calls.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    columns: HashMap<&'static str, &'static str>,
}

impl FieldMap {
    /// Create an empty map; every field resolves to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a field name to its storage column name.
    ///
    /// Falls back to the field name itself when no entry exists.
    pub fn resolve<'a>(&self, field: &'a str) -> &'a str {
        self.columns.get(field).copied().unwrap_or(field)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the map has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<const N: usize> From<[(&'static str, &'static str); N]> for FieldMap {
    fn from(pairs: [(&'static str, &'static str); N]) -> Self {
        Self {
            columns: HashMap::from(pairs),
        }
    }
}

impl FromIterator<(&'static str, &'static str)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (&'static str, &'static str)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_mapped_field() {
        let map = FieldMap::from([("companyHandle", "company_handle")]);
        assert_eq!(map.resolve("companyHandle"), "company_handle");
    }

    #[test]
    fn unmapped_field_passes_through() {
        let map = FieldMap::from([("companyHandle", "company_handle")]);
        assert_eq!(map.resolve("title"), "title");
    }

    #[test]
    fn empty_map_passes_everything_through() {
        let map = FieldMap::new();
        assert_eq!(map.resolve("salary"), "salary");
        assert!(map.is_empty());
    }
}
