//! Filtered-search query construction.
//!
//! Each filter turns its present criteria into a conjunctive `WHERE` clause
//! composed onto a base `SELECT`, followed by a deterministic `ORDER BY`.
//! The builders are pure: they never execute anything.

use serde::{Deserialize, Deserializer};

use crate::error::{StoreError, StoreResult};
use crate::sql::Sql;

/// Optional search criteria for jobs.
///
/// Deserialized from loosely-typed HTTP query input, so `hasEquity` uses a
/// strict deserializer: only a literal boolean `true` activates the filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobFilter {
    /// Exact title match.
    pub title: Option<String>,
    /// Lower bound on salary (inclusive).
    pub min_salary: Option<i32>,
    /// Restrict to jobs with a non-zero equity share.
    #[serde(deserialize_with = "strict_flag")]
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Compose the filter onto a base `SELECT` (which must carry no `WHERE`
    /// clause of its own).
    ///
    /// Predicates are appended in declaration order, `AND`-joined; parameter
    /// positions are contiguous from `$1`. The equity predicate is a literal
    /// comparison and binds no value. The ordering clause is always appended,
    /// filters or not.
    pub fn into_query(self, base: impl Into<String>) -> Sql {
        let mut predicates: Vec<Sql> = Vec::new();

        if let Some(title) = self.title {
            let mut p = Sql::new("title = ");
            p.push_bind(title);
            predicates.push(p);
        }
        if let Some(min_salary) = self.min_salary {
            let mut p = Sql::new("salary >= ");
            p.push_bind(min_salary);
            predicates.push(p);
        }
        // Strict equality on purpose: Some(false) and None both mean "no
        // filter". Only `true` restricts the result set.
        if self.has_equity == Some(true) {
            predicates.push(Sql::new("equity > 0"));
        }

        compose(base, predicates, "title")
    }
}

/// Optional search criteria for companies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Case-insensitive substring match on the company name.
    pub name: Option<String>,
    /// Lower bound on employee count (inclusive).
    pub min_employees: Option<i32>,
    /// Upper bound on employee count (inclusive).
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Compose the filter onto a base `SELECT` (no `WHERE` clause).
    ///
    /// Fails with `StoreError::Validation` when `minEmployees` exceeds
    /// `maxEmployees`, before any query text is produced.
    pub fn into_query(self, base: impl Into<String>) -> StoreResult<Sql> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees)
            && min > max
        {
            return Err(StoreError::validation(
                "minEmployees cannot be greater than maxEmployees",
            ));
        }

        let mut predicates: Vec<Sql> = Vec::new();

        if let Some(name) = self.name {
            let mut p = Sql::new("name ILIKE ");
            p.push_bind(format!("%{name}%"));
            predicates.push(p);
        }
        if let Some(min) = self.min_employees {
            let mut p = Sql::new("num_employees >= ");
            p.push_bind(min);
            predicates.push(p);
        }
        if let Some(max) = self.max_employees {
            let mut p = Sql::new("num_employees <= ");
            p.push_bind(max);
            predicates.push(p);
        }

        Ok(compose(base, predicates, "name"))
    }
}

/// Join predicates with ` AND ` under a single `WHERE`, then append the
/// ordering clause. With no predicates the base query passes through
/// untouched (modulo the ordering clause).
fn compose(base: impl Into<String>, predicates: Vec<Sql>, order_by: &str) -> Sql {
    let mut query = Sql::new(base);
    for (i, predicate) in predicates.into_iter().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });
        query.push_sql(predicate);
    }
    query.push(" ORDER BY ");
    query.push(order_by);
    query
}

/// Only a JSON boolean activates the flag. Any other shape a client manages
/// to send ("true", "false", 1, ...) is treated as "filter absent" rather
/// than coerced; a truthiness check here would let the string `"false"`
/// switch the filter on.
fn strict_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(flag) => Some(flag),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "SELECT id, title, salary, equity, company_handle FROM jobs";

    #[test]
    fn no_criteria_passes_base_through() {
        let q = JobFilter::default().into_query(BASE);
        assert_eq!(q.to_sql(), format!("{BASE} ORDER BY title"));
        assert_eq!(q.params_ref().len(), 0);
    }

    #[test]
    fn title_alone_binds_one_value() {
        let filter = JobFilter {
            title: Some("j1".into()),
            ..Default::default()
        };
        let q = filter.into_query(BASE);
        assert_eq!(q.to_sql(), format!("{BASE} WHERE title = $1 ORDER BY title"));
        assert_eq!(q.params_ref().len(), 1);
    }

    #[test]
    fn min_salary_alone_uses_gte() {
        let filter = JobFilter {
            min_salary: Some(60_000),
            ..Default::default()
        };
        let q = filter.into_query(BASE);
        assert_eq!(
            q.to_sql(),
            format!("{BASE} WHERE salary >= $1 ORDER BY title")
        );
        assert_eq!(q.params_ref().len(), 1);
    }

    #[test]
    fn equity_flag_is_a_literal_comparison() {
        let filter = JobFilter {
            has_equity: Some(true),
            ..Default::default()
        };
        let q = filter.into_query(BASE);
        assert_eq!(q.to_sql(), format!("{BASE} WHERE equity > 0 ORDER BY title"));
        assert_eq!(q.params_ref().len(), 0);
    }

    #[test]
    fn equity_flag_false_is_no_filter() {
        let filter = JobFilter {
            has_equity: Some(false),
            ..Default::default()
        };
        let q = filter.into_query(BASE);
        assert_eq!(q.to_sql(), format!("{BASE} ORDER BY title"));
    }

    #[test]
    fn all_criteria_join_with_and() {
        let filter = JobFilter {
            title: Some("foo".into()),
            min_salary: Some(10),
            has_equity: Some(true),
        };
        let q = filter.into_query(BASE);
        assert_eq!(
            q.to_sql(),
            format!("{BASE} WHERE title = $1 AND salary >= $2 AND equity > 0 ORDER BY title")
        );
        assert_eq!(q.params_ref().len(), 2);
    }

    #[test]
    fn stringly_typed_flag_deserializes_as_absent() {
        let filter: JobFilter = serde_json::from_value(json!({ "hasEquity": "true" })).unwrap();
        assert_eq!(filter.has_equity, None);

        let q = filter.into_query(BASE);
        assert_eq!(q.to_sql(), format!("{BASE} ORDER BY title"));
        assert_eq!(q.params_ref().len(), 0);
    }

    #[test]
    fn stringly_typed_false_does_not_sneak_in() {
        let filter: JobFilter = serde_json::from_value(json!({ "hasEquity": "false" })).unwrap();
        assert_eq!(filter.has_equity, None);
    }

    #[test]
    fn boolean_flag_deserializes_strictly() {
        let filter: JobFilter = serde_json::from_value(json!({ "hasEquity": true })).unwrap();
        assert_eq!(filter.has_equity, Some(true));

        let filter: JobFilter = serde_json::from_value(json!({ "hasEquity": false })).unwrap();
        assert_eq!(filter.has_equity, Some(false));
    }

    #[test]
    fn job_filter_deserializes_camel_case() {
        let filter: JobFilter =
            serde_json::from_value(json!({ "title": "j1", "minSalary": 50000 })).unwrap();
        assert_eq!(filter.title.as_deref(), Some("j1"));
        assert_eq!(filter.min_salary, Some(50_000));
    }

    const COMPANY_BASE: &str =
        "SELECT handle, name, description, num_employees, logo_url FROM companies";

    #[test]
    fn company_filter_combines_name_and_bounds() {
        let filter = CompanyFilter {
            name: Some("net".into()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let q = filter.into_query(COMPANY_BASE).unwrap();
        assert_eq!(
            q.to_sql(),
            format!(
                "{COMPANY_BASE} WHERE name ILIKE $1 AND num_employees >= $2 \
                 AND num_employees <= $3 ORDER BY name"
            )
        );
        assert_eq!(q.params_ref().len(), 3);
    }

    #[test]
    fn company_filter_rejects_inverted_bounds() {
        let filter = CompanyFilter {
            min_employees: Some(500),
            max_employees: Some(10),
            ..Default::default()
        };
        assert!(filter.into_query(COMPANY_BASE).unwrap_err().is_validation());
    }

    #[test]
    fn company_filter_empty_is_ordering_only() {
        let q = CompanyFilter::default().into_query(COMPANY_BASE).unwrap();
        assert_eq!(q.to_sql(), format!("{COMPANY_BASE} ORDER BY name"));
        assert_eq!(q.params_ref().len(), 0);
    }
}
