//! Incremental assembly of a SELECT statement with positional parameters.
//!
//! Conditions are collected as (fragment, parameter) pairs and only joined
//! into SQL in [`SelectBuilder::build`], which numbers every placeholder in
//! one pass. The keyword for each condition (`WHERE` for the first, `AND`
//! afterwards) and the separating whitespace fall out of the rendering loop,
//! so neither can drift out of sync with the parameter list.

/// Marker inside a condition fragment that is rewritten to the numbered
/// placeholder (`$1`, `$2`, ...) when the statement is rendered.
pub const PARAM: &str = "$?";

struct Condition {
    fragment: String,
    param: String,
}

/// Builder for one SELECT statement. Created fresh per call, consumed by
/// [`SelectBuilder::build`].
pub struct SelectBuilder {
    base: String,
    conditions: Vec<Condition>,
    group_by: Option<String>,
    having: Option<Condition>,
    order_by: Option<String>,
    limit: Option<i64>,
}

impl SelectBuilder {
    /// Start from a base statement (SELECT list, FROM and any JOINs).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            conditions: Vec::new(),
            group_by: None,
            having: None,
            order_by: None,
            limit: None,
        }
    }

    /// Append a row-level condition. `fragment` must contain exactly one
    /// [`PARAM`] marker; `param` is its bound value.
    pub fn filter(mut self, fragment: impl Into<String>, param: impl Into<String>) -> Self {
        let fragment = fragment.into();
        debug_assert_eq!(fragment.matches(PARAM).count(), 1);
        self.conditions.push(Condition {
            fragment,
            param: param.into(),
        });
        self
    }

    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        self.group_by = Some(expr.into());
        self
    }

    /// Append a post-aggregation condition. At most one HAVING condition is
    /// supported; a later call replaces the earlier one.
    pub fn having(mut self, fragment: impl Into<String>, param: impl Into<String>) -> Self {
        let fragment = fragment.into();
        debug_assert_eq!(fragment.matches(PARAM).count(), 1);
        self.having = Some(Condition {
            fragment,
            param: param.into(),
        });
        self
    }

    pub fn order_by(mut self, expr: impl Into<String>) -> Self {
        self.order_by = Some(expr.into());
        self
    }

    /// Truncate the result set. Bound as the statement's final parameter.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the statement and its parameter list. The Nth parameter pushed
    /// here corresponds to placeholder `$N` by construction.
    pub fn build(self) -> (String, Vec<String>) {
        let mut sql = self.base;
        let mut params = Vec::new();

        for (i, cond) in self.conditions.into_iter().enumerate() {
            let keyword = if i == 0 { "WHERE" } else { "AND" };
            params.push(cond.param);
            sql.push('\n');
            sql.push_str(keyword);
            sql.push(' ');
            sql.push_str(&number(&cond.fragment, params.len()));
        }

        if let Some(group) = self.group_by {
            sql.push_str("\nGROUP BY ");
            sql.push_str(&group);
        }

        if let Some(cond) = self.having {
            params.push(cond.param);
            sql.push_str("\nHAVING ");
            sql.push_str(&number(&cond.fragment, params.len()));
        }

        if let Some(order) = self.order_by {
            sql.push_str("\nORDER BY ");
            sql.push_str(&order);
        }

        if let Some(limit) = self.limit {
            params.push(limit.to_string());
            // Parameters travel as text; LIMIT takes a bigint.
            sql.push_str(&format!("\nLIMIT ${}::bigint", params.len()));
        }

        (sql, params)
    }
}

fn number(fragment: &str, position: usize) -> String {
    fragment.replacen(PARAM, &format!("${}", position), 1)
}
