//! WHERE extension for retrieve and assign statements.

use super::Clause;
use crate::error::Result;
use crate::value::SqlValue;

/// A clause builder's statement followed by `WHERE <condition>`.
///
/// Parameters are bound base-first: the wrapped statement's own parameters
/// (assigned values for an UPDATE, none for a SELECT), then the condition's,
/// matching the left-to-right order of `?` placeholders in the final SQL.
#[derive(Debug)]
pub struct Filter<B> {
    base: B,
    base_sql: String,
    base_params: Vec<SqlValue>,
    condition: String,
    condition_params: Vec<SqlValue>,
}

impl<B: Clause> Filter<B> {
    pub(crate) fn new(base: B, condition: &str, condition_params: Vec<SqlValue>) -> Self {
        let base_sql = base.render();
        let base_params = base.params();
        Self {
            base,
            base_sql,
            base_params,
            condition: condition.to_string(),
            condition_params,
        }
    }

    /// Returns the wrapped builder.
    #[must_use]
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Returns the condition text.
    #[must_use]
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Renders the filtered statement.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{} WHERE {}", self.base_sql, self.condition)
    }

    /// Returns the bound parameters: base parameters, then condition
    /// parameters.
    #[must_use]
    pub fn params(&self) -> Vec<SqlValue> {
        self.base_params
            .iter()
            .chain(&self.condition_params)
            .cloned()
            .collect()
    }

    /// Runs the filtered statement through the wrapped builder.
    pub async fn execute(&self) -> Result<B::Output> {
        self.base.dispatch(&self.render(), &self.params()).await
    }
}
