//! Chainable statement builders.
//!
//! A [`Table`] hands out one clause builder per call. Each builder validates
//! its columns against the cached schema when it is created, renders SQL
//! without side effects, and only talks to the engine in `execute`.
//!
//! # Example
//!
//! ```rust,ignore
//! let rows = db
//!     .table("tbl_fruit")?
//!     .retrieve_all()
//!     .filter("stock < ?", (50,))
//!     .execute()
//!     .await?;
//!
//! let updated = db
//!     .table("tbl_fruit")?
//!     .assign_one("stock", 105)?
//!     .filter("name = ?", ("apple",))
//!     .execute()
//!     .await?;
//! ```

mod assign;
mod context;
mod filter;
mod insert;
mod retrieve;
mod table;

pub use assign::Assign;
pub use context::StatementContext;
pub use filter::Filter;
pub use insert::Insert;
pub use retrieve::{Retrieve, Selection};
pub use table::Table;

use crate::error::Result;
use crate::value::SqlValue;

/// Quotes an identifier with double quotes, doubling embedded quotes.
///
/// ```rust
/// use oxide_table_core::quote_identifier;
///
/// assert_eq!(quote_identifier("order"), "\"order\"");
/// assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
/// ```
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes each name and joins them with `", "`.
pub(crate) fn quote_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| quote_identifier(name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A statement a [`Filter`] can wrap.
///
/// `dispatch` runs arbitrary SQL the way the builder runs its own: readers
/// map rows onto their selected columns, writers report success and commit.
#[allow(async_fn_in_trait)]
pub trait Clause {
    /// What `execute` returns.
    type Output;

    /// Renders the statement's SQL.
    fn render(&self) -> String;

    /// Returns the statement's own positional parameters.
    fn params(&self) -> Vec<SqlValue>;

    /// Sends `sql` with `params` to the engine and interprets the result.
    async fn dispatch(&self, sql: &str, params: &[SqlValue]) -> Result<Self::Output>;
}
