//! Raw query target: caller-supplied projection and from-clause.
//!
//! The two pieces stay separate so the count statement is assembled from
//! the from-clause directly. Nothing is parsed; a `FROM` inside a subquery
//! or string literal in the from-clause is harmless.

use crate::{
    database::Drivers,
    filter::FilterSet,
    page::PageRequest,
    query::{group_clause, order_clause},
};

/// A raw query target.
///
/// `projection` is the select list; `from` is everything after the `FROM`
/// keyword (it may contain joins and subqueries). Both are used verbatim.
/// Filters render as inline literals on this path, and the window is a
/// literal `LIMIT n OFFSET m`.
#[derive(Debug, Clone)]
pub struct RawSelect {
    pub(crate) projection: String,
    pub(crate) from: String,
}

impl RawSelect {
    /// # Example
    ///
    /// ```rust,ignore
    /// let raw = RawSelect::new(
    ///     "b.title, a.name AS author",
    ///     "books b JOIN authors a ON a.id = b.author_id",
    /// );
    /// ```
    pub fn new(projection: impl Into<String>, from: impl Into<String>) -> Self {
        Self { projection: projection.into(), from: from.into() }
    }

    /// `SELECT COUNT(*) FROM <from><where>` — counts matching rows before
    /// grouping.
    pub(crate) fn count_statement(&self, filters: &FilterSet, driver: &Drivers) -> String {
        format!("SELECT COUNT(*) FROM {}{}", self.from, filters.literal_clause(driver))
    }

    pub(crate) fn data_statement(
        &self,
        filters: &FilterSet,
        group_by: &[String],
        order_by: &[String],
        page: &PageRequest,
        driver: &Drivers,
    ) -> String {
        format!(
            "SELECT {} FROM {}{}{}{} LIMIT {} OFFSET {}",
            self.projection,
            self.from,
            filters.literal_clause(driver),
            group_clause(group_by),
            order_clause(order_by),
            page.limit(),
            page.offset(),
        )
    }
}
