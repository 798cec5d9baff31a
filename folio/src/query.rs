//! Structured single-table query target and its statement assembly.
//!
//! Projection and table are kept as separate fields, so the count statement
//! is assembled (`SELECT COUNT(*) FROM <table><where>`) rather than derived
//! from the data statement's text.

use sqlx::{Arguments, any::AnyArguments};

use crate::{database::Drivers, filter::FilterSet, page::PageRequest};

/// A structured single-table query target.
///
/// Table and column entries are caller-supplied SQL expressions, used
/// verbatim. An empty column list selects `*`.
#[derive(Debug, Clone)]
pub struct Select {
    pub(crate) table: String,
    pub(crate) columns: Vec<String>,
}

impl Select {
    pub fn new(table: impl Into<String>) -> Self {
        Self { table: table.into(), columns: Vec::new() }
    }

    /// Adds a projection column expression.
    pub fn column(mut self, expr: impl Into<String>) -> Self {
        self.columns.push(expr.into());
        self
    }

    /// Adds several projection column expressions.
    pub fn columns<I, S>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(exprs.into_iter().map(Into::into));
        self
    }

    fn projection(&self) -> String {
        if self.columns.is_empty() { "*".to_string() } else { self.columns.join(", ") }
    }

    /// Assembles the count statement: projection, ordering, grouping and the
    /// window are all dropped, only the filters remain.
    pub(crate) fn count_statement<'q>(
        &self,
        filters: &FilterSet,
        driver: &Drivers,
    ) -> (String, AnyArguments<'q>) {
        let mut sql = format!("SELECT COUNT(*) FROM {} WHERE 1=1", self.table);
        let mut args = AnyArguments::default();
        let mut arg_counter = 1;

        filters.push_conditions(&mut sql, &mut args, driver, &mut arg_counter);

        (sql, args)
    }

    /// Assembles the data statement, with LIMIT/OFFSET bound as the trailing
    /// placeholders.
    pub(crate) fn data_statement<'q>(
        &self,
        filters: &FilterSet,
        group_by: &[String],
        order_by: &[String],
        page: &PageRequest,
        driver: &Drivers,
    ) -> (String, AnyArguments<'q>) {
        let mut sql = format!("SELECT {} FROM {} WHERE 1=1", self.projection(), self.table);
        let mut args = AnyArguments::default();
        let mut arg_counter = 1;

        filters.push_conditions(&mut sql, &mut args, driver, &mut arg_counter);

        sql.push_str(&group_clause(group_by));
        sql.push_str(&order_clause(order_by));

        sql.push_str(" LIMIT ");
        driver.push_placeholder(&mut sql, &mut arg_counter);
        let _ = args.add(page.limit());

        sql.push_str(" OFFSET ");
        driver.push_placeholder(&mut sql, &mut arg_counter);
        let _ = args.add(page.offset());

        (sql, args)
    }
}

/// Joins order-by column expressions into an ` ORDER BY …` clause.
pub(crate) fn order_clause(exprs: &[String]) -> String {
    if exprs.is_empty() { String::new() } else { format!(" ORDER BY {}", exprs.join(", ")) }
}

/// Joins group-by column expressions into a ` GROUP BY …` clause.
pub(crate) fn group_clause(exprs: &[String]) -> String {
    if exprs.is_empty() { String::new() } else { format!(" GROUP BY {}", exprs.join(", ")) }
}
