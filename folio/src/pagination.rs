//! # Pagination Module
//!
//! This module provides the query configuration ([`Config`]) and the two
//! pagination entry points: [`Config::paginate`] for a structured
//! single-table query and [`Config::paginate_raw`] for a caller-supplied
//! projection/from-clause pair.
//!
//! Both run two sequential statements per call (count first, then data)
//! and wrap the rows in a [`Paginated`] envelope.
//!
//! ## Features
//!
//! - **Serde Compatibility**: `Config` deserializes straight from an HTTP
//!   query/body, with defaults for every field
//! - **Deterministic SQL**: filters are an ordered list, AND-joined in
//!   insertion order
//! - **SQL Tracing**: `show_sql` logs the generated statements via
//!   `log::debug!`
//!
//! ## Example
//!
//! ```rust,ignore
//! use folio::{Config, Database, Op, Paginated, Select};
//!
//! let page: Paginated<Book> = Config::new()
//!     .page(1)
//!     .size(10)
//!     .order_by(["year DESC"])
//!     .filter("status", Op::Eq, "active")
//!     .paginate(&db, &Select::new("books"))
//!     .await?;
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, any::AnyRow};

use crate::{
    errors::Error,
    executor::Executor,
    filter::{Filter, FilterSet, Op, Value},
    page::{DEFAULT_PAGE_SIZE, PageMeta, PageRequest, Paginated},
    query::Select,
    raw::RawSelect,
};

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// A pagination query configuration.
///
/// Order-by and group-by entries are column expressions, used verbatim.
/// Non-positive `page`/`size` are silently normalized to the defaults when
/// the query runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The page number (1-indexed). Default: 1.
    #[serde(default = "default_page")]
    pub page: i64,

    /// The number of items per page. Default: 10.
    #[serde(default = "default_size")]
    pub size: i64,

    /// ORDER BY column expressions, joined with commas.
    #[serde(default)]
    pub order_by: Vec<String>,

    /// GROUP BY column expressions, joined with commas.
    #[serde(default)]
    pub group_by: Vec<String>,

    /// Filter conditions, AND-joined in list order.
    #[serde(default)]
    pub filters: FilterSet,

    /// Logs the generated statements via `log::debug!` when set.
    #[serde(default)]
    pub show_sql: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            order_by: Vec::new(),
            group_by: Vec::new(),
            filters: FilterSet::new(),
            show_sql: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    /// Adds ORDER BY column expressions.
    pub fn order_by<I, S>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Adds GROUP BY column expressions.
    pub fn group_by<I, S>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Adds a comparison filter.
    pub fn filter(mut self, field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::compare(field, op, value));
        self
    }

    /// Adds an `IS NULL` filter.
    pub fn filter_null(mut self, field: impl Into<String>) -> Self {
        self.filters.push(Filter::is_null(field));
        self
    }

    /// Adds a verbatim SQL condition (caller-trusted; no escaping).
    pub fn filter_raw(mut self, sql: impl Into<String>) -> Self {
        self.filters.push(Filter::raw(sql.into()));
        self
    }

    pub fn show_sql(mut self, show: bool) -> Self {
        self.show_sql = show;
        self
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size).normalize()
    }

    /// Runs the structured pagination flow: count, then the windowed data
    /// statement, both parameterized.
    ///
    /// # Type Parameters
    ///
    /// * `E` - The executor (usually [`crate::Database`]).
    /// * `R` - The result row type, mapped via `sqlx::FromRow`.
    pub async fn paginate<E, R>(&self, exec: &E, select: &Select) -> Result<Paginated<R>, Error>
    where
        E: Executor,
        R: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let page = self.page_request();
        let driver = exec.driver();

        let (count_sql, count_args) = select.count_statement(&self.filters, &driver);
        if self.show_sql {
            log::debug!("paginate count: {}", count_sql);
        }
        let total = exec.count(&count_sql, count_args).await?;

        let (data_sql, data_args) =
            select.data_statement(&self.filters, &self.group_by, &self.order_by, &page, &driver);
        if self.show_sql {
            log::debug!("paginate data: {}", data_sql);
        }
        let rows = exec.fetch(&data_sql, data_args).await?;

        self.envelope(rows, page, total)
    }

    /// Runs the raw pagination flow: filters render as inline literals and
    /// the window is a literal `LIMIT n OFFSET m`.
    pub async fn paginate_raw<E, R>(&self, exec: &E, raw: &RawSelect) -> Result<Paginated<R>, Error>
    where
        E: Executor,
        R: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let page = self.page_request();
        let driver = exec.driver();

        let count_sql = raw.count_statement(&self.filters, &driver);
        if self.show_sql {
            log::debug!("paginate_raw count: {}", count_sql);
        }
        let total = exec.count(&count_sql, Default::default()).await?;

        let data_sql = raw.data_statement(&self.filters, &self.group_by, &self.order_by, &page, &driver);
        if self.show_sql {
            log::debug!("paginate_raw data: {}", data_sql);
        }
        let rows = exec.fetch(&data_sql, Default::default()).await?;

        self.envelope(rows, page, total)
    }

    fn envelope<R>(&self, rows: Vec<AnyRow>, page: PageRequest, total: i64) -> Result<Paginated<R>, Error>
    where
        R: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let data = rows.iter().map(R::from_row).collect::<Result<Vec<R>, sqlx::Error>>()?;
        Ok(Paginated { data, paginate: PageMeta::new(page, total) })
    }
}
