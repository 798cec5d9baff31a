//! Query executor adapter.
//!
//! The trait is a pure pass-through: statements arrive fully assembled
//! (filters, grouping, ordering and the window are already in the text),
//! the adapter only runs them and hands rows back. Typed row mapping
//! happens in the paginator, not here.

use async_trait::async_trait;
use sqlx::{
    Row,
    any::{AnyArguments, AnyRow},
};

use crate::{
    database::{Database, Drivers},
    errors::Error,
};

/// The seam between the pagination flow and the database.
#[async_trait]
pub trait Executor: Send + Sync {
    /// The driver the statements were rendered for.
    fn driver(&self) -> Drivers;

    /// Runs a count statement and reads the count from column 0.
    async fn count(&self, sql: &str, args: AnyArguments<'_>) -> Result<i64, Error>;

    /// Runs a data statement and returns the raw rows.
    async fn fetch(&self, sql: &str, args: AnyArguments<'_>) -> Result<Vec<AnyRow>, Error>;
}

#[async_trait]
impl Executor for Database {
    fn driver(&self) -> Drivers {
        self.driver
    }

    async fn count(&self, sql: &str, args: AnyArguments<'_>) -> Result<i64, Error> {
        let row = sqlx::query_with(sql, args).fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    async fn fetch(&self, sql: &str, args: AnyArguments<'_>) -> Result<Vec<AnyRow>, Error> {
        Ok(sqlx::query_with(sql, args).fetch_all(&self.pool).await?)
    }
}
