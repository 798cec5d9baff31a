// Module declarations
pub mod database;
pub mod errors;
pub mod executor;
pub mod filter;
pub mod page;
pub mod pagination;
pub mod query;
pub mod raw;

// Re-exports for the public API
pub use database::{Database, Drivers};
pub use errors::Error;
pub use executor::Executor;
pub use filter::{Filter, FilterSet, Op, Value};
pub use page::{PageMeta, PageRequest, Paginated};
pub use pagination::Config;
pub use query::Select;
pub use raw::RawSelect;
