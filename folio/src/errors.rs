//! # Error Handling Module
//!
//! This module defines the error types used throughout folio.
//!
//! ## Error Types
//!
//! - **Database**: Wrapped sqlx errors (connection issues, query failures, etc.)
//! - **UnsupportedValue**: A filter value outside the supported scalar set
//! - **UnknownOperator**: An operator string outside the fixed operator set
//! - **InvalidFilter**: A malformed filter specification
//!
//! Execution failures are always propagated to the caller; a failing count
//! or data statement never degrades to an empty page.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use folio::{Config, Error};
//!
//! match config.paginate::<_, Row>(&db, &select).await {
//!     Ok(page) => println!("{} rows", page.paginate.total),
//!     Err(Error::Database(e)) => eprintln!("query failed: {}", e),
//!     Err(e) => eprintln!("bad configuration: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for folio operations.
///
/// # Variants
///
/// * `Database` - Wrapped sqlx database errors
/// * `UnsupportedValue` - Filter value outside the supported scalar set
/// * `UnknownOperator` - Operator string outside the fixed operator set
/// * `InvalidFilter` - Malformed filter specification
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error.
    ///
    /// Wraps errors from the underlying sqlx library. Automatically
    /// converted from `sqlx::Error` via the `#[from]` attribute, so the `?`
    /// operator propagates execution failures seamlessly.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A filter value that is not a supported scalar.
    ///
    /// JSON arrays and objects are not valid filter values; they are
    /// rejected when the filter is constructed rather than silently
    /// rendered as an empty SQL fragment.
    #[error("Unsupported filter value: {0}")]
    UnsupportedValue(String),

    /// An operator string outside the fixed operator set.
    ///
    /// See [`crate::filter::Op`] for the accepted spellings.
    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    /// A malformed filter specification.
    ///
    /// Examples: an empty field name, or a `raw` filter whose value is not
    /// a string.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

impl Error {
    /// Creates an `UnsupportedValue` error from a string slice.
    pub fn unsupported_value(msg: &str) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates an `UnknownOperator` error from a string slice.
    pub fn unknown_operator(msg: &str) -> Self {
        Error::UnknownOperator(msg.to_string())
    }

    /// Creates an `InvalidFilter` error from a string slice.
    pub fn invalid_filter(msg: &str) -> Self {
        Error::InvalidFilter(msg.to_string())
    }
}
