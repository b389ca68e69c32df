//! `LifeExecutor` Module
//!
//! Provides the `LifeExecutor` trait that abstracts synchronous statement execution.
//!
//! Relations never talk to a driver directly. They render a `SelectStatement` with
//! the executor's [`SqlDialect`], hand the SQL and bound values to `query_all`, and
//! map the returned [`Row`]s through [`FromRow`].

use crate::query::SqlDialect;
use sea_query::{Value, Values};
use std::fmt;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(any(test, feature = "mock"))]
pub use mock::{LoggedStatement, MockExecutor};

/// `LifeExecutor` error type
#[derive(Debug, Clone, PartialEq)]
pub enum LifeError {
    /// Query execution error reported by the underlying driver
    QueryError(String),
    /// Row parsing/conversion error
    ParseError(String),
    /// Other execution errors
    Other(String),
}

impl fmt::Display for LifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifeError::QueryError(s) => {
                write!(f, "Query error: {s}")
            }
            LifeError::ParseError(s) => {
                write!(f, "Parse error: {s}")
            }
            LifeError::Other(s) => {
                write!(f, "Execution error: {s}")
            }
        }
    }
}

impl std::error::Error for LifeError {}

/// A single result row: column name to value, in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insert, replacing an existing column of the same name
    pub fn with<V: Into<Value>>(mut self, column: &str, value: V) -> Self {
        self.insert(column, value.into());
        self
    }

    /// Insert or replace a column value
    pub fn insert(&mut self, column: &str, value: Value) {
        match self.columns.iter_mut().find(|(name, _)| name == column) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((column.to_owned(), value)),
        }
    }

    /// Get a column value by name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Get a column value by name, failing with `LifeError::ParseError` when absent
    pub fn try_get(&self, column: &str) -> Result<&Value, LifeError> {
        self.get(column)
            .ok_or_else(|| LifeError::ParseError(format!("column `{column}` not present in row")))
    }

    /// Iterate over `(column, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Conversion from a result [`Row`] into a model instance
pub trait FromRow: Sized {
    /// Build the model from a row
    ///
    /// # Errors
    ///
    /// Returns `LifeError::ParseError` if a required column is missing or has the wrong type.
    fn from_row(row: &Row) -> Result<Self, LifeError>;
}

/// Trait for executing database operations
///
/// This trait abstracts database execution, allowing different implementations
/// (direct client, pooled connection, test double, etc.) to be used interchangeably.
/// Calls are blocking; cancellation and timeouts are the implementation's concern.
///
/// # Examples
///
/// ```no_run
/// use relata::executor::{LifeExecutor, LifeError, Row};
/// use sea_query::Values;
///
/// struct Noop;
///
/// impl LifeExecutor for Noop {
///     fn query_all(&self, _query: &str, _values: &Values) -> Result<Vec<Row>, LifeError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait LifeExecutor {
    /// Execute a query and return all rows
    ///
    /// # Arguments
    ///
    /// * `query` - SQL query string with dialect-specific placeholders
    /// * `values` - Values to bind to the placeholders, in order
    ///
    /// # Errors
    ///
    /// Returns `LifeError` if the query execution fails.
    fn query_all(&self, query: &str, values: &Values) -> Result<Vec<Row>, LifeError>;

    /// SQL dialect used to render statements for this executor
    fn dialect(&self) -> SqlDialect {
        SqlDialect::Postgres
    }
}

impl<T: LifeExecutor + ?Sized> LifeExecutor for &T {
    fn query_all(&self, query: &str, values: &Values) -> Result<Vec<Row>, LifeError> {
        (**self).query_all(query, values)
    }

    fn dialect(&self) -> SqlDialect {
        (**self).dialect()
    }
}
