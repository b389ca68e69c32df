//! Mock executor for exercising relations without a database.
//!
//! Result sets are queued up front with [`MockExecutor::append_query_results`] and
//! handed out in order, one per `query_all` call. Every executed statement is kept
//! in a log so tests can assert on the SQL that was (or was not) issued.

use super::{LifeError, LifeExecutor, Row};
use crate::query::SqlDialect;
use sea_query::{Value, Values};
use std::cell::RefCell;
use std::collections::VecDeque;

/// A statement recorded by [`MockExecutor`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedStatement {
    pub sql: String,
    pub values: Vec<Value>,
}

/// In-memory [`LifeExecutor`] returning canned result sets
#[derive(Debug, Default)]
pub struct MockExecutor {
    dialect: SqlDialect,
    results: RefCell<VecDeque<Result<Vec<Row>, LifeError>>>,
    log: RefCell<Vec<LoggedStatement>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(dialect: SqlDialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Queue result sets, consumed one per query in FIFO order
    pub fn append_query_results<I>(self, results: I) -> Self
    where
        I: IntoIterator<Item = Vec<Row>>,
    {
        self.results
            .borrow_mut()
            .extend(results.into_iter().map(Ok));
        self
    }

    /// Queue an error to be returned by the next query
    pub fn append_query_error(self, error: LifeError) -> Self {
        self.results.borrow_mut().push_back(Err(error));
        self
    }

    /// Statements executed so far
    pub fn statements(&self) -> Vec<LoggedStatement> {
        self.log.borrow().clone()
    }

    pub fn query_count(&self) -> usize {
        self.log.borrow().len()
    }
}

impl LifeExecutor for MockExecutor {
    fn query_all(&self, query: &str, values: &Values) -> Result<Vec<Row>, LifeError> {
        log::trace!("mock executor received: {query}");
        self.log.borrow_mut().push(LoggedStatement {
            sql: query.to_owned(),
            values: values.0.clone(),
        });
        // An exhausted queue behaves like an empty table.
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn dialect(&self) -> SqlDialect {
        self.dialect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_are_returned_in_order() {
        let mock = MockExecutor::new().append_query_results(vec![
            vec![Row::new().with("id", 1)],
            vec![Row::new().with("id", 2), Row::new().with("id", 3)],
        ]);

        let first = mock.query_all("SELECT 1", &Values(vec![])).unwrap();
        let second = mock.query_all("SELECT 2", &Values(vec![])).unwrap();
        let third = mock.query_all("SELECT 3", &Values(vec![])).unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert!(third.is_empty());
        assert_eq!(mock.query_count(), 3);
    }

    #[test]
    fn test_statement_log_keeps_bound_values() {
        let mock = MockExecutor::new();
        mock.query_all(
            r#"SELECT * FROM "posts" WHERE "user_id" = $1"#,
            &Values(vec![Value::Int(Some(7))]),
        )
        .unwrap();

        let log = mock.statements();
        assert_eq!(log.len(), 1);
        assert!(log[0].sql.contains("\"user_id\" = $1"));
        assert_eq!(log[0].values, vec![Value::Int(Some(7))]);
    }

    #[test]
    fn test_queued_error_is_returned() {
        let mock = MockExecutor::new()
            .append_query_error(LifeError::QueryError("relation does not exist".into()));

        let err = mock.query_all("SELECT 1", &Values(vec![])).unwrap_err();
        assert_eq!(err, LifeError::QueryError("relation does not exist".into()));
    }

    #[test]
    fn test_with_dialect() {
        assert_eq!(MockExecutor::new().dialect(), SqlDialect::Postgres);
        assert_eq!(
            MockExecutor::with_dialect(SqlDialect::Sqlite).dialect(),
            SqlDialect::Sqlite
        );
    }
}
