//! SQL dialect selection for rendering SeaQuery statements.

use sea_query::{
    MysqlQueryBuilder, PostgresQueryBuilder, SelectStatement, SqliteQueryBuilder, Values,
};
use serde::Deserialize;
use std::fmt;

/// Backend whose quoting and placeholder rules are used when rendering statements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    Postgres,
    Mysql,
    Sqlite,
}

impl SqlDialect {
    /// Build a statement into SQL with placeholders plus the values to bind
    pub fn build(self, statement: &SelectStatement) -> (String, Values) {
        match self {
            SqlDialect::Postgres => statement.build(PostgresQueryBuilder),
            SqlDialect::Mysql => statement.build(MysqlQueryBuilder),
            SqlDialect::Sqlite => statement.build(SqliteQueryBuilder),
        }
    }

    /// Render a statement with values inlined, for logging and embedding as a subquery
    pub fn render(self, statement: &SelectStatement) -> String {
        match self {
            SqlDialect::Postgres => statement.to_string(PostgresQueryBuilder),
            SqlDialect::Mysql => statement.to_string(MysqlQueryBuilder),
            SqlDialect::Sqlite => statement.to_string(SqliteQueryBuilder),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SqlDialect::Postgres => "postgres",
            SqlDialect::Mysql => "mysql",
            SqlDialect::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
