//! Select query builder for foreign records.
//!
//! This module provides `SelectQuery`, a thin typed wrapper over a SeaQuery
//! `SelectStatement` that knows which model it selects. Relations narrow it through
//! [`QueryScope`]; execution goes through a [`LifeExecutor`].

use crate::executor::{FromRow, LifeError, LifeExecutor};
use crate::model::ModelTrait;
use crate::query::scope::QueryScope;
use crate::relation::predicate::RelationPredicate;
use sea_query::{Asterisk, IntoCondition, Query, SelectStatement, Values};

use super::SqlDialect;

/// Query builder for selecting records of model `M`
///
/// The model instance supplies the table name and the field-to-column mapping used
/// when relation predicates are applied.
///
/// # Example
///
/// ```no_run
/// use relata::query::SelectQuery;
/// use sea_query::{Expr, ExprTrait};
///
/// # fn demo<M, Ex>(post: M, executor: &Ex) -> Result<(), relata::LifeError>
/// # where M: relata::ModelTrait + relata::FromRow, Ex: relata::LifeExecutor {
/// let posts = SelectQuery::new(post)
///     .filter(Expr::col("published").eq(true))
///     .all(executor)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SelectQuery<M> {
    pub(crate) query: SelectStatement,
    model: M,
}

impl<M> SelectQuery<M>
where
    M: ModelTrait,
{
    /// Create a `SELECT * FROM <table>` query for the model
    pub fn new(model: M) -> Self {
        let mut query = Query::select();
        query.column(Asterisk).from(model.table_name());
        Self { query, model }
    }

    /// Add a filter condition
    ///
    /// Accepts any type that implements `IntoCondition`, including expressions
    /// from `Expr::col()` and `Condition::all()` / `Condition::any()` groups.
    pub fn filter<F>(mut self, condition: F) -> Self
    where
        F: IntoCondition,
    {
        self.query.cond_where(condition);
        self
    }

    /// The model instance this query selects
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The underlying SeaQuery statement
    pub fn statement(&self) -> &SelectStatement {
        &self.query
    }

    /// Build SQL with placeholders and the values to bind for `dialect`
    pub fn build(&self, dialect: SqlDialect) -> (String, Values) {
        dialect.build(&self.query)
    }

    /// Execute the query and map every row into the model
    ///
    /// # Errors
    ///
    /// Returns `LifeError` if execution fails or a row cannot be converted.
    pub fn all<Ex>(&self, executor: &Ex) -> Result<Vec<M>, LifeError>
    where
        Ex: LifeExecutor + ?Sized,
        M: FromRow,
    {
        let (sql, values) = self.build(executor.dialect());
        log::debug!("executing select on {}: {}", self.model.table_name(), sql);
        let rows = executor.query_all(&sql, &values)?;
        rows.iter().map(M::from_row).collect()
    }
}

impl<M> QueryScope for SelectQuery<M>
where
    M: ModelTrait,
{
    fn where_predicate(&mut self, predicate: &RelationPredicate) {
        self.query.cond_where(predicate.to_condition(&self.model));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{MockExecutor, Row};
    use crate::model::ModelError;
    use sea_query::{Expr, ExprTrait, Value};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Comment {
        id: i32,
        post_id: Option<i32>,
    }

    impl ModelTrait for Comment {
        fn id_field_name() -> &'static str {
            "id"
        }

        fn table_name(&self) -> &'static str {
            "comments"
        }

        fn field_alias(&self, field: &str) -> String {
            match field {
                "post_id" => "content_id".to_string(),
                other => other.to_string(),
            }
        }

        fn get_field_value(&self, field: &str) -> Option<Value> {
            match field {
                "id" => Some(self.id.into()),
                "post_id" => self.post_id.map(Value::from),
                _ => None,
            }
        }

        fn set_field_value(&mut self, field: &str, _value: Value) -> Result<(), ModelError> {
            Err(ModelError::FieldNotFound(field.to_string()))
        }
    }

    impl FromRow for Comment {
        fn from_row(row: &Row) -> Result<Self, LifeError> {
            let id = match row.try_get("id")? {
                Value::Int(Some(id)) => *id,
                other => return Err(LifeError::ParseError(format!("bad id: {:?}", other))),
            };
            let post_id = match row.get("content_id") {
                Some(Value::Int(v)) => *v,
                _ => None,
            };
            Ok(Self { id, post_id })
        }
    }

    #[test]
    fn test_new_selects_all_from_model_table() {
        let sql = SqlDialect::Postgres.render(SelectQuery::new(Comment::default()).statement());
        assert_eq!(sql, r#"SELECT * FROM "comments""#);
    }

    #[test]
    fn test_filter_appends_condition() {
        let query = SelectQuery::new(Comment::default()).filter(Expr::col("id").gt(10));
        let sql = SqlDialect::Postgres.render(query.statement());
        assert!(sql.contains(r#""id" > 10"#), "{sql}");
    }

    #[test]
    fn test_where_predicate_maps_field_alias() {
        let mut query = SelectQuery::new(Comment::default());
        query.where_predicate(&RelationPredicate::Equals {
            field: "post_id".to_string(),
            value: Value::Int(Some(4)),
        });
        let sql = SqlDialect::Postgres.render(query.statement());
        assert!(sql.contains(r#""content_id" = 4"#), "{sql}");
        assert!(!sql.contains("post_id"), "{sql}");
    }

    #[test]
    fn test_all_maps_rows_and_logs_statement() {
        let mock = MockExecutor::new().append_query_results(vec![vec![
            Row::new().with("id", 1).with("content_id", 4),
            Row::new().with("id", 2).with("content_id", 4),
        ]]);

        let comments = SelectQuery::new(Comment::default()).all(&mock).unwrap();

        assert_eq!(
            comments,
            vec![
                Comment { id: 1, post_id: Some(4) },
                Comment { id: 2, post_id: Some(4) },
            ]
        );
        assert_eq!(mock.query_count(), 1);
        assert!(mock.statements()[0].sql.starts_with("SELECT * FROM"));
    }

    #[test]
    fn test_all_propagates_row_conversion_error() {
        let mock = MockExecutor::new()
            .append_query_results(vec![vec![Row::new().with("id", "not-a-number")]]);

        let err = SelectQuery::new(Comment::default()).all(&mock).unwrap_err();
        assert!(matches!(err, LifeError::ParseError(_)));
    }
}
