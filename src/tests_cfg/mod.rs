//! Test entities shared by the unit tests: users have many posts.

use crate::executor::{FromRow, LifeError, Row};
use crate::model::{FactoryOptions, ModelError, ModelFactory, ModelTrait};
use crate::query::QueryScope;
use crate::relation::RelationPredicate;
use sea_query::Value;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct User {
    pub id: Option<i32>,
    pub name: String,
}

impl User {
    pub fn with_id(id: i32) -> Self {
        Self {
            id: Some(id),
            name: format!("user-{id}"),
        }
    }

    pub fn without_id() -> Self {
        Self::default()
    }
}

impl ModelTrait for User {
    fn id_field_name() -> &'static str {
        "id"
    }

    fn table_name(&self) -> &'static str {
        "users"
    }

    fn get_field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => self.id.map(Value::from),
            "name" => Some(self.name.clone().into()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: Value) -> Result<(), ModelError> {
        match (field, value) {
            ("id", Value::Int(v)) => self.id = v,
            ("name", Value::String(Some(v))) => self.name = v,
            (field, other) => return Err(mismatch(field, "Int or String", &other)),
        }
        Ok(())
    }
}

impl ModelFactory for User {
    fn new_instance(_options: &FactoryOptions) -> Self {
        Self::default()
    }
}

impl FromRow for User {
    fn from_row(row: &Row) -> Result<Self, LifeError> {
        Ok(Self {
            id: int_column(row, "id")?,
            name: match row.get("name") {
                Some(Value::String(Some(name))) => name.clone(),
                _ => String::new(),
            },
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Post {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub title: String,
    pub ignore_request: bool,
}

impl Post {
    pub fn for_user(id: i32, user_id: i32) -> Self {
        Self {
            id: Some(id),
            user_id: Some(user_id),
            title: format!("post-{id}"),
            ignore_request: false,
        }
    }
}

impl ModelTrait for Post {
    fn id_field_name() -> &'static str {
        "id"
    }

    fn table_name(&self) -> &'static str {
        "posts"
    }

    fn get_field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => self.id.map(Value::from),
            "user_id" => Some(Value::Int(self.user_id)),
            "title" => Some(self.title.clone().into()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: Value) -> Result<(), ModelError> {
        match (field, value) {
            ("id", Value::Int(v)) => self.id = v,
            ("user_id", Value::Int(v)) => self.user_id = v,
            ("title", Value::String(Some(v))) => self.title = v,
            ("id" | "user_id" | "title", other) => return Err(mismatch(field, "Int", &other)),
            _ => return Err(ModelError::FieldNotFound(field.to_string())),
        }
        Ok(())
    }
}

impl ModelFactory for Post {
    fn new_instance(options: &FactoryOptions) -> Self {
        Self {
            ignore_request: options.ignore_request,
            ..Self::default()
        }
    }
}

impl FromRow for Post {
    fn from_row(row: &Row) -> Result<Self, LifeError> {
        Ok(Self {
            id: int_column(row, "id")?,
            user_id: int_column(row, "user_id")?,
            title: match row.get("title") {
                Some(Value::String(Some(title))) => title.clone(),
                _ => String::new(),
            },
            ignore_request: false,
        })
    }
}

/// A `posts` row as the executor would return it
pub fn post_row(id: i32, user_id: Option<i32>) -> Row {
    Row::new()
        .with("id", id)
        .with("user_id", Value::Int(user_id))
        .with("title", format!("post-{id}"))
}

/// Scope double recording every predicate it receives
#[derive(Debug, Default)]
pub struct RecordingScope {
    pub predicates: Vec<RelationPredicate>,
}

impl QueryScope for RecordingScope {
    fn where_predicate(&mut self, predicate: &RelationPredicate) {
        self.predicates.push(predicate.clone());
    }
}

fn int_column(row: &Row, column: &str) -> Result<Option<i32>, LifeError> {
    match row.get(column) {
        None | Some(Value::Int(None)) => Ok(None),
        Some(Value::Int(Some(v))) => Ok(Some(*v)),
        Some(other) => Err(LifeError::ParseError(format!(
            "column {column}: expected Int, got {other:?}"
        ))),
    }
}

fn mismatch(field: &str, expected: &str, actual: &Value) -> ModelError {
    ModelError::InvalidValueType {
        field: field.to_string(),
        expected: expected.to_string(),
        actual: format!("{actual:?}"),
    }
}
