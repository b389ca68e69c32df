//! Model traits for accessing and manipulating record data
//!
//! This module provides the capability traits a record type implements to take part
//! in relations:
//! - [`ModelTrait`]: field access by name, table identity and column aliasing
//! - [`ModelFactory`]: creation of fresh instances from explicit [`FactoryOptions`]

use sea_query::Value;
use std::fmt;

/// Error type for model field operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Field does not exist on the model
    FieldNotFound(String),
    /// Invalid value type for the field
    InvalidValueType {
        field: String,
        expected: String,
        actual: String,
    },
    /// Other error
    Other(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::FieldNotFound(field) => write!(f, "Field not found: {}", field),
            ModelError::InvalidValueType {
                field,
                expected,
                actual,
            } => write!(
                f,
                "Invalid value type for field {}: expected {}, got {}",
                field, expected, actual
            ),
            ModelError::Other(msg) => write!(f, "Model error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

/// Trait for record-level operations
///
/// Gives relations dynamic, name-based access to a record's fields without runtime
/// reflection. Implementations are usually generated; tests write them by hand.
///
/// # Example
///
/// ```
/// use relata::model::{ModelError, ModelTrait};
/// use sea_query::Value;
///
/// #[derive(Clone, Debug)]
/// struct User { id: Option<i32> }
///
/// impl ModelTrait for User {
///     fn id_field_name() -> &'static str { "id" }
///     fn table_name(&self) -> &'static str { "users" }
///     fn get_field_value(&self, field: &str) -> Option<Value> {
///         match field {
///             "id" => self.id.map(Value::from),
///             _ => None,
///         }
///     }
///     fn set_field_value(&mut self, field: &str, _value: Value) -> Result<(), ModelError> {
///         Err(ModelError::FieldNotFound(field.to_string()))
///     }
/// }
///
/// let user = User { id: Some(7) };
/// assert_eq!(user.get_field_value("id"), Some(Value::Int(Some(7))));
/// ```
pub trait ModelTrait: Clone + fmt::Debug {
    /// Name of the primary-key field
    fn id_field_name() -> &'static str;

    /// Table backing this record type
    fn table_name(&self) -> &'static str;

    /// Map a field name to its column name
    ///
    /// Defaults to the identity mapping.
    fn field_alias(&self, field: &str) -> String {
        field.to_owned()
    }

    /// Get the value of a field
    ///
    /// Returns `None` when the field is unknown or holds SQL `NULL`. Typed nulls such
    /// as `Value::Int(None)` are also treated as `NULL` by relations.
    fn get_field_value(&self, field: &str) -> Option<Value>;

    /// Set the value of a field
    ///
    /// # Errors
    ///
    /// Returns `ModelError` if the field is unknown or the value has the wrong type.
    fn set_field_value(&mut self, field: &str, value: Value) -> Result<(), ModelError>;
}

/// Options passed to every [`ModelFactory::new_instance`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactoryOptions {
    /// Do not pick up state from the inbound request (filters, submitted data)
    pub ignore_request: bool,
}

impl FactoryOptions {
    /// Options for an instance decoupled from ambient request state
    pub fn decoupled() -> Self {
        Self {
            ignore_request: true,
        }
    }
}

/// Creates fresh, empty instances of a record type
pub trait ModelFactory: ModelTrait {
    fn new_instance(options: &FactoryOptions) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default)]
    struct Article {
        id: Option<i64>,
        author_id: Option<i64>,
        ignore_request: bool,
    }

    impl ModelTrait for Article {
        fn id_field_name() -> &'static str {
            "id"
        }

        fn table_name(&self) -> &'static str {
            "articles"
        }

        fn field_alias(&self, field: &str) -> String {
            match field {
                "author_id" => "created_by".to_string(),
                other => other.to_string(),
            }
        }

        fn get_field_value(&self, field: &str) -> Option<Value> {
            match field {
                "id" => self.id.map(Value::from),
                "author_id" => self.author_id.map(Value::from),
                _ => None,
            }
        }

        fn set_field_value(&mut self, field: &str, value: Value) -> Result<(), ModelError> {
            let slot = match field {
                "id" => &mut self.id,
                "author_id" => &mut self.author_id,
                _ => return Err(ModelError::FieldNotFound(field.to_string())),
            };
            match value {
                Value::BigInt(v) => {
                    *slot = v;
                    Ok(())
                }
                other => Err(ModelError::InvalidValueType {
                    field: field.to_string(),
                    expected: "BigInt".to_string(),
                    actual: format!("{:?}", other),
                }),
            }
        }
    }

    impl ModelFactory for Article {
        fn new_instance(options: &FactoryOptions) -> Self {
            Self {
                ignore_request: options.ignore_request,
                ..Self::default()
            }
        }
    }

    #[test]
    fn test_decoupled_options_ignore_request() {
        assert!(FactoryOptions::decoupled().ignore_request);
        assert!(!FactoryOptions::default().ignore_request);

        let article = Article::new_instance(&FactoryOptions::decoupled());
        assert!(article.ignore_request);
        assert_eq!(article.id, None);
    }

    #[test]
    fn test_field_alias_defaults_and_overrides() {
        let article = Article::default();
        assert_eq!(article.field_alias("id"), "id");
        assert_eq!(article.field_alias("author_id"), "created_by");
    }

    #[test]
    fn test_set_field_value_errors() {
        let mut article = Article::default();
        assert_eq!(
            article.set_field_value("title", Value::BigInt(Some(1))),
            Err(ModelError::FieldNotFound("title".to_string()))
        );

        let err = article
            .set_field_value("author_id", Value::Bool(Some(true)))
            .unwrap_err();
        assert!(err.to_string().contains("expected BigInt"));

        article
            .set_field_value("author_id", Value::BigInt(Some(3)))
            .unwrap();
        assert_eq!(article.get_field_value("author_id"), Some(Value::BigInt(Some(3))));
    }
}
