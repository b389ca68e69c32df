//! Relation predicates.
//!
//! Turns a resolved [`KeySet`] into the filter applied to a foreign query scope:
//! `foreign_key == value` for a single parent, `foreign_key IN (values)` for a batch.

use crate::model::ModelTrait;
use crate::relation::keys::KeySet;
use sea_query::{Condition, DynIden, Expr, ExprTrait, Value};
use std::fmt;

/// Comparison operator of a relation predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    In,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => f.write_str("=="),
            Operator::In => f.write_str("in"),
        }
    }
}

/// Filter correlating foreign records with their parent(s)
///
/// `field` is a field name on the foreign model; column aliasing happens when the
/// predicate is turned into a [`Condition`].
#[derive(Debug, Clone, PartialEq)]
pub enum RelationPredicate {
    Equals { field: String, value: Value },
    In { field: String, values: Vec<Value> },
}

impl RelationPredicate {
    /// Build the predicate for `foreign_key` from resolved parent keys
    pub fn build(foreign_key: &str, keys: KeySet) -> Self {
        let field = foreign_key.to_owned();
        match keys.into_single() {
            Ok(value) => RelationPredicate::Equals { field, value },
            Err(values) => RelationPredicate::In { field, values },
        }
    }

    pub fn field(&self) -> &str {
        match self {
            RelationPredicate::Equals { field, .. } | RelationPredicate::In { field, .. } => field,
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            RelationPredicate::Equals { .. } => Operator::Eq,
            RelationPredicate::In { .. } => Operator::In,
        }
    }

    pub fn values(&self) -> &[Value] {
        match self {
            RelationPredicate::Equals { value, .. } => std::slice::from_ref(value),
            RelationPredicate::In { values, .. } => values,
        }
    }

    /// Convert into a SeaQuery condition on `model`'s column for the field
    pub fn to_condition<M>(&self, model: &M) -> Condition
    where
        M: ModelTrait,
    {
        let column = DynIden::from(model.field_alias(self.field()));
        let expr = match self {
            RelationPredicate::Equals { value, .. } => Expr::col(column).eq(value.clone()),
            RelationPredicate::In { values, .. } => Expr::col(column).is_in(values.clone()),
        };
        Condition::all().add(expr)
    }
}

impl fmt::Display for RelationPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.field(), self.operator(), self.values())
    }
}

/// Result of filtering a foreign query scope
///
/// `EmptyResult` means no parent key could be correlated: the scope was left
/// untouched and the caller must not run the query.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Applied(RelationPredicate),
    EmptyResult,
}

impl FilterOutcome {
    /// Whether the caller should go on and execute the filtered query
    pub fn should_query(&self) -> bool {
        matches!(self, FilterOutcome::Applied(_))
    }

    pub fn predicate(&self) -> Option<&RelationPredicate> {
        match self {
            FilterOutcome::Applied(predicate) => Some(predicate),
            FilterOutcome::EmptyResult => None,
        }
    }
}
