//! Correlation key resolution.
//!
//! Reads the parent side of a relation (`local_key`) from one record or from a batch
//! and normalizes it into a [`KeySet`]. A `KeySet` is never empty: when nothing can
//! be correlated, resolution fails with [`NoCorrelationKey`] instead.

use crate::model::ModelTrait;
use sea_query::Value;
use std::fmt;

/// No parent key could be read, so the relation has no rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoCorrelationKey {
    pub local_key: String,
}

impl fmt::Display for NoCorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no non-null value for correlation key `{}`", self.local_key)
    }
}

impl std::error::Error for NoCorrelationKey {}

#[derive(Debug, Clone, PartialEq)]
enum Keys {
    Single(Value),
    Batch(Vec<Value>),
}

/// Non-empty set of parent key values
///
/// Only the resolvers in this module construct it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeySet {
    keys: Keys,
}

impl KeySet {
    /// Key values, deduplicated for batches
    pub fn values(&self) -> &[Value] {
        match &self.keys {
            Keys::Single(value) => std::slice::from_ref(value),
            Keys::Batch(values) => values,
        }
    }

    /// Whether the keys came from a batch of parents
    pub fn is_batch(&self) -> bool {
        matches!(self.keys, Keys::Batch(_))
    }

    pub(crate) fn into_single(self) -> Result<Value, Vec<Value>> {
        match self.keys {
            Keys::Single(value) => Ok(value),
            Keys::Batch(values) => Err(values),
        }
    }
}

/// Read `local_key` from a single parent
///
/// # Errors
///
/// Returns `NoCorrelationKey` when the value is missing or SQL `NULL`.
pub fn resolve_single<P>(parent: &P, local_key: &str) -> Result<KeySet, NoCorrelationKey>
where
    P: ModelTrait,
{
    match non_null(parent.get_field_value(local_key)) {
        Some(value) => {
            log::trace!("resolved {local_key} = {value:?}");
            Ok(KeySet {
                keys: Keys::Single(value),
            })
        }
        None => Err(NoCorrelationKey {
            local_key: local_key.to_owned(),
        }),
    }
}

/// Read `local_key` from every parent in `batch`, skipping nulls and duplicates
///
/// Values keep first-seen order; callers must not depend on it.
///
/// # Errors
///
/// Returns `NoCorrelationKey` when the batch is empty or holds no non-null value.
pub fn resolve_batch<P>(batch: &[P], local_key: &str) -> Result<KeySet, NoCorrelationKey>
where
    P: ModelTrait,
{
    let mut values: Vec<Value> = Vec::new();

    for parent in batch {
        let Some(value) = non_null(parent.get_field_value(local_key)) else {
            continue;
        };
        // Linear scan: `Value` is not `Hash` without sea-query's `hashable-value`
        if !values.contains(&value) {
            values.push(value);
        }
    }

    log::trace!(
        "resolved {} distinct {local_key} value(s) from {} parent(s)",
        values.len(),
        batch.len()
    );

    if values.is_empty() {
        return Err(NoCorrelationKey {
            local_key: local_key.to_owned(),
        });
    }

    Ok(KeySet {
        keys: Keys::Batch(values),
    })
}

/// Whether a value is a typed SQL `NULL`, e.g. `Value::Int(None)` or `Value::Uuid(None)`
pub fn is_null_value(value: &Value) -> bool {
    !value.is_some()
}

pub(crate) fn non_null(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !is_null_value(v))
}
