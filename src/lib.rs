//! # Relata
//!
//! One-to-many relation resolution for an ActiveRecord-style ORM built on SeaQuery.
//!
//! A [`RelationDef`] describes how a parent model and a foreign model correlate
//! (`foreign.foreign_key == parent.local_key`). A [`Relation`] binds it to one parent
//! record and:
//! - filters a foreign query scope lazily (one parent) or eagerly (a batch)
//! - builds the correlated `COUNT(*)` subquery used by `has()` filters
//! - loads and caches the parent's children on first access
//! - creates new children already linked to the parent
//!
//! Database access goes through the [`LifeExecutor`] trait; records take part through
//! [`ModelTrait`], [`ModelFactory`] and [`FromRow`].

pub mod config;
pub mod executor;
pub mod model;
pub mod query;
pub mod relation;

#[cfg(test)]
mod tests_cfg;

pub use config::RelationSettings;
pub use executor::{FromRow, LifeError, LifeExecutor, Row};
#[cfg(any(test, feature = "mock"))]
pub use executor::{LoggedStatement, MockExecutor};
pub use model::{FactoryOptions, ModelError, ModelFactory, ModelTrait};
pub use query::{QueryScope, SelectQuery, SqlDialect};
pub use relation::{
    load_for_batch, Collection, EagerLoad, FilterOutcome, KeySet, NoCorrelationKey, Operator,
    PivotDef, Relation, RelationDef, RelationError, RelationPredicate, RelationType,
};
