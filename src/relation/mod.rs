//! Relation module for record relationships.
//!
//! Resolves one-to-many (and the related one-to-one / many-to-one) relations
//! between a parent record and the foreign records that reference it:
//! - has_many: one parent, many children carrying the parent key
//! - has_one: as has_many, at most one child expected
//! - belongs_to: the parent carries the key of one foreign record
//!
//! # Architecture
//!
//! - **Def**: the static relation description (`RelationDef`, `RelationType`)
//! - **Keys**: correlation key resolution for one parent or a batch (`KeySet`)
//! - **Predicate**: the filter applied to a foreign query (`RelationPredicate`, `FilterOutcome`)
//! - **Engine**: `Relation`, binding a definition to one parent and caching its children
//! - **Eager**: one-query loading for a batch of parents

pub mod def;
#[doc(inline)]
pub use def::{PivotDef, RelationDef, RelationType, DEFAULT_SUBQUERY_ALIAS};

pub mod keys;
#[doc(inline)]
pub use keys::{is_null_value, resolve_batch, resolve_single, KeySet, NoCorrelationKey};

pub mod predicate;
#[doc(inline)]
pub use predicate::{FilterOutcome, Operator, RelationPredicate};

pub mod collection;
#[doc(inline)]
pub use collection::Collection;

pub mod error;
#[doc(inline)]
pub use error::RelationError;

pub mod engine;
#[doc(inline)]
pub use engine::Relation;

pub mod eager;
#[doc(inline)]
pub use eager::{load_for_batch, EagerLoad};
