//! RelationDef struct for storing relationship metadata
//!
//! A `RelationDef` is created once, when a record type declares a relation, and is
//! shared by every [`Relation`](crate::relation::Relation) resolved from it. It holds
//! the relation kind and the resolved key names; it never holds per-call state.

use crate::model::ModelTrait;
use std::fmt;

/// Alias given to the foreign table inside count subqueries
pub const DEFAULT_SUBQUERY_ALIAS: &str = "reltbl";

/// Type of relationship between records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// One-to-one relationship
    HasOne,
    /// One-to-many relationship
    HasMany,
    /// Many-to-one relationship (`belongs_to`)
    BelongsTo,
}

impl RelationType {
    /// Whether `get_new` can build an unambiguous related instance for this kind
    ///
    /// A `BelongsTo` parent points at an existing record; a fresh one would have no
    /// determinate link back.
    pub fn supports_new(self) -> bool {
        match self {
            RelationType::HasOne | RelationType::HasMany => true,
            RelationType::BelongsTo => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::HasOne => "has_one",
            RelationType::HasMany => "has_many",
            RelationType::BelongsTo => "belongs_to",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pivot-table settings of many-to-many relations
///
/// Accepted so every relation kind can be declared with the same arguments. The
/// kinds in this crate never read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PivotDef {
    pub table: Option<String>,
    pub local_key: Option<String>,
    pub foreign_key: Option<String>,
}

/// Defines a relationship between a parent record type and a foreign record type
///
/// # Example
///
/// ```
/// # use relata::model::{ModelError, ModelTrait};
/// # use sea_query::Value;
/// # #[derive(Clone, Debug)] struct User;
/// # impl ModelTrait for User {
/// #     fn id_field_name() -> &'static str { "id" }
/// #     fn table_name(&self) -> &'static str { "users" }
/// #     fn get_field_value(&self, _: &str) -> Option<Value> { None }
/// #     fn set_field_value(&mut self, f: &str, _: Value) -> Result<(), ModelError> { Err(ModelError::FieldNotFound(f.into())) }
/// # }
/// # #[derive(Clone, Debug)] struct Post;
/// # impl ModelTrait for Post {
/// #     fn id_field_name() -> &'static str { "id" }
/// #     fn table_name(&self) -> &'static str { "posts" }
/// #     fn get_field_value(&self, _: &str) -> Option<Value> { None }
/// #     fn set_field_value(&mut self, f: &str, _: Value) -> Result<(), ModelError> { Err(ModelError::FieldNotFound(f.into())) }
/// # }
/// use relata::relation::RelationDef;
///
/// // users.id -> posts.user_id
/// let posts = RelationDef::has_many::<User, Post>(None, Some("user_id"));
/// assert_eq!(posts.local_key, "id");
/// assert_eq!(posts.foreign_key, "user_id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDef {
    /// Type of relationship
    pub rel_type: RelationType,
    /// Type name of the foreign model, for diagnostics
    pub foreign_model: &'static str,
    /// Field on the parent record used for correlation
    pub local_key: String,
    /// Field on the foreign record that must match `local_key`
    pub foreign_key: String,
    /// Alias of the foreign table in count subqueries
    pub subquery_alias: String,
    /// Ignored pivot settings
    pub pivot: PivotDef,
}

impl RelationDef {
    /// Declare a relation of `rel_type` from `P` to `F`
    ///
    /// Missing or empty keys fall back to the kind's defaults:
    /// - `HasMany` / `HasOne`: `local_key` is `P`'s primary key, `foreign_key` is `local_key`
    /// - `BelongsTo`: `foreign_key` is `F`'s primary key, `local_key` is `foreign_key`
    pub fn new<P, F>(
        rel_type: RelationType,
        local_key: Option<&str>,
        foreign_key: Option<&str>,
    ) -> Self
    where
        P: ModelTrait,
        F: ModelTrait,
    {
        let local_key = local_key.filter(|key| !key.is_empty());
        let foreign_key = foreign_key.filter(|key| !key.is_empty());

        let (local_key, foreign_key) = match rel_type {
            RelationType::HasMany | RelationType::HasOne => {
                let local = local_key.unwrap_or(P::id_field_name()).to_owned();
                let foreign = foreign_key.map_or_else(|| local.clone(), str::to_owned);
                (local, foreign)
            }
            RelationType::BelongsTo => {
                let foreign = foreign_key.unwrap_or(F::id_field_name()).to_owned();
                let local = local_key.map_or_else(|| foreign.clone(), str::to_owned);
                (local, foreign)
            }
        };

        Self {
            rel_type,
            foreign_model: std::any::type_name::<F>(),
            local_key,
            foreign_key,
            subquery_alias: DEFAULT_SUBQUERY_ALIAS.to_owned(),
            pivot: PivotDef::default(),
        }
    }

    pub fn has_many<P, F>(local_key: Option<&str>, foreign_key: Option<&str>) -> Self
    where
        P: ModelTrait,
        F: ModelTrait,
    {
        Self::new::<P, F>(RelationType::HasMany, local_key, foreign_key)
    }

    pub fn has_one<P, F>(local_key: Option<&str>, foreign_key: Option<&str>) -> Self
    where
        P: ModelTrait,
        F: ModelTrait,
    {
        Self::new::<P, F>(RelationType::HasOne, local_key, foreign_key)
    }

    pub fn belongs_to<P, F>(local_key: Option<&str>, foreign_key: Option<&str>) -> Self
    where
        P: ModelTrait,
        F: ModelTrait,
    {
        Self::new::<P, F>(RelationType::BelongsTo, local_key, foreign_key)
    }

    /// Attach pivot settings (kept for declaration symmetry, never read)
    pub fn with_pivot(mut self, pivot: PivotDef) -> Self {
        self.pivot = pivot;
        self
    }

    /// Override the count-subquery alias; an empty alias keeps the current one
    pub fn with_subquery_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !alias.is_empty() {
            self.subquery_alias = alias;
        }
        self
    }
}
