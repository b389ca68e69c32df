//! Eager loading of a relation for a batch of parents.
//!
//! Loads the children of every parent in one query (the "selectinload" strategy):
//!
//! 1. Collect the distinct `local_key` values of the batch
//! 2. Run one `SELECT * FROM <foreign> WHERE <foreign_key> IN (...)`
//! 3. Group the children by their `foreign_key`
//!
//! Each parent's [`Relation`] is then seeded from the groups instead of querying on
//! its own, which avoids N+1 queries.
//!
//! # Example
//!
//! ```no_run
//! use relata::relation::{eager, Relation, RelationDef};
//! # use relata::{FromRow, LifeExecutor, ModelFactory, ModelTrait, RelationError};
//! # fn demo<User, Post, Ex>(users: &[User], executor: &Ex) -> Result<(), RelationError>
//! # where User: ModelTrait, Post: ModelFactory + FromRow, Ex: LifeExecutor {
//!
//! let def = RelationDef::has_many::<User, Post>(None, Some("user_id"));
//! let loaded = eager::load_for_batch::<User, Post, _>(&def, users, executor)?;
//!
//! for user in users {
//!     let mut posts = Relation::<User, Post>::new(&def, user);
//!     loaded.seed(&mut posts);
//!     // no further query
//!     let _count = posts.get_data(executor)?.len();
//! }
//! # Ok(())
//! # }
//! ```

use crate::executor::{FromRow, LifeExecutor};
use crate::model::{FactoryOptions, ModelFactory, ModelTrait};
use crate::query::SelectQuery;
use crate::relation::collection::Collection;
use crate::relation::def::RelationDef;
use crate::relation::engine::{apply_filter, Relation};
use crate::relation::error::RelationError;
use crate::relation::keys::{non_null, resolve_batch};
use crate::relation::predicate::FilterOutcome;
use sea_query::Value;

/// Children loaded for a batch of parents, grouped by parent key
#[derive(Debug, Clone)]
pub struct EagerLoad<F> {
    local_key: String,
    foreign_key: String,
    groups: Vec<(Value, Collection<F>)>,
}

impl<F> EagerLoad<F>
where
    F: ModelTrait,
{
    /// Children belonging to `parent`
    ///
    /// Empty for a parent without a key or outside the loaded batch.
    pub fn for_parent<P>(&self, parent: &P) -> &[F]
    where
        P: ModelTrait,
    {
        let Some(key) = non_null(parent.get_field_value(&self.local_key)) else {
            return &[];
        };
        self.groups
            .iter()
            .find(|(group_key, _)| *group_key == key)
            .map(|(_, children)| children.as_slice())
            .unwrap_or_default()
    }

    /// Every loaded child, grouped by parent key in first-seen order
    pub fn children(&self) -> impl Iterator<Item = &F> {
        self.groups.iter().flat_map(|(_, children)| children.iter())
    }

    /// Distinct parent keys the load was run for
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.groups.iter().map(|(key, _)| key)
    }

    /// Total number of children loaded
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, children)| children.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn foreign_key(&self) -> &str {
        &self.foreign_key
    }

    /// Seed `relation`'s cache with its parent's children
    pub fn seed<P>(&self, relation: &mut Relation<'_, P, F>)
    where
        P: ModelTrait,
        F: ModelFactory,
    {
        let children = self.for_parent(relation.parent());
        relation.set_data_from_collection(children);
    }
}

/// Load the children of every parent in `batch` with a single query
///
/// A batch with no usable key (empty, or every key null) returns an empty load
/// without querying.
///
/// # Errors
///
/// Returns `RelationError::Executor` if the query fails.
pub fn load_for_batch<P, F, Ex>(
    def: &RelationDef,
    batch: &[P],
    executor: &Ex,
) -> Result<EagerLoad<F>, RelationError>
where
    P: ModelTrait,
    F: ModelFactory + FromRow,
    Ex: LifeExecutor + ?Sized,
{
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "relation.load_for_batch",
        kind = %def.rel_type,
        foreign = def.foreign_model,
        parents = batch.len(),
    )
    .entered();

    let keys = resolve_batch(batch, &def.local_key);
    let mut groups: Vec<(Value, Collection<F>)> = match &keys {
        Ok(keys) => keys
            .values()
            .iter()
            .map(|key| (key.clone(), Collection::new()))
            .collect(),
        Err(_) => Vec::new(),
    };

    let mut scope = SelectQuery::new(F::new_instance(&FactoryOptions::decoupled()));
    let children = match apply_filter(def, &mut scope, keys) {
        FilterOutcome::Applied(_) => scope.all(executor)?,
        FilterOutcome::EmptyResult => Vec::new(),
    };

    let mut orphans = 0usize;
    for child in children {
        let Some(key) = non_null(child.get_field_value(&def.foreign_key)) else {
            orphans += 1;
            continue;
        };
        // One group per distinct parent key, so this scan is bounded by the batch size
        match groups.iter_mut().find(|(group_key, _)| *group_key == key) {
            Some((_, collection)) => {
                collection.add(child);
            }
            None => orphans += 1,
        }
    }
    if orphans > 0 {
        log::warn!(
            "{orphans} {} record(s) did not match any parent on {}",
            def.foreign_model,
            def.foreign_key
        );
    }

    Ok(EagerLoad {
        local_key: def.local_key.clone(),
        foreign_key: def.foreign_key.clone(),
        groups,
    })
}
