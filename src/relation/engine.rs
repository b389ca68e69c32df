//! The relation engine.
//!
//! A [`Relation`] binds a [`RelationDef`] to one parent record and owns the parent's
//! cached child collection. It decides between lazy (single parent) and eager
//! (batch) filtering, builds the correlated count subquery, and creates new children
//! already linked to the parent.
//!
//! # Example
//!
//! ```no_run
//! use relata::relation::{Relation, RelationDef};
//! # use relata::{FromRow, LifeExecutor, ModelFactory, ModelTrait, RelationError};
//! # fn demo<User, Post, Ex>(user: &User, executor: &Ex) -> Result<(), RelationError>
//! # where User: ModelTrait, Post: ModelFactory + FromRow, Ex: LifeExecutor {
//!
//! let def = RelationDef::has_many::<User, Post>(None, Some("user_id"));
//! let mut posts = Relation::<User, Post>::new(&def, user);
//!
//! // First access runs `SELECT * FROM posts WHERE user_id = <user.id>`
//! let loaded = posts.get_data(executor)?.len();
//!
//! // A new post, already carrying `user_id`, appended to the loaded set
//! let draft = posts.get_new(executor)?;
//! # Ok(())
//! # }
//! ```

use crate::executor::{FromRow, LifeExecutor};
use crate::model::{FactoryOptions, ModelFactory, ModelTrait};
use crate::query::{QueryScope, SelectQuery};
use crate::relation::collection::Collection;
use crate::relation::def::RelationDef;
use crate::relation::error::RelationError;
use crate::relation::keys::{non_null, resolve_batch, resolve_single, KeySet, NoCorrelationKey};
use crate::relation::predicate::{FilterOutcome, RelationPredicate};
use sea_query::{Asterisk, DynIden, Expr, ExprTrait, Func, Query, SelectStatement};

/// A relation resolved for one parent record
///
/// State: unloaded until [`get_data`](Self::get_data), [`get_new`](Self::get_new) or
/// [`set_data_from_collection`](Self::set_data_from_collection) fills the cache;
/// [`reset`](Self::reset) drops it again.
#[derive(Debug)]
pub struct Relation<'a, P, F> {
    def: &'a RelationDef,
    parent: &'a P,
    data: Option<Collection<F>>,
}

impl<'a, P, F> Relation<'a, P, F>
where
    P: ModelTrait,
    F: ModelFactory,
{
    pub fn new(def: &'a RelationDef, parent: &'a P) -> Self {
        Self {
            def,
            parent,
            data: None,
        }
    }

    pub fn def(&self) -> &'a RelationDef {
        self.def
    }

    pub fn parent(&self) -> &'a P {
        self.parent
    }

    /// Apply the relation filter to a foreign query scope
    ///
    /// With `batch`, filters on the deduplicated keys of every parent in it (eager
    /// mode). Without, filters on this relation's own parent (lazy mode).
    ///
    /// Returns [`FilterOutcome::EmptyResult`] and leaves `scope` untouched when no key
    /// could be correlated; the caller must then skip the query.
    pub fn filter_foreign_model<S>(&self, scope: &mut S, batch: Option<&[P]>) -> FilterOutcome
    where
        S: QueryScope + ?Sized,
    {
        let keys = match batch {
            Some(batch) => resolve_batch(batch, &self.def.local_key),
            None => resolve_single(self.parent, &self.def.local_key),
        };
        apply_filter(self.def, scope, keys)
    }

    /// Build the correlated count subquery used by `has()` / `where_has()` filters
    ///
    /// ```sql
    /// SELECT COUNT(*) FROM <foreign> AS <alias>
    /// WHERE <alias>.<foreign_key> = <parent>.<local_key>
    /// ```
    ///
    /// The statement is not executed.
    pub fn count_subquery(&self) -> SelectStatement {
        let foreign = F::new_instance(&FactoryOptions::decoupled());

        let alias = DynIden::from(self.def.subquery_alias.clone());
        let foreign_column = DynIden::from(foreign.field_alias(&self.def.foreign_key));
        let parent_column = DynIden::from(self.parent.field_alias(&self.def.local_key));

        Query::select()
            .expr(Func::count(Expr::col(Asterisk)))
            .from_as(foreign.table_name(), alias.clone())
            .and_where(
                Expr::col((alias, foreign_column))
                    .equals((self.parent.table_name(), parent_column)),
            )
            .to_owned()
    }

    /// Load the related records, or return the cached ones
    ///
    /// A parent without a key loads as an empty collection without querying.
    ///
    /// # Errors
    ///
    /// Returns `RelationError::Executor` if the query fails; the relation stays unloaded.
    pub fn get_data<Ex>(&mut self, executor: &Ex) -> Result<&Collection<F>, RelationError>
    where
        Ex: LifeExecutor + ?Sized,
        F: FromRow,
    {
        self.ensure_loaded(executor).map(|data| &*data)
    }

    /// Create a new related record linked to the parent and append it to the collection
    ///
    /// The new record gets `foreign_key = parent.local_key` (left unset when the parent
    /// key is null). An unloaded relation is loaded first, so the returned record is
    /// always the last element of the full collection.
    ///
    /// # Errors
    ///
    /// - `RelationKindUnsupported` for kinds that cannot create a related record
    /// - `Model` if the foreign model rejects the key value
    /// - `Executor` if loading the existing records fails
    pub fn get_new<Ex>(&mut self, executor: &Ex) -> Result<&mut F, RelationError>
    where
        Ex: LifeExecutor + ?Sized,
        F: FromRow,
    {
        if !self.def.rel_type.supports_new() {
            return Err(RelationError::RelationKindUnsupported(self.def.rel_type));
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "relation.get_new",
            kind = %self.def.rel_type,
            foreign = self.def.foreign_model,
            foreign_key = %self.def.foreign_key,
        )
        .entered();

        let mut foreign = F::new_instance(&FactoryOptions::decoupled());
        match non_null(self.parent.get_field_value(&self.def.local_key)) {
            Some(key) => foreign.set_field_value(&self.def.foreign_key, key)?,
            None => log::debug!(
                "parent {} is null; new {} is not linked",
                self.def.local_key,
                self.def.foreign_model
            ),
        }

        let data = self.ensure_loaded(executor)?;
        Ok(data.add(foreign))
    }

    /// Seed the cache from children loaded for a whole batch of parents
    ///
    /// Keeps the children whose `foreign_key` equals this parent's `local_key`. A
    /// parent without a key gets an empty collection.
    pub fn set_data_from_collection<'c, I>(&mut self, children: I)
    where
        I: IntoIterator<Item = &'c F>,
        F: 'c,
    {
        let collection = match non_null(self.parent.get_field_value(&self.def.local_key)) {
            Some(key) => children
                .into_iter()
                .filter(|child| {
                    non_null(child.get_field_value(&self.def.foreign_key)).as_ref() == Some(&key)
                })
                .cloned()
                .collect(),
            None => Collection::new(),
        };

        log::debug!(
            "seeded {} {} record(s) from eager load",
            collection.len(),
            self.def.foreign_model
        );
        self.data = Some(collection);
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// The cached collection, if loaded
    pub fn data(&self) -> Option<&Collection<F>> {
        self.data.as_ref()
    }

    /// Take the cached collection, leaving the relation unloaded
    pub fn take_data(&mut self) -> Option<Collection<F>> {
        self.data.take()
    }

    /// Drop the cached collection
    pub fn reset(&mut self) {
        self.data = None;
    }

    fn ensure_loaded<Ex>(&mut self, executor: &Ex) -> Result<&mut Collection<F>, RelationError>
    where
        Ex: LifeExecutor + ?Sized,
        F: FromRow,
    {
        if self.data.is_none() {
            let loaded = self.fetch(executor)?;
            self.data = Some(loaded);
        }
        Ok(self.data.get_or_insert_with(Collection::new))
    }

    fn fetch<Ex>(&self, executor: &Ex) -> Result<Collection<F>, RelationError>
    where
        Ex: LifeExecutor + ?Sized,
        F: FromRow,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "relation.get_data",
            kind = %self.def.rel_type,
            foreign = self.def.foreign_model,
            local_key = %self.def.local_key,
            foreign_key = %self.def.foreign_key,
        )
        .entered();

        let mut scope = SelectQuery::new(F::new_instance(&FactoryOptions::decoupled()));
        match self.filter_foreign_model(&mut scope, None) {
            FilterOutcome::Applied(_) => Ok(Collection::from(scope.all(executor)?)),
            FilterOutcome::EmptyResult => Ok(Collection::new()),
        }
    }
}

/// Apply the predicate for `keys` to `scope`, or report an empty result
pub(crate) fn apply_filter<S>(
    def: &RelationDef,
    scope: &mut S,
    keys: Result<KeySet, NoCorrelationKey>,
) -> FilterOutcome
where
    S: QueryScope + ?Sized,
{
    match keys {
        Ok(keys) => {
            let predicate = RelationPredicate::build(&def.foreign_key, keys);
            log::debug!(
                "{} relation to {}: filtering on {}",
                def.rel_type,
                def.foreign_model,
                predicate
            );
            scope.where_predicate(&predicate);
            FilterOutcome::Applied(predicate)
        }
        Err(missing) => {
            log::debug!(
                "{} relation to {}: {}; no rows",
                def.rel_type,
                def.foreign_model,
                missing
            );
            FilterOutcome::EmptyResult
        }
    }
}
