//! Query scope capability used by relations to narrow a foreign-record query.

use crate::relation::predicate::RelationPredicate;

/// A mutable query scope that relation predicates can be applied to
///
/// [`SelectQuery`](crate::query::SelectQuery) is the production implementation.
/// Anything that can express `field == value` and `field IN (values)` can implement
/// it, which keeps relation resolution independent of the query builder.
pub trait QueryScope {
    /// Narrow the scope with a relation predicate
    fn where_predicate(&mut self, predicate: &RelationPredicate);
}

impl<S: QueryScope + ?Sized> QueryScope for &mut S {
    fn where_predicate(&mut self, predicate: &RelationPredicate) {
        (**self).where_predicate(predicate);
    }
}
