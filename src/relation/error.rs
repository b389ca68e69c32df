//! Error types for relation operations.

use crate::executor::LifeError;
use crate::model::ModelError;
use crate::relation::def::RelationType;
use std::fmt;

/// Error type for relation operations
///
/// A missing parent key is not an error: it resolves to an empty collection.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationError {
    /// The relation kind cannot create a related instance unambiguously
    RelationKindUnsupported(RelationType),
    /// Query execution or row mapping failed
    Executor(LifeError),
    /// The foreign model rejected a field write
    Model(ModelError),
}

impl fmt::Display for RelationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationError::RelationKindUnsupported(kind) => {
                write!(f, "Creating a new related record is not supported for {kind} relations")
            }
            RelationError::Executor(e) => write!(f, "Relation query failed: {e}"),
            RelationError::Model(e) => write!(f, "Relation model error: {e}"),
        }
    }
}

impl std::error::Error for RelationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelationError::RelationKindUnsupported(_) => None,
            RelationError::Executor(e) => Some(e),
            RelationError::Model(e) => Some(e),
        }
    }
}

impl From<LifeError> for RelationError {
    fn from(err: LifeError) -> Self {
        RelationError::Executor(err)
    }
}

impl From<ModelError> for RelationError {
    fn from(err: ModelError) -> Self {
        RelationError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_and_source() {
        let err = RelationError::RelationKindUnsupported(RelationType::BelongsTo);
        assert!(err.to_string().contains("belongs_to"));
        assert!(err.source().is_none());

        let err: RelationError = LifeError::QueryError("boom".to_string()).into();
        assert!(err.to_string().contains("boom"));
        assert!(err.source().is_some());

        let err: RelationError = ModelError::FieldNotFound("user_id".to_string()).into();
        assert_eq!(err, RelationError::Model(ModelError::FieldNotFound("user_id".to_string())));
    }
}
