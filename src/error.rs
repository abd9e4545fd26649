use thiserror::Error;

use crate::graph::{NodeId, RelationType, Role};

/// Main error type for kgsynth
#[derive(Error, Debug)]
pub enum KgsynthError {
    /// No relation node connects the role-players with the requested roles
    #[error(
        "Relation not found: {relation_type} with roles {roles:?} between nodes {roleplayers:?}"
    )]
    RelationNotFound {
        relation_type: RelationType,
        roles: [Role; 2],
        roleplayers: [NodeId; 2],
    },

    /// Scenario index missing from the catalog
    #[error("Unknown scenario: {0}")]
    UnknownScenario(usize),

    /// Solution value has no row in the encodings table
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using KgsynthError
pub type Result<T> = std::result::Result<T, KgsynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KgsynthError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_relation_not_found_display() {
        let err = KgsynthError::RelationNotFound {
            relation_type: RelationType::Parentship,
            roles: [Role::Child, Role::Parent],
            roleplayers: [0, 1],
        };
        let msg = err.to_string();
        assert!(msg.contains("parentship"));
        assert!(msg.contains("[0, 1]"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KgsynthError = io_err.into();
        assert!(matches!(err, KgsynthError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: KgsynthError = json_err.into();
        assert!(matches!(err, KgsynthError::Serialization(_)));
    }
}
