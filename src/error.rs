use crate::circuit::NodeKind;
use thiserror::Error;

/// Errors raised while loading, saving or editing a circuit snapshot.
///
/// Evaluation never produces one of these; they only come from the editing
/// and IO surfaces around the evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    #[error("Failed to parse circuit JSON: {0}")]
    JsonParse(String),

    #[error("Failed to encode or decode binary circuit: {0}")]
    Encoding(String),

    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Node id '{0}' appears more than once in the circuit")]
    DuplicateNodeId(String),

    #[error("Node '{0}' not found in the circuit")]
    NodeNotFound(String),

    #[error("Node '{node_id}' of kind '{kind}' is not an input source and cannot be driven")]
    NotASource { node_id: String, kind: NodeKind },

    #[error("Node '{0}' is part of the challenge scaffold and cannot be removed")]
    FixedNode(String),

    #[error("Edge '{edge_id}' references node '{node_id}', which does not exist")]
    DanglingEdge { edge_id: String, node_id: String },
}

/// Errors raised by the persistence layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to (de)serialize stored record: {0}")]
    Serialization(String),

    #[error("Invalid storage key '{0}': use only letters, digits, '_' and '-'")]
    InvalidKey(String),
}

/// Errors raised while enumerating a truth table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Circuit has no switch inputs to enumerate")]
    NoInputs,

    #[error("Circuit has no light outputs to observe")]
    NoOutputs,

    #[error("Circuit has {count} switch inputs, but at most {max} can be enumerated")]
    TooManyInputs { count: usize, max: usize },
}

/// Errors that can occur when converting a custom user format into a `Circuit`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid custom data: {0}")]
    Invalid(String),
}
