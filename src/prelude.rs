//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build, evaluate and score circuits.
//!
//! # Example
//!
//! ```rust
//! use logicsim::prelude::*;
//!
//! let circuit = Circuit::new(
//!     vec![
//!         Node::new("a", NodeKind::Switch).with_active(true),
//!         Node::new("inv", NodeKind::Not),
//!         Node::new("out", NodeKind::Light),
//!     ],
//!     vec![Edge::new("e1", "a", "inv"), Edge::new("e2", "inv", "out")],
//! );
//!
//! let evaluation = Evaluator::default().evaluate(&circuit);
//! assert!(evaluation.is_stable());
//! assert_eq!(evaluation.state("out"), Some(false));
//! ```

// Circuit model
pub use crate::circuit::{Circuit, Edge, IntoCircuit, Node, NodeData, NodeKind, Port, Position};

// Evaluation
pub use crate::evaluator::{
    Component, Convergence, Evaluation, Evaluator, EvaluatorConfig, Inputs, evaluate,
};
pub use crate::simulator::Simulator;

// Challenges
pub use crate::challenge::{Challenge, GoalCondition, ValidationResult, Validator, validate};

// Tables
pub use crate::table::{TableFormatter, TruthTable};

// Error types
pub use crate::error::{CircuitError, StorageError, TableError};
