//! # logicsim - Digital Logic Circuit Evaluation Engine
//!
//! **logicsim** computes the steady state of digital-logic circuits built from
//! switches, gates, relays, latches and lights. Circuits are plain node/edge
//! snapshots, the same shape a graphical editor keeps, and may contain
//! feedback loops and stateful parts.
//!
//! ## Core Workflow
//!
//! 1.  **Load a snapshot**: parse the editor's JSON with `Circuit::from_json`, or
//!     implement `IntoCircuit` for your own format.
//! 2.  **Drive the sources**: set switch, push-button and clock values with
//!     `Circuit::set_input` / `Circuit::toggle`.
//! 3.  **Evaluate**: `Evaluator::evaluate` relaxes the circuit to a fixed point
//!     and returns an updated snapshot plus whether it converged.
//! 4.  **Feed the result back**: the returned snapshot carries every node's
//!     output, which latches and feedback loops read as their previous state on
//!     the next call.
//!
//! ## Quick Start
//!
//! ```rust
//! use logicsim::prelude::*;
//!
//! // A D-latch wired to two switches.
//! let mut circuit = Circuit::new(
//!     vec![
//!         Node::new("enable", NodeKind::Switch),
//!         Node::new("data", NodeKind::Switch),
//!         Node::new("q", NodeKind::DLatch),
//!         Node::new("light", NodeKind::Light),
//!     ],
//!     vec![
//!         Edge::new("e1", "enable", "q").into_port(Port::Enable),
//!         Edge::new("e2", "data", "q").into_port(Port::Data),
//!         Edge::new("e3", "q", "light"),
//!     ],
//! );
//!
//! let evaluator = Evaluator::default();
//!
//! // Transparent: the latch follows data.
//! circuit.set_input("enable", true)?;
//! circuit.set_input("data", true)?;
//! circuit = evaluator.evaluate(&circuit).into_circuit();
//! assert_eq!(circuit.state("light"), Some(true));
//!
//! // Hold: data changes are ignored while enable is low.
//! circuit.set_input("enable", false)?;
//! circuit.set_input("data", false)?;
//! circuit = evaluator.evaluate(&circuit).into_circuit();
//! assert_eq!(circuit.state("light"), Some(true));
//! # Ok::<(), logicsim::error::CircuitError>(())
//! ```

pub mod challenge;
pub mod circuit;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod prelude;
pub mod simulator;
pub mod storage;
pub mod table;

#[cfg(feature = "python-bindings")]
mod python;
