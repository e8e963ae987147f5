//! A live simulation session.
//!
//! The [`Simulator`] owns the working snapshot the way an editor would: every
//! change to a source or to the topology is followed by one evaluation, and
//! the evaluated snapshot replaces the working one.

use crate::circuit::{Circuit, NodeKind};
use crate::error::CircuitError;
use crate::evaluator::{Convergence, Evaluator};
use log::debug;

pub struct Simulator {
    evaluator: Evaluator,
    circuit: Circuit,
    convergence: Convergence,
}

impl Simulator {
    /// Starts a session with the default evaluator and settles the circuit once.
    pub fn new(circuit: Circuit) -> Self {
        Self::with_evaluator(Evaluator::default(), circuit)
    }

    pub fn with_evaluator(evaluator: Evaluator, circuit: Circuit) -> Self {
        let evaluation = evaluator.evaluate(&circuit);
        Self {
            evaluator,
            circuit: evaluation.circuit,
            convergence: evaluation.convergence,
        }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    pub fn state(&self, id: &str) -> Option<bool> {
        self.circuit.state(id)
    }

    /// Outcome of the most recent evaluation.
    pub fn last_convergence(&self) -> Convergence {
        self.convergence
    }

    /// Flips a source node and re-evaluates. Returns the value the source now
    /// holds, which for a power source is always `true`.
    pub fn toggle(&mut self, id: &str) -> Result<bool, CircuitError> {
        let value = self.circuit.toggle(id)?;
        self.settle();
        Ok(value)
    }

    pub fn set_input(&mut self, id: &str, value: bool) -> Result<(), CircuitError> {
        self.circuit.set_input(id, value)?;
        self.settle();
        Ok(())
    }

    /// Holds a push-button down.
    pub fn press(&mut self, id: &str) -> Result<(), CircuitError> {
        self.drive_button(id, true)
    }

    /// Lets a push-button go.
    pub fn release(&mut self, id: &str) -> Result<(), CircuitError> {
        self.drive_button(id, false)
    }

    /// Inverts every clock node, then re-evaluates once.
    pub fn tick(&mut self) -> Convergence {
        for node in self
            .circuit
            .nodes
            .iter_mut()
            .filter(|n| n.kind == NodeKind::Clock)
        {
            node.data.active = !node.data.active;
        }
        self.settle();
        self.convergence
    }

    /// Swaps in a new topology (after the editor added or removed parts).
    pub fn replace(&mut self, circuit: Circuit) -> Convergence {
        self.circuit = circuit;
        self.settle();
        self.convergence
    }

    fn drive_button(&mut self, id: &str, value: bool) -> Result<(), CircuitError> {
        let node = self
            .circuit
            .node(id)
            .ok_or_else(|| CircuitError::NodeNotFound(id.to_string()))?;
        if node.kind != NodeKind::PushButton {
            return Err(CircuitError::NotASource {
                node_id: id.to_string(),
                kind: node.kind.clone(),
            });
        }
        self.set_input(id, value)
    }

    fn settle(&mut self) {
        let evaluation = self.evaluator.evaluate(&self.circuit);
        debug!("Simulator settled: {:?}", evaluation.convergence);
        self.circuit = evaluation.circuit;
        self.convergence = evaluation.convergence;
    }
}
