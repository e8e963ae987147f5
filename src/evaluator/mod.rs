use crate::circuit::{Circuit, NodeKind};
use ahash::AHashMap;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

pub mod components;
mod inputs;

pub use components::{Component, ComponentRegistry, builtin_component};
pub use inputs::Inputs;

/// Relaxation passes allowed before the evaluator gives up on a fixed point.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Tunable evaluator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Whether the relaxation reached a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Convergence {
    /// The last pass changed nothing. `passes` includes that confirming pass.
    Stable { passes: usize },
    /// The iteration ceiling was hit while values were still changing, e.g. an
    /// odd inverter ring. The values returned are whatever the last pass left.
    Unstable { passes: usize },
}

impl Convergence {
    pub fn passes(&self) -> usize {
        match self {
            Convergence::Stable { passes } | Convergence::Unstable { passes } => *passes,
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, Convergence::Stable { .. })
    }
}

/// The result of one evaluation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// A copy of the input snapshot with every node's `active` and every
    /// edge's highlight updated.
    pub circuit: Circuit,
    pub convergence: Convergence,
}

impl Evaluation {
    pub fn state(&self, id: &str) -> Option<bool> {
        self.circuit.state(id)
    }

    pub fn is_stable(&self) -> bool {
        self.convergence.is_stable()
    }

    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }
}

/// Computes steady-state outputs for a circuit snapshot.
///
/// The evaluator is a pure function of the snapshot it is given: the only
/// memory it has is the `active` flag already stored on each node, which it
/// reads as the previous output. It never fails; malformed wiring degrades to
/// each component's floating-input policy.
pub struct Evaluator {
    config: EvaluatorConfig,
    registry: ComponentRegistry,
}

pub struct EvaluatorBuilder {
    config: EvaluatorConfig,
    registry: ComponentRegistry,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self {
            config: EvaluatorConfig::default(),
            registry: ComponentRegistry::with_defaults(),
        }
    }

    /// Caps the number of relaxation passes. Values below one are raised to one.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self.config.max_iterations = self.config.max_iterations.max(1);
        self
    }

    /// Adds a component, or replaces the transfer function of a built-in kind.
    pub fn with_component(mut self, component: Box<dyn Component>) -> Self {
        self.registry.insert(component);
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            config: self.config,
            registry: self.registry,
        }
    }
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        EvaluatorBuilder::new().build()
    }
}

/// A computed node with its incoming wires resolved to `(handle, source id)`.
struct Step<'a> {
    id: &'a str,
    component: Option<&'a dyn Component>,
    wires: Vec<(Option<&'a str>, &'a str)>,
}

impl Evaluator {
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> EvaluatorConfig {
        self.config
    }

    /// Relaxes the circuit to a fixed point, or until the iteration ceiling.
    ///
    /// Nodes are visited in snapshot order and each one reads whatever its
    /// sources hold at that moment, including values written earlier in the
    /// same pass.
    pub fn evaluate(&self, circuit: &Circuit) -> Evaluation {
        debug!(
            "Evaluating circuit with {} nodes and {} edges",
            circuit.nodes.len(),
            circuit.edges.len()
        );

        let mut state: AHashMap<&str, bool> = AHashMap::with_capacity(circuit.nodes.len());
        for node in &circuit.nodes {
            let initial = node.kind == NodeKind::PowerSource || node.data.active;
            state.insert(node.id.as_str(), initial);
        }

        let mut incoming: AHashMap<&str, Vec<(Option<&str>, &str)>> = AHashMap::new();
        for edge in &circuit.edges {
            // Wires from nodes that do not exist contribute nothing.
            if !state.contains_key(edge.source.as_str()) {
                continue;
            }
            incoming
                .entry(edge.target.as_str())
                .or_default()
                .push((edge.target_handle.as_deref(), edge.source.as_str()));
        }

        let steps: Vec<Step<'_>> = circuit
            .nodes
            .iter()
            .filter(|node| !node.kind.is_driven())
            .map(|node| Step {
                id: node.id.as_str(),
                component: self.registry.get(&node.kind),
                wires: incoming.remove(node.id.as_str()).unwrap_or_default(),
            })
            .collect();

        let mut buffer: Vec<(Option<&str>, bool)> = Vec::new();
        let mut passes = 0;
        let mut changed = true;
        while changed && passes < self.config.max_iterations {
            changed = false;
            for step in &steps {
                buffer.clear();
                buffer.extend(
                    step.wires
                        .iter()
                        .map(|(handle, source)| (*handle, state.get(source).copied().unwrap_or(false))),
                );
                let previous = state.get(step.id).copied().unwrap_or(false);
                let next = match step.component {
                    Some(component) => component.output(&Inputs::new(&buffer), previous),
                    None => false,
                };
                if next != previous {
                    state.insert(step.id, next);
                    changed = true;
                }
            }
            passes += 1;
            trace!("Relaxation pass {} complete (changed: {})", passes, changed);
        }

        let convergence = if changed {
            warn!(
                "Circuit did not stabilize within {} passes; returning last computed values",
                passes
            );
            Convergence::Unstable { passes }
        } else {
            Convergence::Stable { passes }
        };
        debug!("Evaluation finished: {:?}", convergence);

        let mut result = circuit.clone();
        for node in &mut result.nodes {
            node.data.active = state.get(node.id.as_str()).copied().unwrap_or(false);
        }
        for edge in &mut result.edges {
            edge.active = state.get(edge.source.as_str()).copied().unwrap_or(false);
        }

        Evaluation {
            circuit: result,
            convergence,
        }
    }
}

/// Evaluates a circuit with the default configuration.
pub fn evaluate(circuit: &Circuit) -> Evaluation {
    Evaluator::default().evaluate(circuit)
}
