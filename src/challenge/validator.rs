use super::goal::{GoalCondition, GoalKind};
use crate::circuit::Circuit;
use crate::evaluator::Evaluator;
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const MSG_UNSUPPORTED: &str = "Tipo de validación no soportado";
pub const MSG_NO_OUTPUT: &str = "No se encontró ninguna salida conectada";
pub const MSG_DISCONNECTED: &str = "La salida no está conectada a ningún circuito";
pub const MSG_SUCCESS: &str = "¡Excelente! Tu circuito es correcto. La tabla de verdad coincide.";

/// Pass/fail report for a circuit checked against a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub success: bool,
    pub message: String,
    /// One line per failing truth-table row.
    #[serde(default)]
    pub details: Vec<String>,
}

impl ValidationResult {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            details: Vec::new(),
        }
    }
}

/// Scores finished circuits against truth tables using the shared evaluator.
#[derive(Default)]
pub struct Validator {
    evaluator: Evaluator,
}

impl Validator {
    pub fn new(evaluator: Evaluator) -> Self {
        Self { evaluator }
    }

    /// Checks the first light of `circuit` against every row of `goal`.
    ///
    /// Rows run in order on one working snapshot that starts from a power-on
    /// reset, so stateful parts carry their value from one row to the next.
    pub fn validate(&self, circuit: &Circuit, goal: &GoalCondition) -> ValidationResult {
        if goal.kind != GoalKind::TruthTable {
            return ValidationResult::failure(MSG_UNSUPPORTED);
        }

        let lights = circuit.lights();
        let Some(output) = lights.first() else {
            return ValidationResult::failure(MSG_NO_OUTPUT);
        };
        let output_wired = circuit
            .edges
            .iter()
            .any(|e| lights.iter().any(|light| light.id == e.target));
        if !output_wired {
            return ValidationResult::failure(MSG_DISCONNECTED);
        }

        let output_id = output.id.clone();
        let switch_ids: Vec<String> = circuit.switches().iter().map(|n| n.id.clone()).collect();

        let mut working = circuit.clone();
        working.reset_state();

        let mut failed_cases = Vec::new();
        for expected in &goal.expected_outputs {
            for (index, switch_id) in switch_ids.iter().enumerate() {
                let value = expected.input_states.get(index).copied().unwrap_or(false);
                if let Some(node) = working.node_mut(switch_id) {
                    node.data.active = value;
                }
            }

            let evaluation = self.evaluator.evaluate(&working);
            if !evaluation.is_stable() {
                warn!(
                    "Circuit did not stabilize for inputs {:?}; scoring last computed output",
                    expected.input_states
                );
            }
            let actual = evaluation.state(&output_id).unwrap_or(false);
            working = evaluation.into_circuit();

            if actual != expected.output_state {
                let line = format!(
                    "Entradas [{}]: esperado {}, obtenido {}",
                    expected.input_states.iter().map(|s| bit(*s)).join(", "),
                    bit(expected.output_state),
                    bit(actual)
                );
                debug!("Validation row failed: {}", line);
                failed_cases.push(line);
            }
        }

        if failed_cases.is_empty() {
            ValidationResult {
                success: true,
                message: MSG_SUCCESS.to_string(),
                details: Vec::new(),
            }
        } else {
            ValidationResult {
                success: false,
                message: format!(
                    "El circuito no pasó todas las pruebas ({}/{} fallaron)",
                    failed_cases.len(),
                    goal.expected_outputs.len()
                ),
                details: failed_cases,
            }
        }
    }
}

fn bit(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Validates with the default evaluator configuration.
pub fn validate(circuit: &Circuit, goal: &GoalCondition) -> ValidationResult {
    Validator::default().validate(circuit, goal)
}
