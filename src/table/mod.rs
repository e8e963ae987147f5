//! Exhaustive truth tables over a circuit's switches.

use crate::circuit::Circuit;
use crate::error::TableError;
use crate::evaluator::Evaluator;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

mod formatter;

pub use formatter::TableFormatter;

/// Most switches a table will enumerate (2^16 rows).
pub const MAX_TABLE_INPUTS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub inputs: Vec<bool>,
    pub outputs: Vec<bool>,
    /// False when this row hit the iteration ceiling.
    pub stable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthTable {
    /// Display names of the switches, in encounter order.
    pub inputs: Vec<String>,
    /// Display names of the lights, in encounter order.
    pub outputs: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TruthTable {
    /// Evaluates every switch combination, each from a power-on reset.
    ///
    /// Rows are ordered as binary counting with the first switch as the most
    /// significant bit.
    pub fn generate(evaluator: &Evaluator, circuit: &Circuit) -> Result<Self, TableError> {
        let switch_ids: Vec<&str> = circuit.switches().iter().map(|n| n.id.as_str()).collect();
        let light_ids: Vec<&str> = circuit.lights().iter().map(|n| n.id.as_str()).collect();

        if switch_ids.is_empty() {
            return Err(TableError::NoInputs);
        }
        if light_ids.is_empty() {
            return Err(TableError::NoOutputs);
        }
        if switch_ids.len() > MAX_TABLE_INPUTS {
            return Err(TableError::TooManyInputs {
                count: switch_ids.len(),
                max: MAX_TABLE_INPUTS,
            });
        }

        let mut base = circuit.clone();
        base.reset_state();

        let rows = switch_ids
            .iter()
            .map(|_| [false, true])
            .multi_cartesian_product()
            .map(|inputs| {
                let mut working = base.clone();
                for (id, value) in switch_ids.iter().zip(&inputs) {
                    if let Some(node) = working.node_mut(id) {
                        node.data.active = *value;
                    }
                }
                let evaluation = evaluator.evaluate(&working);
                let outputs = light_ids
                    .iter()
                    .map(|id| evaluation.state(id).unwrap_or(false))
                    .collect();
                TableRow {
                    inputs,
                    outputs,
                    stable: evaluation.is_stable(),
                }
            })
            .collect();

        Ok(Self {
            inputs: circuit
                .switches()
                .iter()
                .map(|n| n.display_name().to_string())
                .collect(),
            outputs: circuit
                .lights()
                .iter()
                .map(|n| n.display_name().to_string())
                .collect(),
            rows,
        })
    }

    /// The first light's column, in row order.
    pub fn first_output_column(&self) -> Vec<bool> {
        self.rows
            .iter()
            .map(|r| r.outputs.first().copied().unwrap_or(false))
            .collect()
    }
}
