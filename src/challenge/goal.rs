use serde::{Deserialize, Serialize};

/// How a challenge decides whether a circuit is correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    #[serde(rename = "truth-table")]
    TruthTable,
    #[serde(rename = "output-state")]
    OutputState,
}

/// One row of an expected truth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedRow {
    /// Value for the i-th switch of the circuit, in encounter order.
    #[serde(rename = "inputStates")]
    pub input_states: Vec<bool>,
    /// Expected value of the first light.
    #[serde(rename = "outputState")]
    pub output_state: bool,
}

impl ExpectedRow {
    pub fn new(input_states: &[bool], output_state: bool) -> Self {
        Self {
            input_states: input_states.to_vec(),
            output_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCondition {
    #[serde(rename = "type")]
    pub kind: GoalKind,
    #[serde(rename = "expectedOutputs")]
    pub expected_outputs: Vec<ExpectedRow>,
}

impl GoalCondition {
    pub fn truth_table(rows: Vec<ExpectedRow>) -> Self {
        Self {
            kind: GoalKind::TruthTable,
            expected_outputs: rows,
        }
    }
}
