use super::goal::{ExpectedRow, GoalCondition};
use super::validator::{ValidationResult, Validator};
use crate::circuit::{Circuit, Edge, Node, NodeKind};
use serde::{Deserialize, Serialize};

/// Difficulty band a challenge is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "Principiante")]
    Beginner,
    #[serde(rename = "Intermedio")]
    Intermediate,
    #[serde(rename = "Avanzado")]
    Advanced,
    #[serde(rename = "Hardware")]
    Hardware,
    #[serde(rename = "Lógica Básica")]
    BasicLogic,
    #[serde(rename = "Lógica Avanzada")]
    AdvancedLogic,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Principiante",
            Level::Intermediate => "Intermedio",
            Level::Advanced => "Avanzado",
            Level::Hardware => "Hardware",
            Level::BasicLogic => "Lógica Básica",
            Level::AdvancedLogic => "Lógica Avanzada",
        }
    }
}

/// A puzzle: a scaffold of fixed parts, a palette, and a goal to reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: Level,
    #[serde(rename = "requiredLevel")]
    pub required_level: u32,
    pub locked: bool,
    #[serde(rename = "allowedGates")]
    pub allowed_gates: Vec<NodeKind>,
    #[serde(rename = "fixedNodes")]
    pub fixed_nodes: Vec<Node>,
    #[serde(rename = "fixedEdges")]
    pub fixed_edges: Vec<Edge>,
    #[serde(rename = "goalCondition")]
    pub goal: GoalCondition,
}

impl Challenge {
    /// The starting circuit handed to the editor.
    pub fn scaffold(&self) -> Circuit {
        Circuit::new(self.fixed_nodes.clone(), self.fixed_edges.clone())
    }

    pub fn allows(&self, kind: &NodeKind) -> bool {
        self.allowed_gates.contains(kind)
    }

    /// Nodes whose kind is outside this challenge's palette.
    pub fn disallowed_nodes<'a>(&self, circuit: &'a Circuit) -> Vec<&'a Node> {
        circuit
            .nodes
            .iter()
            .filter(|n| !self.allows(&n.kind))
            .collect()
    }

    pub fn validate(&self, circuit: &Circuit) -> ValidationResult {
        Validator::default().validate(circuit, &self.goal)
    }
}

fn switch(id: &str, label: &str, x: f64, y: f64) -> Node {
    Node::new(id, NodeKind::Switch)
        .with_label(label)
        .at(x, y)
        .fixed()
}

fn light(label: &str, x: f64, y: f64) -> Node {
    Node::new("light", NodeKind::Light)
        .with_label(label)
        .at(x, y)
        .fixed()
}

fn two_input_table(outputs: [bool; 4]) -> GoalCondition {
    let inputs = [[false, false], [false, true], [true, false], [true, true]];
    GoalCondition::truth_table(
        inputs
            .iter()
            .zip(outputs)
            .map(|(row, out)| ExpectedRow::new(row, out))
            .collect(),
    )
}

fn palette(kinds: &[NodeKind]) -> Vec<NodeKind> {
    kinds.to_vec()
}

/// The built-in challenges, in unlock order.
pub fn catalog() -> Vec<Challenge> {
    use NodeKind::*;

    vec![
        Challenge {
            id: "challenge_1".to_string(),
            title: "La Piedra Angular (NAND)".to_string(),
            description: "Construye una compuerta NAND usando Relays. Tienes un Relay Normal y uno \
                          Normalmente Cerrado (NC). La salida debe ser FALSA solo si ambas entradas \
                          son VERDADERAS."
                .to_string(),
            level: Level::Hardware,
            required_level: 1,
            locked: false,
            allowed_gates: palette(&[Switch, Light, PowerSource, Relay, RelayNc]),
            fixed_nodes: vec![
                switch("sw_a", "Input A", 50.0, 100.0),
                switch("sw_b", "Input B", 50.0, 200.0),
                Node::new("power", PowerSource)
                    .with_label("Power")
                    .with_active(true)
                    .at(50.0, 300.0)
                    .fixed(),
                light("Output", 600.0, 150.0),
            ],
            fixed_edges: vec![],
            goal: two_input_table([true, true, true, false]),
        },
        Challenge {
            id: "challenge_2".to_string(),
            title: "Inversion (NOT)".to_string(),
            description: "Obtuviste una compuerta NAND. Ahora úsala para construir un inversor \
                          (NOT). Si la entrada es 1, la salida es 0."
                .to_string(),
            level: Level::BasicLogic,
            required_level: 2,
            locked: true,
            allowed_gates: palette(&[Switch, Light, Nand]),
            fixed_nodes: vec![
                switch("sw_in", "Input", 50.0, 150.0),
                light("Output", 500.0, 150.0),
            ],
            fixed_edges: vec![],
            goal: GoalCondition::truth_table(vec![
                ExpectedRow::new(&[false], true),
                ExpectedRow::new(&[true], false),
            ]),
        },
        Challenge {
            id: "challenge_3".to_string(),
            title: "Conjunción (AND)".to_string(),
            description: "Construye una compuerta AND usando solo compuertas NAND.".to_string(),
            level: Level::BasicLogic,
            required_level: 3,
            locked: true,
            allowed_gates: palette(&[Switch, Light, Nand]),
            fixed_nodes: vec![
                switch("sw_a", "A", 50.0, 100.0),
                switch("sw_b", "B", 50.0, 200.0),
                light("Output", 600.0, 150.0),
            ],
            fixed_edges: vec![],
            goal: two_input_table([false, false, false, true]),
        },
        Challenge {
            id: "challenge_4".to_string(),
            title: "Disyunción (OR)".to_string(),
            description: "Construye una compuerta OR usando solo compuertas NAND (y la lógica que \
                          has aprendido)."
                .to_string(),
            level: Level::BasicLogic,
            required_level: 4,
            locked: true,
            allowed_gates: palette(&[Switch, Light, Nand]),
            fixed_nodes: vec![
                switch("sw_a", "A", 50.0, 100.0),
                switch("sw_b", "B", 50.0, 200.0),
                light("Output", 600.0, 150.0),
            ],
            fixed_edges: vec![],
            goal: two_input_table([false, true, true, true]),
        },
        Challenge {
            id: "challenge_5".to_string(),
            title: "Exclusividad (XOR)".to_string(),
            description: "El desafío final de este nivel: Construye una compuerta XOR usando solo \
                          compuertas NAND."
                .to_string(),
            level: Level::AdvancedLogic,
            required_level: 5,
            locked: true,
            allowed_gates: palette(&[Switch, Light, Nand]),
            fixed_nodes: vec![
                switch("sw_a", "A", 50.0, 100.0),
                switch("sw_b", "B", 50.0, 200.0),
                light("Output", 600.0, 150.0),
            ],
            fixed_edges: vec![],
            goal: two_input_table([false, true, true, false]),
        },
        Challenge {
            id: "challenge_6".to_string(),
            title: "Memoria (Latch)".to_string(),
            description: "Construye un circuito capaz de recordar información. Un Latch D simple. \
                          Si Enable (E) está encendido, la salida sigue a Data (D). Si E está \
                          apagado, la salida MANTIENE su valor anterior (Memoria)."
                .to_string(),
            level: Level::AdvancedLogic,
            required_level: 6,
            locked: true,
            allowed_gates: palette(&[Switch, Light, Nand, Not]),
            fixed_nodes: vec![
                switch("enable", "Enable", 50.0, 100.0),
                switch("data", "Data", 50.0, 300.0),
                light("Q (Output)", 600.0, 200.0),
            ],
            fixed_edges: vec![],
            // Rows are order dependent: rows 3 and 5 check the held value.
            goal: GoalCondition::truth_table(vec![
                ExpectedRow::new(&[true, false], false),
                ExpectedRow::new(&[true, true], true),
                ExpectedRow::new(&[false, false], true),
                ExpectedRow::new(&[true, false], false),
                ExpectedRow::new(&[false, true], false),
            ]),
        },
    ]
}

pub fn challenge_by_id(id: &str) -> Option<Challenge> {
    catalog().into_iter().find(|c| c.id == id)
}

pub fn challenges_by_level(level: Level) -> Vec<Challenge> {
    catalog().into_iter().filter(|c| c.level == level).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique_and_ordered() {
        let ids: Vec<String> = catalog().into_iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                "challenge_1",
                "challenge_2",
                "challenge_3",
                "challenge_4",
                "challenge_5",
                "challenge_6"
            ]
        );
    }

    #[test]
    fn scaffold_nodes_are_fixed() {
        for challenge in catalog() {
            assert!(challenge.scaffold().nodes.iter().all(|n| n.data.fixed));
            assert!(challenge.scaffold().check_structure().is_ok());
        }
    }

    #[test]
    fn lookup_by_level() {
        let basic = challenges_by_level(Level::BasicLogic);
        assert_eq!(basic.len(), 3);
        assert!(challenge_by_id("challenge_9").is_none());
    }

    #[test]
    fn palette_flags_foreign_parts() {
        let challenge = challenge_by_id("challenge_2").unwrap();
        let mut circuit = challenge.scaffold();
        circuit.add_node(Node::new("g", NodeKind::Not)).unwrap();
        let rejected: Vec<&str> = challenge
            .disallowed_nodes(&circuit)
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(rejected, vec!["g"]);
    }

    #[test]
    fn challenge_json_uses_editor_field_names() {
        let challenge = challenge_by_id("challenge_1").unwrap();
        let json = serde_json::to_value(&challenge).unwrap();
        assert_eq!(json["goalCondition"]["type"], "truth-table");
        assert_eq!(json["allowedGates"][3], "relay");
        assert_eq!(json["level"], "Hardware");

        let nand = serde_json::to_value(challenge_by_id("challenge_6").unwrap()).unwrap();
        assert_eq!(nand["allowedGates"][2], "nand-gate");
        assert_eq!(nand["allowedGates"][3], "not-gate");
    }
}
