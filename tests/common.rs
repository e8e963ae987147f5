//! Common test utilities for building circuits.
use logicsim::prelude::*;

/// Two fixed switches `sw_a`/`sw_b` and a fixed light, the scaffold most
/// two-input challenges start from.
#[allow(dead_code)]
pub fn two_input_scaffold() -> Circuit {
    Circuit::new(
        vec![
            Node::new("sw_a", NodeKind::Switch).with_label("A").fixed(),
            Node::new("sw_b", NodeKind::Switch).with_label("B").fixed(),
            Node::new("light", NodeKind::Light).with_label("Output").fixed(),
        ],
        vec![],
    )
}

/// `sw_a`, `sw_b` -> `gate` -> `light`, with the inputs on ports `a` and `b`.
#[allow(dead_code)]
pub fn two_input_gate(kind: NodeKind) -> Circuit {
    let mut circuit = two_input_scaffold();
    circuit.nodes.insert(2, Node::new("gate", kind));
    circuit.edges = vec![
        Edge::new("e_a", "sw_a", "gate").into_port(Port::A),
        Edge::new("e_b", "sw_b", "gate").into_port(Port::B),
        Edge::new("e_out", "gate", "light"),
    ];
    circuit
}

/// XOR built from four NANDs, wired onto the two-input scaffold.
#[allow(dead_code)]
pub fn nand_xor() -> Circuit {
    let mut circuit = two_input_scaffold();
    for id in ["n1", "n2", "n3", "n4"] {
        circuit.nodes.push(Node::new(id, NodeKind::Nand));
    }
    circuit.edges = vec![
        Edge::new("e1", "sw_a", "n1"),
        Edge::new("e2", "sw_b", "n1"),
        Edge::new("e3", "sw_a", "n2"),
        Edge::new("e4", "n1", "n2"),
        Edge::new("e5", "sw_b", "n3"),
        Edge::new("e6", "n1", "n3"),
        Edge::new("e7", "n2", "n4"),
        Edge::new("e8", "n3", "n4"),
        Edge::new("e9", "n4", "light"),
    ];
    circuit
}

/// NAND built from a relay feeding the coil of a normally-closed relay.
///
/// The first relay conducts `sw_b` while `sw_a` is high; the second passes
/// power unless the first one conducts.
#[allow(dead_code)]
pub fn relay_nand() -> Circuit {
    let mut circuit = logicsim::challenge::challenge_by_id("challenge_1")
        .map(|c| c.scaffold())
        .unwrap_or_default();
    circuit.nodes.push(Node::new("r1", NodeKind::Relay));
    circuit.nodes.push(Node::new("r2", NodeKind::RelayNc));
    circuit.edges = vec![
        Edge::new("e1", "sw_a", "r1").into_port(Port::Control),
        Edge::new("e2", "sw_b", "r1").into_port(Port::Signal),
        Edge::new("e3", "r1", "r2").into_port(Port::Control),
        Edge::new("e4", "power", "r2").into_port(Port::Signal),
        Edge::new("e5", "r2", "light"),
    ];
    circuit
}

/// A single D-latch between the `enable`/`data` switches and the light.
#[allow(dead_code)]
pub fn d_latch() -> Circuit {
    Circuit::new(
        vec![
            Node::new("enable", NodeKind::Switch).fixed(),
            Node::new("data", NodeKind::Switch).fixed(),
            Node::new("latch", NodeKind::DLatch),
            Node::new("light", NodeKind::Light).fixed(),
        ],
        vec![
            Edge::new("e1", "enable", "latch").into_port(Port::Enable),
            Edge::new("e2", "data", "latch").into_port(Port::Data),
            Edge::new("e3", "latch", "light"),
        ],
    )
}

/// Gated D-latch from four NANDs and an inverter, the classic textbook build.
#[allow(dead_code)]
pub fn nand_latch() -> Circuit {
    Circuit::new(
        vec![
            Node::new("enable", NodeKind::Switch).fixed(),
            Node::new("data", NodeKind::Switch).fixed(),
            Node::new("not_d", NodeKind::Not),
            Node::new("set_n", NodeKind::Nand),
            Node::new("reset_n", NodeKind::Nand),
            Node::new("q", NodeKind::Nand),
            Node::new("q_n", NodeKind::Nand),
            Node::new("light", NodeKind::Light).fixed(),
        ],
        vec![
            Edge::new("e1", "data", "not_d"),
            Edge::new("e2", "data", "set_n"),
            Edge::new("e3", "enable", "set_n"),
            Edge::new("e4", "not_d", "reset_n"),
            Edge::new("e5", "enable", "reset_n"),
            Edge::new("e6", "set_n", "q"),
            Edge::new("e7", "q_n", "q"),
            Edge::new("e8", "reset_n", "q_n"),
            Edge::new("e9", "q", "q_n"),
            Edge::new("e10", "q", "light"),
        ],
    )
}

/// Sets the named switches and evaluates once.
#[allow(dead_code)]
pub fn drive(circuit: &Circuit, values: &[(&str, bool)]) -> Evaluation {
    let mut working = circuit.clone();
    for (id, value) in values {
        working.set_input(id, *value).expect("switch exists");
    }
    evaluate(&working)
}

/// Editor-format snapshot: a NOT gate between a switch and a light.
#[allow(dead_code)]
pub const INVERTER_JSON: &str = r#"{
    "nodes": [
        {"id": "1", "type": "switch", "position": {"x": 0, "y": 0}, "data": {"label": "In", "active": true}},
        {"id": "2", "type": "not-gate", "position": {"x": 100, "y": 0}, "data": {"label": ""}},
        {"id": "3", "type": "light", "position": {"x": 200, "y": 0}, "data": {"label": "Out"}}
    ],
    "edges": [
        {"id": "e1-2", "source": "1", "target": "2", "sourceHandle": null, "targetHandle": "in"},
        {"id": "e2-3", "source": "2", "target": "3"}
    ]
}"#;
