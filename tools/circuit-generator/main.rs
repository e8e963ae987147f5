use clap::Parser;
use logicsim::circuit::{Circuit, Edge, Node, NodeKind, Port};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate random circuits for stress-testing the evaluator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_circuit.json")]
    output: String,

    /// Number of switch inputs
    #[arg(long, default_value_t = 4)]
    inputs: usize,

    /// Number of computed components (gates, relays, latches)
    #[arg(long, default_value_t = 32)]
    gates: usize,

    /// Number of light outputs
    #[arg(long, default_value_t = 2)]
    outputs: usize,

    /// Probability that a component input is wired back to a later component,
    /// creating a feedback loop
    #[arg(long, default_value_t = 0.0)]
    feedback: f64,
}

const GATE_KINDS: [NodeKind; 9] = [
    NodeKind::And,
    NodeKind::Or,
    NodeKind::Not,
    NodeKind::Xor,
    NodeKind::Nand,
    NodeKind::DLatch,
    NodeKind::Relay,
    NodeKind::RelayNc,
    NodeKind::Display,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.inputs == 0 || cli.outputs == 0 {
        eprintln!("Error: at least one input and one output are required");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.feedback) {
        eprintln!("Error: --feedback ({}) must be between 0 and 1", cli.feedback);
        std::process::exit(1);
    }

    println!(
        "Generating circuit ({} inputs, {} components, {} outputs, feedback {})...",
        cli.inputs, cli.gates, cli.outputs, cli.feedback
    );

    let circuit = generate_circuit(&mut rng, &cli);
    println!(
        "-> Generated {} nodes and {} edges.",
        circuit.nodes.len(),
        circuit.edges.len()
    );

    fs::write(&cli.output, circuit.to_json_pretty()?)?;
    println!("Successfully generated and saved circuit to '{}'", cli.output);

    Ok(())
}

fn generate_circuit(rng: &mut ThreadRng, cli: &Cli) -> Circuit {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for i in 0..cli.inputs {
        nodes.push(
            Node::new(format!("sw_{}", i), NodeKind::Switch)
                .with_label(format!("In {}", i))
                .with_active(rng.random_bool(0.5)),
        );
    }

    let gate_ids: Vec<String> = (0..cli.gates).map(|i| format!("g_{}", i)).collect();
    for (i, id) in gate_ids.iter().enumerate() {
        let kind = GATE_KINDS[rng.random_range(0..GATE_KINDS.len())].clone();
        let ports = wire_ports(&kind);
        nodes.push(Node::new(id.clone(), kind));

        // Each input comes from an earlier node unless a feedback wire is drawn.
        let earlier = cli.inputs + i;
        for port in ports {
            let source = if i + 1 < gate_ids.len() && rng.random_bool(cli.feedback) {
                gate_ids[rng.random_range(i + 1..gate_ids.len())].clone()
            } else {
                nodes[rng.random_range(0..earlier)].id.clone()
            };
            let mut edge = Edge::new(format!("e_{}", edges.len()), source, id.clone());
            if let Some(port) = port {
                edge = edge.into_port(port);
            }
            edges.push(edge);
        }
    }

    let driver_count = nodes.len();
    for i in 0..cli.outputs {
        let id = format!("light_{}", i);
        let source = nodes[rng.random_range(0..driver_count)].id.clone();
        nodes.push(Node::new(id.clone(), NodeKind::Light).with_label(format!("Out {}", i)));
        edges.push(Edge::new(format!("e_{}", edges.len()), source, id));
    }

    Circuit::new(nodes, edges)
}

/// The inputs to draw for a component: one entry per wire, with its port.
fn wire_ports(kind: &NodeKind) -> Vec<Option<Port>> {
    match kind {
        NodeKind::Not | NodeKind::Display => vec![None],
        NodeKind::DLatch => vec![Some(Port::Enable), Some(Port::Data)],
        NodeKind::Relay | NodeKind::RelayNc => vec![Some(Port::Control), Some(Port::Signal)],
        _ => vec![Some(Port::A), Some(Port::B)],
    }
}
