use clap::{Parser, Subcommand};
use logicsim::challenge::{catalog, challenge_by_id};
use logicsim::prelude::*;
use logicsim::{evaluator::DEFAULT_MAX_ITERATIONS, logging};
use std::time::Instant;

/// Evaluate, tabulate and score digital logic circuits
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Relaxation pass ceiling for each evaluation
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a circuit once and print every node's output
    Run {
        /// Path to the circuit (editor JSON or binary snapshot)
        circuit_path: String,
        /// Drive a source before evaluating, e.g. `--set sw_a=1`
        #[arg(long = "set", value_parser = parse_assignment)]
        assignments: Vec<(String, bool)>,
        /// Number of clock ticks to apply after the first evaluation
        #[arg(long, default_value_t = 0)]
        ticks: usize,
        /// Write the evaluated snapshot here (`.json` for JSON, anything else binary)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the truth table over every switch combination
    Table {
        /// Path to the circuit
        circuit_path: String,
    },
    /// Score a circuit against a built-in challenge
    Validate {
        /// Path to the circuit
        circuit_path: String,
        /// Challenge id, e.g. `challenge_1`
        #[arg(short, long)]
        challenge: String,
    },
    /// List the built-in challenges
    Challenges,
}

fn parse_assignment(raw: &str) -> Result<(String, bool), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <node>=<0|1>, got '{}'", raw))?;
    let value = match value {
        "1" | "true" | "on" => true,
        "0" | "false" | "off" => false,
        other => return Err(format!("'{}' is not a logic level", other)),
    };
    Ok((id.to_string(), value))
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let evaluator = Evaluator::builder()
        .max_iterations(cli.max_iterations)
        .build();

    match cli.command {
        Command::Run {
            circuit_path,
            assignments,
            ticks,
            output,
        } => run(evaluator, &circuit_path, &assignments, ticks, output),
        Command::Table { circuit_path } => table(&evaluator, &circuit_path),
        Command::Validate {
            circuit_path,
            challenge,
        } => validate_challenge(evaluator, &circuit_path, &challenge),
        Command::Challenges => list_challenges(),
    }
}

fn load(path: &str) -> Circuit {
    Circuit::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load circuit '{}': {}", path, e)))
}

fn run(
    evaluator: Evaluator,
    circuit_path: &str,
    assignments: &[(String, bool)],
    ticks: usize,
    output: Option<String>,
) {
    let total_start = Instant::now();
    let mut circuit = load(circuit_path);
    println!(
        "Loaded '{}': {} nodes, {} edges",
        circuit_path,
        circuit.nodes.len(),
        circuit.edges.len()
    );

    for (id, value) in assignments {
        circuit
            .set_input(id, *value)
            .unwrap_or_else(|e| exit_with_error(&format!("Cannot drive '{}': {}", id, e)));
    }

    let eval_start = Instant::now();
    let mut simulator = Simulator::with_evaluator(evaluator, circuit);
    for _ in 0..ticks {
        simulator.tick();
    }
    let eval_duration = eval_start.elapsed();

    println!("\nNode States:");
    for node in &simulator.circuit().nodes {
        println!(
            "  {:<16} {:<14} {}",
            node.display_name(),
            node.kind.to_string(),
            if node.is_active() { "1" } else { "0" }
        );
    }

    match simulator.last_convergence() {
        Convergence::Stable { passes } => println!("\nStable after {} passes", passes),
        Convergence::Unstable { passes } => println!(
            "\nWarning: circuit did not stabilize within {} passes; values are the last computed",
            passes
        ),
    }

    if let Some(path) = output {
        let circuit = simulator.circuit();
        let result = if path.ends_with(".json") {
            circuit
                .to_json_pretty()
                .and_then(|json| {
                    std::fs::write(&path, json).map_err(|e| CircuitError::Io {
                        path: path.clone(),
                        message: e.to_string(),
                    })
                })
        } else {
            circuit.save(&path)
        };
        result.unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
        println!("  -> Wrote evaluated snapshot to '{}'", path);
    }

    println!("\n--- Performance Summary ---");
    println!("Evaluation:           {:?}", eval_duration);
    println!("Total Execution:      {:?}", total_start.elapsed());
}

fn table(evaluator: &Evaluator, circuit_path: &str) {
    let circuit = load(circuit_path);
    let table = TruthTable::generate(evaluator, &circuit)
        .unwrap_or_else(|e| exit_with_error(&format!("Cannot build truth table: {}", e)));
    print!("{}", TableFormatter::format(&table));
    if table.rows.iter().any(|r| !r.stable) {
        println!("\n~ row did not stabilize");
    }
}

fn validate_challenge(evaluator: Evaluator, circuit_path: &str, challenge_id: &str) {
    let circuit = load(circuit_path);
    let challenge = challenge_by_id(challenge_id)
        .unwrap_or_else(|| exit_with_error(&format!("Unknown challenge '{}'", challenge_id)));

    let foreign = challenge.disallowed_nodes(&circuit);
    if !foreign.is_empty() {
        println!("Warning: parts outside this challenge's palette:");
        for node in foreign {
            println!("  -> {} ({})", node.display_name(), node.kind);
        }
    }

    let result = Validator::new(evaluator).validate(&circuit, &challenge.goal);
    println!("{}: {}", challenge.title, result.message);
    for line in &result.details {
        println!("  -> {}", line);
    }
    if !result.success {
        std::process::exit(1);
    }
}

fn list_challenges() {
    for challenge in catalog() {
        println!(
            "{:<12} [{}] level {} - {}",
            challenge.id,
            challenge.level.as_str(),
            challenge.required_level,
            challenge.title
        );
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
