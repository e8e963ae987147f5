//! Integration tests for logicsim
//!
//! End-to-end scenarios: challenge scaffolds wired up and scored, live
//! sessions, truth tables and persistence.
//!
mod common;
use common::*;
use logicsim::challenge::{ExpectedRow, challenge_by_id};
use logicsim::prelude::*;
use logicsim::storage::{FileStore, MemoryStore, ProgressTracker, ProjectStore};
use tempfile::tempdir;

#[cfg(test)]
mod challenge_tests {
    use super::*;

    #[test]
    fn relay_nand_solves_the_first_challenge() {
        let challenge = challenge_by_id("challenge_1").unwrap();
        let circuit = relay_nand();
        assert!(challenge.disallowed_nodes(&circuit).is_empty());

        let result = challenge.validate(&circuit);
        assert!(result.success, "{:?}", result.details);
        assert!(result.details.is_empty());
    }

    #[test]
    fn nand_xor_solves_the_xor_challenge() {
        let circuit = nand_xor();
        let table = TruthTable::generate(&Evaluator::default(), &circuit).unwrap();
        assert_eq!(table.first_output_column(), vec![false, true, true, false]);

        let result = challenge_by_id("challenge_5").unwrap().validate(&circuit);
        assert!(result.success);
    }

    #[test]
    fn latches_solve_the_memory_challenge() {
        let challenge = challenge_by_id("challenge_6").unwrap();
        assert!(challenge.validate(&d_latch()).success);

        let nand_build = nand_latch();
        assert!(challenge.disallowed_nodes(&nand_build).is_empty());
        assert!(challenge.validate(&nand_build).success);
    }

    #[test]
    fn plain_wire_fails_the_memory_challenge() {
        // Data straight to the light ignores enable.
        let circuit = Circuit::new(
            vec![
                Node::new("enable", NodeKind::Switch),
                Node::new("data", NodeKind::Switch),
                Node::new("light", NodeKind::Light),
            ],
            vec![Edge::new("e1", "data", "light")],
        );
        let result = challenge_by_id("challenge_6").unwrap().validate(&circuit);
        assert!(!result.success);
        assert_eq!(
            result.details,
            vec![
                "Entradas [0, 0]: esperado 1, obtenido 0",
                "Entradas [0, 1]: esperado 0, obtenido 1",
            ]
        );
    }

    #[test]
    fn missing_light_is_reported() {
        let circuit = Circuit::new(vec![Node::new("sw", NodeKind::Switch)], vec![]);
        let goal = GoalCondition::truth_table(vec![ExpectedRow::new(&[true], true)]);
        let result = validate(&circuit, &goal);
        assert!(!result.success);
        assert_eq!(result.message, "No se encontró ninguna salida conectada");
    }

    #[test]
    fn unwired_light_is_reported() {
        let result = challenge_by_id("challenge_3")
            .unwrap()
            .validate(&two_input_scaffold());
        assert!(!result.success);
        assert_eq!(result.message, "La salida no está conectada a ningún circuito");
        assert!(result.details.is_empty());
    }

    #[test]
    fn wrong_gate_lists_every_failing_row() {
        let circuit = two_input_gate(NodeKind::Or);
        let result = challenge_by_id("challenge_3").unwrap().validate(&circuit);
        assert!(!result.success);
        assert_eq!(
            result.message,
            "El circuito no pasó todas las pruebas (2/4 fallaron)"
        );
        assert_eq!(
            result.details,
            vec![
                "Entradas [0, 1]: esperado 0, obtenido 1",
                "Entradas [1, 0]: esperado 0, obtenido 1",
            ]
        );
    }

    #[test]
    fn output_state_goals_are_unsupported() {
        let goal: GoalCondition =
            serde_json::from_str(r#"{"type": "output-state", "expectedOutputs": []}"#).unwrap();
        let result = validate(&nand_xor(), &goal);
        assert!(!result.success);
    }

    #[test]
    fn missing_row_inputs_read_low() {
        // One value for two switches: the second switch is driven low.
        let goal = GoalCondition::truth_table(vec![ExpectedRow::new(&[true], true)]);
        let result = validate(&two_input_gate(NodeKind::Xor), &goal);
        assert!(result.success, "{:?}", result.details);
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn simulator_tracks_toggles() {
        let mut sim = Simulator::new(relay_nand());
        assert_eq!(sim.state("light"), Some(true));

        sim.toggle("sw_a").unwrap();
        sim.toggle("sw_b").unwrap();
        assert_eq!(sim.state("light"), Some(false));
        assert!(sim.last_convergence().is_stable());

        sim.set_input("sw_b", false).unwrap();
        assert_eq!(sim.state("light"), Some(true));
    }

    #[test]
    fn simulator_rejects_computed_nodes() {
        let mut sim = Simulator::new(nand_xor());
        assert!(matches!(
            sim.set_input("n1", true),
            Err(CircuitError::NotASource { .. })
        ));
        assert!(matches!(
            sim.toggle("nope"),
            Err(CircuitError::NodeNotFound(_))
        ));
    }

    /// A compact "a,b->nand" style netlist.
    struct Netlist(&'static str);

    impl IntoCircuit for Netlist {
        fn into_circuit(self) -> Result<Circuit, logicsim::error::ConversionError> {
            let invalid = |e: CircuitError| logicsim::error::ConversionError::Invalid(e.to_string());
            let mut circuit = Circuit::default();
            for (i, line) in self.0.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
                let (sources, kind) = line.split_once("->").ok_or_else(|| {
                    logicsim::error::ConversionError::Invalid(format!("line {} has no '->'", i))
                })?;
                let id = format!("g{}", i);
                circuit
                    .add_node(Node::new(id.clone(), NodeKind::from_tag(kind.trim())))
                    .map_err(invalid)?;
                for source in sources.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    let edge_id = format!("{}_{}", source, id);
                    circuit.connect(Edge::new(edge_id, source, id.clone())).map_err(invalid)?;
                }
            }
            Ok(circuit)
        }
    }

    #[test]
    fn custom_formats_convert_into_circuits() {
        let circuit = Netlist("->switch\n->switch\ng0,g1->nand-gate\ng2->light")
            .into_circuit()
            .unwrap();
        let mut sim = Simulator::new(circuit);
        assert_eq!(sim.state("g3"), Some(true));
        sim.set_input("g0", true).unwrap();
        sim.set_input("g1", true).unwrap();
        assert_eq!(sim.state("g3"), Some(false));

        assert!(Netlist("g9->light").into_circuit().is_err());
        assert!(Netlist("switch").into_circuit().is_err());
    }

    #[test]
    fn truth_table_renders() {
        let table = TruthTable::generate(&Evaluator::default(), &two_input_gate(NodeKind::And)).unwrap();
        let text = TableFormatter::format(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "A B | Output");
        assert_eq!(lines.len(), 6);
        assert!(lines[5].starts_with("1 1 | 1"));
    }

    #[test]
    fn truth_table_needs_switches_and_lights() {
        let evaluator = Evaluator::default();
        let no_lights = Circuit::new(vec![Node::new("sw", NodeKind::Switch)], vec![]);
        assert_eq!(
            TruthTable::generate(&evaluator, &no_lights),
            Err(TableError::NoOutputs)
        );
        let no_switches = Circuit::new(vec![Node::new("l", NodeKind::Light)], vec![]);
        assert_eq!(
            TruthTable::generate(&evaluator, &no_switches),
            Err(TableError::NoInputs)
        );
    }
}

#[cfg(test)]
mod persistence_tests {
    use super::*;

    #[test]
    fn binary_snapshot_survives_a_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latch.bin");
        let path = path.to_str().unwrap();

        let mut circuit = d_latch();
        circuit.set_input("enable", true).unwrap();
        circuit.set_input("data", true).unwrap();
        let settled = evaluate(&circuit).into_circuit();
        settled.save(path).unwrap();

        let loaded = Circuit::from_file(path).unwrap();
        assert_eq!(loaded, settled);
        assert_eq!(loaded.state("latch"), Some(true));
    }

    #[test]
    fn json_files_load_too() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inverter.json");
        std::fs::write(&path, INVERTER_JSON).unwrap();
        let circuit = Circuit::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(circuit.nodes.len(), 3);
    }

    #[test]
    fn projects_persist_in_a_file_store() {
        let dir = tempdir().unwrap();
        let projects = ProjectStore::new(FileStore::new(dir.path()));

        let created = projects.create("Half adder", "XOR and AND").unwrap();
        assert!(created.id.starts_with("project_"));
        assert!(projects.update_circuit(&created.id, &nand_xor()).unwrap());

        let reopened = ProjectStore::new(FileStore::new(dir.path()));
        let stored = reopened.get(&created.id).unwrap().unwrap();
        assert_eq!(stored.circuit, nand_xor());
        assert_eq!(reopened.list().unwrap().len(), 1);

        assert!(reopened.delete(&created.id).unwrap());
        assert!(!reopened.delete(&created.id).unwrap());
    }

    #[test]
    fn solving_challenges_unlocks_levels() {
        let tracker = ProgressTracker::new(MemoryStore::new());
        assert!(tracker.is_unlocked(1).unwrap());
        assert!(!tracker.is_unlocked(2).unwrap());

        for id in ["challenge_1", "challenge_1", "challenge_2"] {
            tracker.mark_completed(id).unwrap();
        }
        assert_eq!(tracker.current_level().unwrap(), 3);
        assert!(tracker.is_unlocked(3).unwrap());
        assert!(tracker.is_completed("challenge_2").unwrap());
    }
}
