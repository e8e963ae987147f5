use crate::challenge::{ValidationResult, challenge_by_id};
use crate::circuit::Circuit;
use crate::evaluator::Evaluator;
use crate::simulator::Simulator;
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

impl<'py> IntoPyObject<'py> for ValidationResult {
    type Target = PyDict;
    type Output = Bound<'py, Self::Target>;
    type Error = PyErr;

    fn into_pyobject(self, py: Python<'py>) -> Result<Self::Output, Self::Error> {
        let dict = PyDict::new(py);
        dict.set_item("success", self.success)?;
        dict.set_item("message", self.message)?;
        dict.set_item("details", self.details)?;
        Ok(dict)
    }
}

fn parse_circuit(circuit_json: &str) -> PyResult<Circuit> {
    Circuit::from_json(circuit_json).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// A live circuit session.
///
/// Every input change re-evaluates the circuit, so `state` always reflects
/// the settled outputs.
#[pyclass(name = "Simulator")]
struct SimulatorPy {
    inner: Simulator,
}

#[pymethods]
impl SimulatorPy {
    /// Loads a circuit from the editor's JSON layout and settles it.
    ///
    /// Args:
    ///     circuit_json (str): `{"nodes": [...], "edges": [...]}`.
    ///     max_iterations (int): relaxation pass ceiling (default 100).
    ///
    /// Raises:
    ///     ValueError: If the JSON is malformed.
    #[new]
    #[pyo3(signature = (circuit_json, max_iterations = 100))]
    fn new(circuit_json: &str, max_iterations: usize) -> PyResult<Self> {
        let circuit = parse_circuit(circuit_json)?;
        let evaluator = Evaluator::builder().max_iterations(max_iterations).build();
        Ok(Self {
            inner: Simulator::with_evaluator(evaluator, circuit),
        })
    }

    /// Flips a switch or push-button and returns its new value.
    fn toggle(&mut self, node_id: &str) -> PyResult<bool> {
        self.inner
            .toggle(node_id)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn set_input(&mut self, node_id: &str, value: bool) -> PyResult<()> {
        self.inner
            .set_input(node_id, value)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Inverts every clock and returns whether the circuit settled.
    fn tick(&mut self) -> bool {
        self.inner.tick().is_stable()
    }

    fn state(&self, node_id: &str) -> Option<bool> {
        self.inner.state(node_id)
    }

    fn is_stable(&self) -> bool {
        self.inner.last_convergence().is_stable()
    }

    /// The current snapshot as JSON.
    fn circuit_json(&self) -> PyResult<String> {
        self.inner
            .circuit()
            .to_json()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

/// Evaluates a circuit snapshot once and returns the updated snapshot as JSON.
#[pyfunction]
fn evaluate(circuit_json: &str) -> PyResult<String> {
    let circuit = parse_circuit(circuit_json)?;
    crate::evaluator::evaluate(&circuit)
        .circuit
        .to_json()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Scores a circuit against a built-in challenge.
///
/// Returns:
///     dict: `success` (bool), `message` (str) and `details` (list[str]).
///
/// Raises:
///     KeyError: If no challenge has the given id.
#[pyfunction]
fn validate(circuit_json: &str, challenge_id: &str) -> PyResult<ValidationResult> {
    let circuit = parse_circuit(circuit_json)?;
    let challenge = challenge_by_id(challenge_id)
        .ok_or_else(|| PyKeyError::new_err(format!("unknown challenge '{}'", challenge_id)))?;
    Ok(challenge.validate(&circuit))
}

/// Digital logic circuit evaluation.
///
/// Python bindings to the logicsim engine: evaluate editor snapshots, run a
/// live simulation session, and score circuits against the built-in challenges.
#[pymodule]
fn logicsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<SimulatorPy>()?;
    m.add_function(wrap_pyfunction!(evaluate, m)?)?;
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    Ok(())
}
