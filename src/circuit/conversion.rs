use super::definition::Circuit;
use crate::error::ConversionError;

/// A trait for custom data models that can be converted into a `Circuit`.
///
/// Implement this on your own editor or file-format structs to hand them to
/// the evaluator without going through the editor's JSON layout.
///
/// # Example
///
/// ```rust
/// use logicsim::prelude::*;
/// use logicsim::error::ConversionError;
///
/// struct Netlist {
///     gates: Vec<(String, String)>,
///     wires: Vec<(String, String)>,
/// }
///
/// impl IntoCircuit for Netlist {
///     fn into_circuit(self) -> Result<Circuit, ConversionError> {
///         let mut circuit = Circuit::default();
///         for (id, kind) in self.gates {
///             circuit
///                 .add_node(Node::new(id, NodeKind::from_tag(&kind)))
///                 .map_err(|e| ConversionError::Invalid(e.to_string()))?;
///         }
///         for (i, (from, to)) in self.wires.into_iter().enumerate() {
///             circuit
///                 .connect(Edge::new(format!("w{}", i), from, to))
///                 .map_err(|e| ConversionError::Invalid(e.to_string()))?;
///         }
///         Ok(circuit)
///     }
/// }
///
/// let netlist = Netlist {
///     gates: vec![("a".into(), "switch".into()), ("out".into(), "light".into())],
///     wires: vec![("a".into(), "out".into())],
/// };
/// assert_eq!(netlist.into_circuit().unwrap().edges.len(), 1);
/// ```
pub trait IntoCircuit {
    /// Consumes the object and converts it into a circuit snapshot.
    fn into_circuit(self) -> Result<Circuit, ConversionError>;
}

impl IntoCircuit for Circuit {
    fn into_circuit(self) -> Result<Circuit, ConversionError> {
        Ok(self)
    }
}
