use super::definition::{Circuit, Edge, Node, NodeData, Position};
use crate::error::CircuitError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::{Read, Write};

/// Binary layout of a snapshot. Editor-only keys travel as JSON text, since
/// the binary format cannot carry free-form values.
#[derive(Serialize, Deserialize)]
struct ArchivedCircuit {
    nodes: Vec<ArchivedNode>,
    edges: Vec<ArchivedEdge>,
}

#[derive(Serialize, Deserialize)]
struct ArchivedNode {
    id: String,
    tag: String,
    position: Option<Position>,
    label: String,
    active: bool,
    fixed: bool,
    data_extra: String,
    extra: String,
}

#[derive(Serialize, Deserialize)]
struct ArchivedEdge {
    id: String,
    source: String,
    target: String,
    source_handle: Option<String>,
    target_handle: Option<String>,
    active: bool,
    extra: String,
}

fn pack_extra(extra: &Map<String, Value>) -> Result<String, CircuitError> {
    serde_json::to_string(extra)
        .map_err(|e| CircuitError::Encoding(format!("Serialization failed: {}", e)))
}

fn unpack_extra(text: &str) -> Result<Map<String, Value>, CircuitError> {
    serde_json::from_str(text)
        .map_err(|e| CircuitError::Encoding(format!("Deserialization failed: {}", e)))
}

impl ArchivedCircuit {
    fn pack(circuit: &Circuit) -> Result<Self, CircuitError> {
        let nodes = circuit
            .nodes
            .iter()
            .map(|node| {
                Ok(ArchivedNode {
                    id: node.id.clone(),
                    tag: node.tag().to_string(),
                    position: node.position,
                    label: node.data.label.clone(),
                    active: node.data.active,
                    fixed: node.data.fixed,
                    data_extra: pack_extra(&node.data.extra)?,
                    extra: pack_extra(&node.extra)?,
                })
            })
            .collect::<Result<_, CircuitError>>()?;
        let edges = circuit
            .edges
            .iter()
            .map(|edge| {
                Ok(ArchivedEdge {
                    id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    source_handle: edge.source_handle.clone(),
                    target_handle: edge.target_handle.clone(),
                    active: edge.active,
                    extra: pack_extra(&edge.extra)?,
                })
            })
            .collect::<Result<_, CircuitError>>()?;
        Ok(Self { nodes, edges })
    }

    fn unpack(self) -> Result<Circuit, CircuitError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|archived| {
                let mut node = Node::with_tag(archived.id, archived.tag);
                node.position = archived.position;
                node.data = NodeData {
                    label: archived.label,
                    active: archived.active,
                    fixed: archived.fixed,
                    extra: unpack_extra(&archived.data_extra)?,
                };
                node.extra = unpack_extra(&archived.extra)?;
                Ok(node)
            })
            .collect::<Result<_, CircuitError>>()?;
        let edges = self
            .edges
            .into_iter()
            .map(|archived| {
                let mut edge = Edge::new(archived.id, archived.source, archived.target);
                edge.source_handle = archived.source_handle;
                edge.target_handle = archived.target_handle;
                edge.active = archived.active;
                edge.extra = unpack_extra(&archived.extra)?;
                Ok(edge)
            })
            .collect::<Result<_, CircuitError>>()?;
        Ok(Circuit::new(nodes, edges))
    }
}

impl Circuit {
    /// Encodes the snapshot in the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CircuitError> {
        encode_to_vec(ArchivedCircuit::pack(self)?, standard())
            .map_err(|e| CircuitError::Encoding(format!("Serialization failed: {}", e)))
    }

    /// Decodes a snapshot produced by [`Circuit::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CircuitError> {
        decode_from_slice::<ArchivedCircuit, _>(bytes, standard())
            .map_err(|e| CircuitError::Encoding(format!("Deserialization failed: {}", e)))?
            .0
            .unpack()
    }

    /// Saves the snapshot to a file using the binary format.
    pub fn save(&self, path: &str) -> Result<(), CircuitError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| io_error(path, "create", e))?;
        file.write_all(&bytes)
            .map_err(|e| io_error(path, "write to", e))?;
        Ok(())
    }

    /// Loads a snapshot from a file, accepting either the binary format or JSON.
    pub fn from_file(path: &str) -> Result<Self, CircuitError> {
        let mut file = fs::File::open(path).map_err(|e| io_error(path, "open", e))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| io_error(path, "read from", e))?;

        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => {
                let text = String::from_utf8(bytes)
                    .map_err(|e| CircuitError::JsonParse(e.to_string()))?;
                Self::from_json(&text)
            }
            _ => Self::from_bytes(&bytes),
        }
    }
}

fn io_error(path: &str, action: &str, e: std::io::Error) -> CircuitError {
    CircuitError::Io {
        path: path.to_string(),
        message: format!("could not {} file: {}", action, e),
    }
}
