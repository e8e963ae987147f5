use super::kind::{NodeKind, Port};
use crate::error::CircuitError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canvas coordinates of a node. Carried through untouched for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// The data bag the editor attaches to every node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
    /// Current output. Ground truth for sources, last computed value otherwise.
    #[serde(default)]
    pub active: bool,
    /// Challenge scaffold nodes cannot be deleted or relabeled in the editor.
    #[serde(default)]
    pub fixed: bool,
    /// Editor-only keys, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single component instance in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeRecord", into = "NodeRecord")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub position: Option<Position>,
    pub data: NodeData,
    /// Editor-only keys (`draggable`, `selected`, ...), written back untouched.
    pub extra: Map<String, Value>,
    /// The `type` tag as it was read, when it differs from the editor tag.
    spelling: Option<String>,
}

/// The JSON shape of a node.
#[derive(Serialize, Deserialize)]
struct NodeRecord {
    id: String,
    #[serde(rename = "type")]
    tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    #[serde(default)]
    data: NodeData,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        let mut node = Node::with_tag(record.id, record.tag);
        node.position = record.position;
        node.data = record.data;
        node.extra = record.extra;
        node
    }
}

impl From<Node> for NodeRecord {
    fn from(node: Node) -> Self {
        NodeRecord {
            tag: node.tag().to_string(),
            id: node.id,
            position: node.position,
            data: node.data,
            extra: node.extra,
        }
    }
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: None,
            data: NodeData::default(),
            extra: Map::new(),
            spelling: None,
        }
    }

    /// Builds a node from a `type` tag, remembering how the tag was spelled.
    pub fn with_tag(id: impl Into<String>, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let kind = NodeKind::from_tag(&tag);
        let spelling = (tag != kind.editor_tag()).then_some(tag);
        Self {
            spelling,
            ..Self::new(id, kind)
        }
    }

    /// The `type` tag written for this node: the spelling it was loaded with,
    /// unless its kind has since been changed.
    pub fn tag(&self) -> &str {
        match &self.spelling {
            Some(tag) if NodeKind::from_tag(tag) == self.kind => tag.as_str(),
            _ => self.kind.editor_tag(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = label.into();
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.data.active = active;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.data.fixed = true;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    pub fn is_active(&self) -> bool {
        self.data.active
    }

    /// The label, or the id when no label was given.
    pub fn display_name(&self) -> &str {
        if self.data.label.is_empty() {
            &self.id
        } else {
            &self.data.label
        }
    }
}

/// A directed wire carrying the source node's output to the target node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(
        default,
        rename = "sourceHandle",
        alias = "source_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
    #[serde(
        default,
        rename = "targetHandle",
        alias = "target_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_handle: Option<String>,
    /// Whether the source was active after the last evaluation. Presentation only.
    #[serde(default)]
    pub active: bool,
    /// Editor-only keys (`type`, `animated`, ...), written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            active: false,
            extra: Map::new(),
        }
    }

    /// Routes this edge into a named port of the target node.
    pub fn into_port(mut self, port: Port) -> Self {
        self.target_handle = Some(port.as_str().to_string());
        self
    }
}

/// A node list plus edge list: one immutable input to an evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Circuit {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn from_json(json: &str) -> Result<Self, CircuitError> {
        serde_json::from_str(json).map_err(|e| CircuitError::JsonParse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, CircuitError> {
        serde_json::to_string(self).map_err(|e| CircuitError::JsonParse(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, CircuitError> {
        serde_json::to_string_pretty(self).map_err(|e| CircuitError::JsonParse(e.to_string()))
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// The `active` value of a node, `None` if the node does not exist.
    pub fn state(&self, id: &str) -> Option<bool> {
        self.node(id).map(Node::is_active)
    }

    /// Edges that end at the given node, in snapshot order.
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }

    pub fn nodes_of<'a>(&'a self, kind: &'a NodeKind) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| &n.kind == kind)
    }

    /// Switch nodes in encounter order; the i-th switch is input column i.
    pub fn switches(&self) -> Vec<&Node> {
        self.nodes_of(&NodeKind::Switch).collect()
    }

    pub fn lights(&self) -> Vec<&Node> {
        self.nodes_of(&NodeKind::Light).collect()
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), CircuitError> {
        if self.node(&node.id).is_some() {
            return Err(CircuitError::DuplicateNodeId(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Adds a wire. Both endpoints must exist at the time of the call.
    pub fn connect(&mut self, edge: Edge) -> Result<(), CircuitError> {
        for endpoint in [&edge.source, &edge.target] {
            if self.node(endpoint).is_none() {
                return Err(CircuitError::DanglingEdge {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Deletes a node together with every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node, CircuitError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| CircuitError::NodeNotFound(id.to_string()))?;
        if self.nodes[index].data.fixed {
            return Err(CircuitError::FixedNode(id.to_string()));
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(self.nodes.remove(index))
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(index))
    }

    pub fn set_label(&mut self, id: &str, label: impl Into<String>) -> Result<(), CircuitError> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| CircuitError::NodeNotFound(id.to_string()))?;
        if node.data.fixed {
            return Err(CircuitError::FixedNode(id.to_string()));
        }
        node.data.label = label.into();
        Ok(())
    }

    /// Drives a source node. A power source only ever accepts `true`.
    pub fn set_input(&mut self, id: &str, value: bool) -> Result<(), CircuitError> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| CircuitError::NodeNotFound(id.to_string()))?;
        if !node.kind.is_source() {
            return Err(CircuitError::NotASource {
                node_id: id.to_string(),
                kind: node.kind.clone(),
            });
        }
        node.data.active = value || node.kind == NodeKind::PowerSource;
        Ok(())
    }

    /// Flips a source node and returns the value it now holds. A power
    /// source stays high.
    pub fn toggle(&mut self, id: &str) -> Result<bool, CircuitError> {
        let current = self
            .state(id)
            .ok_or_else(|| CircuitError::NodeNotFound(id.to_string()))?;
        self.set_input(id, !current)?;
        Ok(self.state(id).unwrap_or(false))
    }

    /// Clears the remembered output of every computed node.
    pub fn reset_state(&mut self) {
        for node in self.nodes.iter_mut().filter(|n| !n.kind.is_source()) {
            node.data.active = false;
        }
        for edge in &mut self.edges {
            edge.active = false;
        }
    }

    /// Reports duplicate node ids and edges whose endpoints do not exist.
    ///
    /// Evaluation tolerates both; this is for editors and loaders that want
    /// to reject such snapshots up front.
    pub fn check_structure(&self) -> Result<(), CircuitError> {
        let mut seen = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(CircuitError::DuplicateNodeId(node.id.clone()));
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(CircuitError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Circuit {
        Circuit::new(
            vec![
                Node::new("sw", NodeKind::Switch).fixed(),
                Node::new("not", NodeKind::Not),
                Node::new("out", NodeKind::Light),
            ],
            vec![Edge::new("e1", "sw", "not"), Edge::new("e2", "not", "out")],
        )
    }

    #[test]
    fn parses_editor_json() {
        let json = r#"{
            "nodes": [
                { "id": "sw_a", "type": "switch", "position": { "x": 50, "y": 100 },
                  "data": { "label": "Input A", "active": true, "fixed": true } },
                { "id": "g", "type": "nand-gate", "data": { "label": "nand-gate node" } },
                { "id": "light", "type": "light", "data": { "label": "Q (Output)", "fixed": true } }
            ],
            "edges": [
                { "id": "e1", "source": "sw_a", "target": "g", "targetHandle": "a" },
                { "id": "e2", "source": "g", "target": "light", "animated": true }
            ]
        }"#;
        let circuit = Circuit::from_json(json).unwrap();
        assert_eq!(circuit.nodes[1].kind, NodeKind::Nand);
        assert!(circuit.nodes[0].is_active());
        assert!(!circuit.nodes[2].is_active());
        assert_eq!(circuit.edges[0].target_handle.as_deref(), Some("a"));
        assert_eq!(circuit.edges[1].target_handle, None);
    }

    #[test]
    fn remove_node_refuses_fixed_and_drops_edges() {
        let mut circuit = sample();
        assert_eq!(
            circuit.remove_node("sw"),
            Err(CircuitError::FixedNode("sw".to_string()))
        );
        circuit.remove_node("not").unwrap();
        assert!(circuit.edges.is_empty());
        assert_eq!(circuit.nodes.len(), 2);
    }

    #[test]
    fn only_sources_can_be_driven() {
        let mut circuit = sample();
        assert!(circuit.toggle("sw").unwrap());
        assert!(matches!(
            circuit.set_input("not", true),
            Err(CircuitError::NotASource { .. })
        ));
        assert_eq!(
            circuit.toggle("missing"),
            Err(CircuitError::NodeNotFound("missing".to_string()))
        );
    }

    #[test]
    fn power_source_cannot_be_driven_low() {
        let mut circuit = Circuit::new(vec![Node::new("p", NodeKind::PowerSource)], vec![]);
        circuit.set_input("p", false).unwrap();
        assert_eq!(circuit.state("p"), Some(true));
    }

    #[test]
    fn toggling_power_source_reports_it_stays_high() {
        let mut circuit =
            Circuit::new(vec![Node::new("p", NodeKind::PowerSource).with_active(true)], vec![]);
        assert_eq!(circuit.toggle("p"), Ok(true));
        assert_eq!(circuit.state("p"), Some(true));
    }

    #[test]
    fn set_label_refuses_fixed_nodes() {
        let mut circuit = sample();
        assert_eq!(
            circuit.set_label("sw", "renamed"),
            Err(CircuitError::FixedNode("sw".to_string()))
        );
        assert_eq!(circuit.node("sw").unwrap().display_name(), "sw");

        circuit.set_label("not", "Inverter").unwrap();
        assert_eq!(circuit.node("not").unwrap().display_name(), "Inverter");
        assert!(matches!(
            circuit.set_label("missing", "x"),
            Err(CircuitError::NodeNotFound(_))
        ));
    }

    #[test]
    fn incoming_and_remove_edge() {
        let mut circuit = sample();
        let into_out: Vec<&str> = circuit.incoming("out").map(|e| e.id.as_str()).collect();
        assert_eq!(into_out, vec!["e2"]);

        let removed = circuit.remove_edge("e2").unwrap();
        assert_eq!(removed.source, "not");
        assert_eq!(circuit.incoming("out").count(), 0);
        assert!(circuit.remove_edge("e2").is_none());
        assert_eq!(circuit.edges.len(), 1);
    }

    #[test]
    fn editor_snapshot_round_trips_unchanged() {
        let json = r#"{"nodes":[{"id":"g","type":"nand-gate","position":{"x":1.0,"y":2.0},"data":{"label":"","active":false,"fixed":false,"inputs":2},"draggable":false},{"id":"a","type":"gate","data":{"label":"A","active":false,"fixed":false}}],"edges":[{"id":"e","source":"a","target":"g","targetHandle":"a","active":false,"type":"custom-edge","animated":true}]}"#;
        let circuit = Circuit::from_json(json).unwrap();
        assert_eq!(circuit.nodes[0].kind, NodeKind::Nand);
        assert_eq!(circuit.nodes[1].kind, NodeKind::And);
        assert_eq!(circuit.nodes[0].extra["draggable"], false);
        assert_eq!(circuit.edges[0].extra["type"], "custom-edge");

        let written: Value = serde_json::from_str(&circuit.to_json().unwrap()).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(written, original);
    }

    #[test]
    fn changed_kind_drops_stale_spelling() {
        let mut node = Node::with_tag("g", "gate");
        assert_eq!(node.tag(), "gate");
        node.kind = NodeKind::Or;
        assert_eq!(node.tag(), "or-gate");
        assert_eq!(Node::new("n", NodeKind::Not).tag(), "not-gate");
    }

    #[test]
    fn structure_check_reports_dangling_and_duplicates() {
        let mut circuit = sample();
        circuit.edges.push(Edge::new("e3", "ghost", "out"));
        assert!(matches!(
            circuit.check_structure(),
            Err(CircuitError::DanglingEdge { .. })
        ));

        let mut circuit = sample();
        circuit.nodes.push(Node::new("out", NodeKind::Light));
        assert_eq!(
            circuit.check_structure(),
            Err(CircuitError::DuplicateNodeId("out".to_string()))
        );
    }

    #[test]
    fn connect_rejects_unknown_endpoints() {
        let mut circuit = sample();
        assert!(circuit.connect(Edge::new("e9", "sw", "nowhere")).is_err());
        assert!(circuit.connect(Edge::new("e9", "sw", "out")).is_ok());
    }
}
