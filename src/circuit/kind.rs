use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of component kinds a circuit node can have.
///
/// Kind tags are read both in their short form (`"and"`) and in the form the
/// editor writes (`"and-gate"`), and serialized in the editor's form. A tag
/// nobody recognizes is kept verbatim in [`NodeKind::Other`] so a snapshot
/// survives a load/save round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    // Sources
    Switch,
    PushButton,
    Clock,
    PowerSource,

    // Combinational
    And,
    Or,
    Not,
    Xor,
    Nand,

    // Stateful
    DLatch,

    // Relays
    Relay,
    RelayNc,

    // Sinks
    Light,
    Display,

    Other(String),
}

/// The named input terminals a node can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    A,
    B,
    Enable,
    Data,
    Control,
    Signal,
}

impl Port {
    pub fn as_str(&self) -> &'static str {
        match self {
            Port::A => "a",
            Port::B => "b",
            Port::Enable => "enable",
            Port::Data => "data",
            Port::Control => "control",
            Port::Signal => "signal",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKind {
    /// Every recognized kind, in palette order.
    pub const ALL: [NodeKind; 14] = [
        NodeKind::Switch,
        NodeKind::PushButton,
        NodeKind::Clock,
        NodeKind::PowerSource,
        NodeKind::And,
        NodeKind::Or,
        NodeKind::Not,
        NodeKind::Xor,
        NodeKind::Nand,
        NodeKind::DLatch,
        NodeKind::Relay,
        NodeKind::RelayNc,
        NodeKind::Light,
        NodeKind::Display,
    ];

    /// The short name, used for display and logs.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Switch => "switch",
            NodeKind::PushButton => "push-button",
            NodeKind::Clock => "clock",
            NodeKind::PowerSource => "power-source",
            NodeKind::And => "and",
            NodeKind::Or => "or",
            NodeKind::Not => "not",
            NodeKind::Xor => "xor",
            NodeKind::Nand => "nand",
            NodeKind::DLatch => "d-latch",
            NodeKind::Relay => "relay",
            NodeKind::RelayNc => "relay-nc",
            NodeKind::Light => "light",
            NodeKind::Display => "display",
            NodeKind::Other(tag) => tag,
        }
    }

    /// The tag the editor registers this kind under, written when serializing.
    pub fn editor_tag(&self) -> &str {
        match self {
            NodeKind::And => "and-gate",
            NodeKind::Or => "or-gate",
            NodeKind::Not => "not-gate",
            NodeKind::Xor => "xor-gate",
            NodeKind::Nand => "nand-gate",
            other => other.as_str(),
        }
    }

    /// Resolves a kind tag, accepting the editor's `*-gate` aliases.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "switch" => NodeKind::Switch,
            "push-button" => NodeKind::PushButton,
            "clock" => NodeKind::Clock,
            "power-source" => NodeKind::PowerSource,
            "and" | "and-gate" | "gate" => NodeKind::And,
            "or" | "or-gate" => NodeKind::Or,
            "not" | "not-gate" => NodeKind::Not,
            "xor" | "xor-gate" => NodeKind::Xor,
            "nand" | "nand-gate" => NodeKind::Nand,
            "d-latch" => NodeKind::DLatch,
            "relay" => NodeKind::Relay,
            "relay-nc" => NodeKind::RelayNc,
            "light" => NodeKind::Light,
            "display" => NodeKind::Display,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Source kinds are driven from outside and never recomputed.
    ///
    /// `power-source` counts as a source here even though the evaluator pins
    /// it to `true`.
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            NodeKind::Switch | NodeKind::PushButton | NodeKind::Clock | NodeKind::PowerSource
        )
    }

    /// Sources whose value the user (or a clock) sets. The evaluator skips these.
    pub fn is_driven(&self) -> bool {
        matches!(
            self,
            NodeKind::Switch | NodeKind::PushButton | NodeKind::Clock
        )
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, NodeKind::Light | NodeKind::Display)
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        NodeKind::from_tag(&tag)
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        NodeKind::from_tag(tag)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.editor_tag().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
