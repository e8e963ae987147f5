use crate::circuit::Port;

/// The resolved input wires of one node during one relaxation step.
///
/// Each entry is the target handle the wire plugs into (if any) and the
/// current value of its source node. Wires whose source does not exist are
/// dropped before an `Inputs` is built, so they neither count nor contribute.
#[derive(Debug, Clone, Copy)]
pub struct Inputs<'a> {
    wires: &'a [(Option<&'a str>, bool)],
}

impl<'a> Inputs<'a> {
    pub fn new(wires: &'a [(Option<&'a str>, bool)]) -> Self {
        Self { wires }
    }

    /// Number of connected wires, regardless of port.
    pub fn count(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = bool> + '_ {
        self.wires.iter().map(|(_, value)| *value)
    }

    /// The value on the first connected wire.
    pub fn first(&self) -> Option<bool> {
        self.wires.first().map(|(_, value)| *value)
    }

    pub fn any(&self) -> bool {
        self.values().any(|v| v)
    }

    pub fn all(&self) -> bool {
        self.values().all(|v| v)
    }

    pub fn active_count(&self) -> usize {
        self.values().filter(|v| *v).count()
    }

    /// Wires plugged into the given port.
    pub fn port_count(&self, port: Port) -> usize {
        self.on_port(port).count()
    }

    /// OR of every wire on the port. An unconnected port reads `false`.
    pub fn port(&self, port: Port) -> bool {
        self.on_port(port).any(|v| v)
    }

    fn on_port(&self, port: Port) -> impl Iterator<Item = bool> + '_ {
        let name = port.as_str();
        self.wires
            .iter()
            .filter(move |(handle, _)| *handle == Some(name))
            .map(|(_, value)| *value)
    }
}
