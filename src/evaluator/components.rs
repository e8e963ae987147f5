use super::inputs::Inputs;
use crate::circuit::{NodeKind, Port};
use ahash::AHashMap;

/// Defines the transfer function of one component kind.
///
/// `previous` is the node's own output from the last relaxation step (or
/// the last evaluation call, on the first step). Stateful kinds read it to
/// hold their value.
pub trait Component: Send + Sync {
    fn kind(&self) -> NodeKind;
    fn output(&self, inputs: &Inputs<'_>, previous: bool) -> bool;
}

/// Dispatch table from node kind to its transfer function.
#[derive(Default)]
pub struct ComponentRegistry {
    components: AHashMap<NodeKind, Box<dyn Component>>,
}

impl ComponentRegistry {
    /// A registry holding every built-in component.
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        register_default_components(&mut registry);
        registry
    }

    /// Registers a component, replacing any previous one for the same kind.
    pub fn insert(&mut self, component: Box<dyn Component>) {
        self.components.insert(component.kind(), component);
    }

    pub fn get(&self, kind: &NodeKind) -> Option<&dyn Component> {
        self.components.get(kind).map(|c| c.as_ref())
    }

    pub fn contains(&self, kind: &NodeKind) -> bool {
        self.components.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Defines the built-in components, their registration and lookup by kind.
macro_rules! define_components {
    ( $( $(#[$meta:meta])* ($struct_name:ident, $kind:expr, |$inputs:ident, $previous:ident| $body:expr) ),* $(,)? ) => {
        $(
            $(#[$meta])*
            pub struct $struct_name;
            impl Component for $struct_name {
                fn kind(&self) -> NodeKind { $kind }
                #[allow(unused_variables)]
                fn output(&self, $inputs: &Inputs<'_>, $previous: bool) -> bool { $body }
            }
        )*

        pub(super) fn register_default_components(registry: &mut ComponentRegistry) {
            $( registry.insert(Box::new($struct_name)); )*
        }

        /// The built-in component for a kind, if the kind is computed at all.
        pub fn builtin_component(kind: &NodeKind) -> Option<Box<dyn Component>> {
            $( if *kind == $kind { return Some(Box::new($struct_name)); } )*
            None
        }
    };
}

define_components! {
    /// Constant high.
    (PowerSource, NodeKind::PowerSource, |inputs, previous| true),

    /// High iff at least two wires are connected and all are high. A floating
    /// input reads low, so fewer than two wires is always low.
    (AndGate, NodeKind::And, |inputs, previous| inputs.count() >= 2 && inputs.all()),
    (OrGate, NodeKind::Or, |inputs, previous| inputs.any()),
    /// Inverts the first wire. No wire reads as a low input, so the output is high.
    (NotGate, NodeKind::Not, |inputs, previous| inputs.first().map_or(true, |v| !v)),
    /// High iff an odd number of wires are high.
    (XorGate, NodeKind::Xor, |inputs, previous| inputs.active_count() % 2 == 1),
    /// Complement of `AndGate`, including its floating-input rule.
    (NandGate, NodeKind::Nand, |inputs, previous| !(inputs.count() >= 2 && inputs.all())),

    /// Follows `data` while `enable` is high, holds otherwise.
    (DLatch, NodeKind::DLatch, |inputs, previous| {
        if inputs.port(Port::Enable) {
            inputs.port(Port::Data)
        } else {
            previous
        }
    }),

    /// Normally open: passes `signal` only while `control` is energized.
    (Relay, NodeKind::Relay, |inputs, previous| inputs.port(Port::Control) && inputs.port(Port::Signal)),
    /// Normally closed: passes `signal` only while `control` is de-energized.
    (RelayNc, NodeKind::RelayNc, |inputs, previous| !inputs.port(Port::Control) && inputs.port(Port::Signal)),

    (Light, NodeKind::Light, |inputs, previous| inputs.any()),
    (Display, NodeKind::Display, |inputs, previous| inputs.any()),
}
