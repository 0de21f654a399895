pub mod field;

pub use field::{FieldDefinition, FieldType, FilterMode, TransformKind};

/// Notifications produced by a bound input as the user edits it.
///
/// Handlers return these in the order the edits happened so the host can
/// replay them against whatever state it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A commit accepted a new value (already passed through the transform)
    ValueChanged(String),
}

impl Effect {
    /// The committed value carried by a `ValueChanged` notification.
    pub fn value(&self) -> &str {
        match self {
            Effect::ValueChanged(value) => value,
        }
    }
}
