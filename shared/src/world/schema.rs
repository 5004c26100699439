use std::collections::BTreeMap;

use crate::world::{
    error::MutateError,
    value::{Value, ValueKind},
};

/// The attribute contract the integrating mod supplies at configuration time:
/// which attributes exist and which value type each accepts.
///
/// The synchronization core is generic over this — it never hard-codes a
/// domain attribute set.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    attributes: BTreeMap<String, ValueKind>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an attribute. Declaring the same name twice keeps the latest
    /// kind, which lets a mod override a default during setup.
    pub fn attribute(mut self, name: &str, kind: ValueKind) -> Self {
        self.attributes.insert(name.to_string(), kind);
        self
    }

    pub fn kind_of(&self, name: &str) -> Option<ValueKind> {
        self.attributes.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Validates a single attribute change against the contract.
    pub fn check(&self, attribute: &str, value: &Value) -> Result<(), MutateError> {
        let Some(expected) = self.kind_of(attribute) else {
            return Err(MutateError::UnknownAttribute {
                attribute: attribute.to_string(),
            });
        };
        let actual = value.kind();
        if actual != expected {
            return Err(MutateError::WrongValueKind {
                attribute: attribute.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }
}
