//! Game variable store backing the cycle-length overrides.

use std::collections::BTreeMap;

use tpb_core::{VariableId, VariableOracle};

/// A single game variable.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Number(f64),
    Text(String),
}

impl VariableValue {
    /// Numeric view; text and non-finite numbers read as 0.
    pub fn as_number(&self) -> f64 {
        match self {
            VariableValue::Number(value) if value.is_finite() => *value,
            VariableValue::Number(_) | VariableValue::Text(_) => 0.0,
        }
    }
}

impl From<f64> for VariableValue {
    fn from(value: f64) -> Self {
        VariableValue::Number(value)
    }
}

impl From<i32> for VariableValue {
    fn from(value: i32) -> Self {
        VariableValue::Number(f64::from(value))
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Text(value.to_owned())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::Text(value)
    }
}

/// Mutable variable store; unset variables read as 0.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameVariables {
    values: BTreeMap<u32, VariableValue>,
}

impl GameVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: VariableId, value: impl Into<VariableValue>) {
        self.values.insert(id.0, value.into());
    }

    pub fn get(&self, id: VariableId) -> Option<&VariableValue> {
        self.values.get(&id.0)
    }

    pub fn clear(&mut self, id: VariableId) -> Option<VariableValue> {
        self.values.remove(&id.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableOracle for GameVariables {
    fn value(&self, id: VariableId) -> f64 {
        self.get(id).map_or(0.0, VariableValue::as_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_and_text_read_as_zero() {
        let mut vars = GameVariables::new();
        assert_eq!(vars.value(VariableId(1)), 0.0);

        vars.set(VariableId(1), "fast");
        assert_eq!(vars.value(VariableId(1)), 0.0);

        vars.set(VariableId(1), 120);
        assert_eq!(vars.value(VariableId(1)), 120.0);

        vars.set(VariableId(2), f64::NAN);
        assert_eq!(vars.value(VariableId(2)), 0.0);

        assert_eq!(vars.clear(VariableId(1)), Some(VariableValue::Number(120.0)));
        assert_eq!(vars.value(VariableId(1)), 0.0);
    }
}
