//! Strategy parameter metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic type of a strategy parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Integer,
    Float,
    Bool,
    /// Wall-clock time written as `HH:MM`
    Time,
    String,
}

/// Describes one configurable parameter.
///
/// Purely descriptive: used for validation messages and UI hints, it has no
/// effect on evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParameter {
    pub name: String,
    pub param_type: ParameterType,
    pub default: Value,
    pub min: Option<Value>,
    pub max: Option<Value>,
    pub description: String,
}

impl StrategyParameter {
    pub fn new(
        name: impl Into<String>,
        param_type: ParameterType,
        default: impl Into<Value>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            default: default.into(),
            min: None,
            max: None,
            description: description.into(),
        }
    }

    /// Set the inclusive bounds.
    pub fn with_range(mut self, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self.max = Some(max.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_builder() {
        let param = StrategyParameter::new("period", ParameterType::Integer, 14, "RSI lookback")
            .with_range(2, 100);

        assert_eq!(param.default, Value::from(14));
        assert_eq!(param.min, Some(Value::from(2)));
        assert_eq!(param.max, Some(Value::from(100)));
    }

    #[test]
    fn test_parameter_type_serializes_lowercase() {
        let json = serde_json::to_string(&ParameterType::Time).unwrap();
        assert_eq!(json, "\"time\"");
    }
}
