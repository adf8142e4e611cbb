use serde::{Deserialize, Serialize};

use crate::{PortValueError, Result, Shape, Value};

/// Permissible input range of a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Range {
    /// Continuous interval with an initial value.
    Continuous { min: f64, max: f64, init: f64 },
    /// Explicit value set; `init` indexes into `values`.
    Discrete { values: Vec<Value>, init: usize },
}

/// Which form of [`Range`] a port exposes, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    Continuous,
    Discrete,
}

/// Widget hint attached to a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Slider,
    Knob,
    Spinbox,
    Toggle,
    Button,
    Combobox,
    LineEdit,
    XyPad,
    Color,
    Bargraph,
}

impl Range {
    pub fn kind(&self) -> RangeKind {
        match self {
            Range::Continuous { .. } => RangeKind::Continuous,
            Range::Discrete { .. } => RangeKind::Discrete,
        }
    }

    /// Checks bounds ordering and that `init` lies inside the range.
    pub fn validate(&self) -> Result<()> {
        match self {
            Range::Continuous { min, max, init } => {
                if !(min <= max) {
                    return Err(PortValueError::InvalidRange(format!(
                        "min {min} is greater than max {max}"
                    )));
                }
                if !(min <= init && init <= max) {
                    return Err(PortValueError::InvalidRange(format!(
                        "init {init} lies outside [{min}, {max}]"
                    )));
                }
                Ok(())
            }
            Range::Discrete { values, init } => {
                if values.is_empty() {
                    return Err(PortValueError::InvalidRange(
                        "discrete range has no values".to_string(),
                    ));
                }
                if *init >= values.len() {
                    return Err(PortValueError::InvalidRange(format!(
                        "init index {init} is out of bounds for {} values",
                        values.len()
                    )));
                }
                Ok(())
            }
        }
    }

    /// Initial value, typed after the shape of the port's `value` member.
    pub fn init_value(&self, shape: Shape) -> Option<Value> {
        match self {
            Range::Continuous { init, .. } => Some(match shape {
                Shape::Integer | Shape::Enum => Value::Int(*init as i32),
                Shape::Bool => Value::Bool(*init != 0.0),
                _ => Value::Float(*init as f32),
            }),
            Range::Discrete { values, init } => values.get(*init).cloned(),
        }
    }

    /// Clamps `value` into a continuous range. Discrete ranges return it as is.
    pub fn clamp(&self, value: f64) -> f64 {
        match self {
            Range::Continuous { min, max, .. } => value.clamp(*min, *max),
            Range::Discrete { .. } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_range_validation() {
        let range = Range::Continuous {
            min: 0.0,
            max: 1.0,
            init: 0.25,
        };
        assert!(range.validate().is_ok());
        assert_eq!(range.kind(), RangeKind::Continuous);

        let inverted = Range::Continuous {
            min: 2.0,
            max: 1.0,
            init: 1.5,
        };
        assert!(matches!(
            inverted.validate(),
            Err(PortValueError::InvalidRange(_))
        ));

        let outside = Range::Continuous {
            min: 0.0,
            max: 1.0,
            init: 3.0,
        };
        let err = outside.validate().unwrap_err();
        assert!(format!("{err}").contains("outside"));
    }

    #[test]
    fn discrete_range_validation() {
        let range = Range::Discrete {
            values: vec!["sine".into(), "saw".into()],
            init: 1,
        };
        assert!(range.validate().is_ok());
        assert_eq!(range.init_value(Shape::Integer), Some(Value::String("saw".into())));

        let empty = Range::Discrete {
            values: vec![],
            init: 0,
        };
        assert!(empty.validate().is_err());

        let out_of_bounds = Range::Discrete {
            values: vec![Value::Int(1)],
            init: 1,
        };
        assert!(out_of_bounds.validate().is_err());
        assert_eq!(out_of_bounds.init_value(Shape::Integer), None);
    }

    #[test]
    fn init_value_follows_value_shape() {
        let range = Range::Continuous {
            min: 0.0,
            max: 10.0,
            init: 4.0,
        };
        assert_eq!(range.init_value(Shape::Integer), Some(Value::Int(4)));
        assert_eq!(range.init_value(Shape::Float), Some(Value::Float(4.0)));
        assert_eq!(range.init_value(Shape::Bool), Some(Value::Bool(true)));
        assert_eq!(range.clamp(12.0), 10.0);
    }
}
