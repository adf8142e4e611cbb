//! The dynamic value model every projection writes into.
//!
//! [`Value`] is the exact set of variants the downstream automation layer
//! accepts. A projection always replaces a destination wholesale; the only
//! exception is an absent optional, which leaves it alone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PortValueError, Result};

/// A dynamically typed parameter value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// Zero-payload marker: "something happened". Also the value of an
    /// empty record and of an engaged optional.
    #[default]
    Impulse,
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
    Vec2f([f32; 2]),
    Vec3f([f32; 3]),
    Vec4f([f32; 4]),
    List(Vec<Value>),
}

/// Variant tag of a [`Value`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Impulse,
    Int,
    Float,
    Bool,
    String,
    Vec2f,
    Vec3f,
    Vec4f,
    List,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Impulse => "impulse",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::String => "string",
            ValueType::Vec2f => "vec2f",
            ValueType::Vec3f => "vec3f",
            ValueType::Vec4f => "vec4f",
            ValueType::List => "list",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Impulse => ValueType::Impulse,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Bool(_) => ValueType::Bool,
            Value::String(_) => ValueType::String,
            Value::Vec2f(_) => ValueType::Vec2f,
            Value::Vec3f(_) => ValueType::Vec3f,
            Value::Vec4f(_) => ValueType::Vec4f,
            Value::List(_) => ValueType::List,
        }
    }

    pub fn is_impulse(&self) -> bool {
        matches!(self, Value::Impulse)
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Components of a fixed float tuple, whatever its arity.
    pub fn as_components(&self) -> Option<&[f32]> {
        match self {
            Value::Vec2f(v) => Some(v),
            Value::Vec3f(v) => Some(v),
            Value::Vec4f(v) => Some(v),
            _ => None,
        }
    }

    /// Builds the fixed tuple variant matching `components.len()`.
    ///
    /// Returns `None` for any arity other than 2, 3 or 4.
    pub fn from_components(components: &[f32]) -> Option<Self> {
        match *components {
            [x, y] => Some(Value::Vec2f([x, y])),
            [x, y, z] => Some(Value::Vec3f([x, y, z])),
            [x, y, z, w] => Some(Value::Vec4f([x, y, z, w])),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<[f32; 2]> for Value {
    fn from(value: [f32; 2]) -> Self {
        Value::Vec2f(value)
    }
}

impl From<[f32; 3]> for Value {
    fn from(value: [f32; 3]) -> Self {
        Value::Vec3f(value)
    }
}

impl From<[f32; 4]> for Value {
    fn from(value: [f32; 4]) -> Self {
        Value::Vec4f(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

macro_rules! impl_try_from_value {
    ($target:ty, $variant:ident) => {
        impl TryFrom<Value> for $target {
            type Error = PortValueError;

            fn try_from(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(PortValueError::mismatch(
                        ValueType::$variant,
                        other.value_type(),
                    )),
                }
            }
        }
    };
}

impl_try_from_value!(i32, Int);
impl_try_from_value!(f32, Float);
impl_try_from_value!(bool, Bool);
impl_try_from_value!(String, String);
impl_try_from_value!([f32; 2], Vec2f);
impl_try_from_value!([f32; 3], Vec3f);
impl_try_from_value!([f32; 4], Vec4f);
impl_try_from_value!(Vec<Value>, List);
