//! Structural classification of plain data types.
//!
//! Every projectable type carries a compile-time [`Shape`] through
//! [`Project::SHAPE`]. The category traits below expose the operations the
//! projection engine needs from each shape; they are implemented for the
//! standard library types in [`crate::project`] and for user types by
//! `#[derive(Project)]`.
//!
//! Nothing here runs at runtime: each predicate is a `const fn` and a type that
//! fits no category simply has no [`Project`] impl.

use serde::{Deserialize, Serialize};

use crate::Project;

/// Structural category of a type.
///
/// `Vector(n)` and `Record(n)` both describe fixed, ordered field lists; a
/// record is only a vector when it has 2 to 4 fields that are all floating
/// scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "arity", rename_all = "snake_case")]
pub enum Shape {
    Integer,
    Float,
    Bool,
    String,
    Enum,
    Optional,
    Variant,
    Sequence,
    Map,
    Wrapper,
    Vector(usize),
    Record(usize),
}

impl Shape {
    pub const fn is_integer(self) -> bool {
        matches!(self, Shape::Integer)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Shape::Float)
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Shape::Integer | Shape::Float)
    }

    pub const fn is_bool(self) -> bool {
        matches!(self, Shape::Bool)
    }

    pub const fn is_string(self) -> bool {
        matches!(self, Shape::String)
    }

    pub const fn is_enum(self) -> bool {
        matches!(self, Shape::Enum)
    }

    pub const fn is_optional(self) -> bool {
        matches!(self, Shape::Optional)
    }

    pub const fn is_variant(self) -> bool {
        matches!(self, Shape::Variant)
    }

    pub const fn is_sequence(self) -> bool {
        matches!(self, Shape::Sequence)
    }

    pub const fn is_map(self) -> bool {
        matches!(self, Shape::Map)
    }

    pub const fn is_wrapper(self) -> bool {
        matches!(self, Shape::Wrapper)
    }

    pub const fn is_vector(self) -> bool {
        matches!(self, Shape::Vector(_))
    }

    /// Generic record: a field list that did not qualify as a vector.
    pub const fn is_record(self) -> bool {
        matches!(self, Shape::Record(_))
    }

    /// Field count of a vector or record shape.
    pub const fn arity(self) -> Option<usize> {
        match self {
            Shape::Vector(n) | Shape::Record(n) => Some(n),
            _ => None,
        }
    }

    /// Scalar shapes project without recursion.
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Shape::Integer | Shape::Float | Shape::Bool | Shape::String | Shape::Enum
        )
    }
}

/// True when a field list of these shapes can be packed into a float tuple.
pub const fn vector_compatible(fields: &[Shape]) -> bool {
    if fields.len() < 2 || fields.len() > 4 {
        return false;
    }
    let mut i = 0;
    while i < fields.len() {
        if !fields[i].is_float() {
            return false;
        }
        i += 1;
    }
    true
}

/// Shape of a record with the given field shapes.
pub const fn record_shape(fields: &[Shape]) -> Shape {
    if vector_compatible(fields) {
        Shape::Vector(fields.len())
    } else {
        Shape::Record(fields.len())
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// True when every name in `wanted` appears among `members`.
pub const fn has_members(members: &[&str], wanted: &[&str]) -> bool {
    let mut w = 0;
    while w < wanted.len() {
        let mut found = false;
        let mut m = 0;
        while m < members.len() {
            if str_eq(members[m], wanted[w]) {
                found = true;
                break;
            }
            m += 1;
        }
        if !found {
            return false;
        }
        w += 1;
    }
    true
}

pub const fn shape_of<T: Project + ?Sized>() -> Shape {
    T::SHAPE
}

pub const fn is_vector_compatible<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_vector()
}

pub const fn is_record<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_record()
}

pub const fn is_wrapper<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_wrapper()
}

pub const fn is_numeric<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_numeric()
}

pub const fn is_integer<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_integer()
}

pub const fn is_float<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_float()
}

pub const fn is_bool<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_bool()
}

pub const fn is_string<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_string()
}

pub const fn is_enum<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_enum()
}

pub const fn is_optional<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_optional()
}

pub const fn is_variant<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_variant()
}

pub const fn is_sequence<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_sequence()
}

pub const fn is_map<T: Project + ?Sized>() -> bool {
    T::SHAPE.is_map()
}

// =============================================================================
// Category traits
// =============================================================================

/// Integral scalar.
pub trait IntegerLike {
    /// Wrapping conversion to the 32-bit integer of the value model.
    fn to_i32(&self) -> i32;
}

/// Floating scalar.
pub trait FloatLike {
    fn to_f32(&self) -> f32;
}

pub trait BoolLike {
    fn to_bool(&self) -> bool;
}

/// Anything that converts to owned text.
pub trait StringLike {
    fn to_text(&self) -> String;
}

/// A value that may or may not be present.
pub trait OptionalLike {
    fn is_engaged(&self) -> bool;
    fn reset(&mut self);
}

/// Receives the active alternative of a [`VariantLike`] value.
pub trait AlternativeVisitor {
    type Output;

    fn visit<T: Project + ?Sized>(self, alternative: &T) -> Self::Output;
}

/// A sum type. Exactly one alternative is active at a time.
pub trait VariantLike {
    const ALTERNATIVES: usize;

    /// Declaration index of the active alternative.
    fn active_index(&self) -> usize;

    fn visit_active<V: AlternativeVisitor>(&self, visitor: V) -> V::Output;
}

/// Sized, indexable sequence.
pub trait SequenceLike {
    type Element: Project;

    fn len(&self) -> usize;

    fn element(&self, index: usize) -> Option<&Self::Element>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Key/value container.
pub trait MapLike {
    type Key: Project;
    type Item: Project;

    /// Entries in a deterministic order.
    fn entries(&self) -> Vec<(&Self::Key, &Self::Item)>;
}

/// Closed set of named integral constants.
pub trait EnumLike {
    const NAMES: &'static [&'static str];

    /// The integral value of the constant, which is its declaration index
    /// unless the type assigns explicit discriminants.
    fn ordinal(&self) -> i32;

    fn name(&self) -> &'static str;
}

/// A single-field type that only exists to carry a distinct name.
pub trait Wrapper {
    type Inner: Project + ?Sized;

    fn inner(&self) -> &Self::Inner;
}

/// Called once per field, in declaration order, by [`Record::visit_fields`].
pub trait FieldVisitor {
    fn visit_field<T: Project + ?Sized>(&mut self, index: usize, name: &'static str, field: &T);
}

/// Fixed, ordered, heterogeneous field list.
pub trait Record {
    const FIELD_COUNT: usize;
    const FIELD_NAMES: &'static [&'static str];
    const VECTOR_COMPATIBLE: bool;

    fn visit_fields<V: FieldVisitor>(&self, visitor: &mut V);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_compatibility_needs_two_to_four_floats() {
        assert!(vector_compatible(&[Shape::Float, Shape::Float]));
        assert!(vector_compatible(&[Shape::Float; 4]));
        assert!(!vector_compatible(&[Shape::Float]));
        assert!(!vector_compatible(&[Shape::Float; 5]));
        assert!(!vector_compatible(&[Shape::Float, Shape::Integer]));
        assert!(!vector_compatible(&[]));
    }

    #[test]
    fn record_shape_falls_back_to_generic_record() {
        assert_eq!(record_shape(&[Shape::Float; 3]), Shape::Vector(3));
        assert_eq!(
            record_shape(&[Shape::Integer, Shape::String, Shape::Bool]),
            Shape::Record(3)
        );
        assert_eq!(record_shape(&[]), Shape::Record(0));
    }

    #[test]
    fn predicates_are_usable_in_const_context() {
        const FLOAT: bool = is_float::<f64>();
        const SEQ: bool = is_sequence::<Vec<i32>>();
        const VEC: bool = is_vector_compatible::<[f32; 3]>();
        const NOT_VEC: bool = is_vector_compatible::<[i32; 3]>();
        const MAP: bool = is_map::<std::collections::BTreeMap<i32, f32>>();
        assert!(FLOAT && SEQ && VEC && MAP);
        assert!(!NOT_VEC);
        assert!(is_string::<str>());
        assert!(is_optional::<Option<u8>>());
        assert!(is_numeric::<u16>() && !is_numeric::<bool>());
    }

    #[test]
    fn member_lookup_is_by_name() {
        const XY: bool = has_members(&["x", "y", "z"], &["x", "y"]);
        assert!(XY);
        assert!(!has_members(&["x", "w"], &["x", "y"]));
        assert!(!has_members(&["xx", "y"], &["x", "y"]));
        assert!(has_members(&["b", "g", "r"], &["r", "g", "b"]));
        assert!(has_members(&[], &[]));
    }

    #[test]
    fn arity_is_reported_for_field_lists() {
        assert_eq!(Shape::Vector(2).arity(), Some(2));
        assert_eq!(Shape::Record(5).arity(), Some(5));
        assert_eq!(Shape::Sequence.arity(), None);
    }

    #[test]
    fn shapes_serialize_with_arity() {
        let json = serde_json::to_value(Shape::Vector(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "category": "vector", "arity": 3 }));
        let json = serde_json::to_value(Shape::Float).unwrap();
        assert_eq!(json, serde_json::json!({ "category": "float" }));
    }
}
