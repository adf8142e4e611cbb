//! Projection of statically typed values into [`Value`].
//!
//! Dispatch happens entirely through trait impls: each type's [`Project`] impl
//! is chosen by the compiler from its [`Shape`], and record fields are walked
//! with a generic [`FieldVisitor`] so every field is projected by its own
//! impl. There is no runtime type inspection and no fallback impl.
//!
//! Priority when categories overlap:
//!
//! 1. 2 to 4 float fields (records, tuples, `[f32; N]`) become `Vec2f`..`Vec4f`.
//! 2. Any other record becomes a `List` of its projected fields, or `Impulse`
//!    when it has no fields.
//! 3. Single-field wrappers are unwrapped.
//! 4. Scalars (int, float, bool, string, enum ordinal) are converted directly.
//! 5. Engaged optionals become `Impulse`; absent ones leave the destination as is.
//! 6. Sum types project their active alternative.
//! 7. Sequences become a `List` of projected elements.
//! 8. Maps become a `List` of `[key, value]` pairs.

mod std_impls;

use crate::shape::{
    AlternativeVisitor, BoolLike, EnumLike, FieldVisitor, FloatLike, IntegerLike, MapLike,
    OptionalLike, Record, SequenceLike, Shape, StringLike, VariantLike, Wrapper,
};
use crate::Value;

/// A type whose shape the projection engine understands.
///
/// Implemented for the standard scalar, container and tuple types. User types
/// get an impl from `#[derive(Project)]`; hand-written impls should delegate
/// to one of the `project_*` helpers in this module.
pub trait Project {
    /// Structural category, known at compile time.
    const SHAPE: Shape;

    /// Named members of a record, in declaration order. Empty for every
    /// other shape.
    const MEMBERS: &'static [&'static str] = &[];

    /// Writes the projection of `self` into `dst`.
    ///
    /// This is an assignment, not a merge. An absent optional is the one case
    /// that leaves `dst` untouched.
    fn project_into(&self, dst: &mut Value);
}

/// Projects `value` into a fresh [`Value`].
///
/// The destination starts out as [`Value::Impulse`], which is therefore also
/// the result for an absent optional. Use [`project_seeded`] to pick another
/// outcome for that case.
pub fn project<T: Project + ?Sized>(value: &T) -> Value {
    project_seeded(value, Value::Impulse)
}

/// Projects `value` over a pre-seeded destination.
pub fn project_seeded<T: Project + ?Sized>(value: &T, seed: Value) -> Value {
    let mut dst = seed;
    project_into(value, &mut dst);
    dst
}

/// Projects `value` into an existing destination slot.
pub fn project_into<T: Project + ?Sized>(value: &T, dst: &mut Value) {
    value.project_into(dst);
}

fn project_slot<T: Project + ?Sized>(value: &T) -> Value {
    let mut slot = Value::Impulse;
    value.project_into(&mut slot);
    slot
}

// =============================================================================
// Per-category projections
// =============================================================================

pub fn project_integer<T: IntegerLike + ?Sized>(value: &T, dst: &mut Value) {
    *dst = Value::Int(value.to_i32());
}

pub fn project_float<T: FloatLike + ?Sized>(value: &T, dst: &mut Value) {
    *dst = Value::Float(value.to_f32());
}

pub fn project_bool<T: BoolLike + ?Sized>(value: &T, dst: &mut Value) {
    *dst = Value::Bool(value.to_bool());
}

pub fn project_string<T: StringLike + ?Sized>(value: &T, dst: &mut Value) {
    *dst = Value::String(value.to_text());
}

/// Enumerations project to their integral value; the symbol is dropped.
pub fn project_enum<T: EnumLike + ?Sized>(value: &T, dst: &mut Value) {
    *dst = Value::Int(value.ordinal());
}

/// Presence-only projection: the payload is never looked at.
pub fn project_optional<T: OptionalLike + ?Sized>(value: &T, dst: &mut Value) {
    if value.is_engaged() {
        *dst = Value::Impulse;
    } else {
        tracing::trace!(destination = ?dst.value_type(), "absent optional leaves destination unchanged");
    }
}

pub fn project_wrapper<T: Wrapper + ?Sized>(value: &T, dst: &mut Value) {
    value.inner().project_into(dst);
}

/// Projects the active alternative. Which alternative it was is not recorded.
pub fn project_variant<T: VariantLike + ?Sized>(value: &T, dst: &mut Value) {
    value.visit_active(IntoSlot { dst });
}

pub fn project_sequence<T: SequenceLike + ?Sized>(value: &T, dst: &mut Value) {
    let items = (0..value.len())
        .filter_map(|index| value.element(index))
        .map(project_slot)
        .collect();
    *dst = Value::List(items);
}

/// Maps become a list of two-element `[key, value]` lists.
pub fn project_map<T: MapLike + ?Sized>(value: &T, dst: &mut Value) {
    let pairs = value
        .entries()
        .into_iter()
        .map(|(key, item)| Value::List(vec![project_slot(key), project_slot(item)]))
        .collect();
    *dst = Value::List(pairs);
}

/// Records become a float tuple when vector compatible, `Impulse` when empty
/// and a list of their projected fields otherwise.
pub fn project_record<T: Record + ?Sized>(value: &T, dst: &mut Value) {
    if T::VECTOR_COMPATIBLE {
        let mut walker = ComponentWalker::default();
        value.visit_fields(&mut walker);
        if let Some(vector) = walker.finish() {
            *dst = vector;
            return;
        }
    }

    if T::FIELD_COUNT == 0 {
        *dst = Value::Impulse;
        return;
    }

    let mut walker = SlotWalker::with_capacity(T::FIELD_COUNT);
    value.visit_fields(&mut walker);
    *dst = Value::List(walker.slots);
}

/// Packs float sequences of arity 2 to 4 into a tuple value.
pub(crate) fn float_tuple<'a, T, I>(elements: I) -> Option<Value>
where
    T: Project + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut walker = ComponentWalker::default();
    for (index, element) in elements.into_iter().enumerate() {
        walker.visit_field(index, "", element);
    }
    walker.finish()
}

struct IntoSlot<'a> {
    dst: &'a mut Value,
}

impl AlternativeVisitor for IntoSlot<'_> {
    type Output = ();

    fn visit<T: Project + ?Sized>(self, alternative: &T) {
        alternative.project_into(self.dst);
    }
}

/// Projects each field into its own list slot.
struct SlotWalker {
    slots: Vec<Value>,
}

impl SlotWalker {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }
}

impl FieldVisitor for SlotWalker {
    fn visit_field<T: Project + ?Sized>(&mut self, index: usize, _name: &'static str, field: &T) {
        debug_assert_eq!(index, self.slots.len());
        self.slots.push(project_slot(field));
    }
}

#[derive(Default)]
struct ComponentWalker {
    components: [f32; 4],
    len: usize,
    rejected: bool,
}

impl ComponentWalker {
    fn finish(self) -> Option<Value> {
        if self.rejected {
            return None;
        }
        Value::from_components(&self.components[..self.len])
    }
}

/// Components are read from each field's own projection, so any impl whose
/// shape is `Float` contributes exactly what it projects to.
impl FieldVisitor for ComponentWalker {
    fn visit_field<T: Project + ?Sized>(&mut self, _index: usize, _name: &'static str, field: &T) {
        if self.rejected {
            return;
        }
        match project_slot(field) {
            Value::Float(component) if self.len < self.components.len() => {
                self.components[self.len] = component;
                self.len += 1;
            }
            _ => self.rejected = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: f32,
        y: f64,
    }

    impl Record for Point {
        const FIELD_COUNT: usize = 2;
        const FIELD_NAMES: &'static [&'static str] = &["x", "y"];
        const VECTOR_COMPATIBLE: bool =
            crate::shape::vector_compatible(&[<f32 as Project>::SHAPE, <f64 as Project>::SHAPE]);

        fn visit_fields<V: FieldVisitor>(&self, visitor: &mut V) {
            visitor.visit_field(0, "x", &self.x);
            visitor.visit_field(1, "y", &self.y);
        }
    }

    impl Project for Point {
        const SHAPE: Shape = crate::shape::record_shape(&[Shape::Float, Shape::Float]);

        fn project_into(&self, dst: &mut Value) {
            project_record(self, dst)
        }
    }

    struct Labelled {
        id: u8,
        label: &'static str,
        on: bool,
    }

    impl Record for Labelled {
        const FIELD_COUNT: usize = 3;
        const FIELD_NAMES: &'static [&'static str] = &["id", "label", "on"];
        const VECTOR_COMPATIBLE: bool = false;

        fn visit_fields<V: FieldVisitor>(&self, visitor: &mut V) {
            visitor.visit_field(0, "id", &self.id);
            visitor.visit_field(1, "label", &self.label);
            visitor.visit_field(2, "on", &self.on);
        }
    }

    impl Project for Labelled {
        const SHAPE: Shape = Shape::Record(3);

        fn project_into(&self, dst: &mut Value) {
            project_record(self, dst)
        }
    }

    #[test]
    fn hand_written_vector_record() {
        let value = project(&Point { x: 1.0, y: 2.0 });
        assert_eq!(value, Value::Vec2f([1.0, 2.0]));
    }

    #[test]
    fn hand_written_generic_record() {
        let value = project(&Labelled {
            id: 1,
            label: "hi",
            on: true,
        });
        assert_eq!(
            value,
            Value::List(vec![
                Value::Int(1),
                Value::String("hi".into()),
                Value::Bool(true)
            ])
        );
    }

    #[test]
    fn absent_optional_keeps_seed() {
        let absent: Option<f32> = None;
        assert_eq!(
            project_seeded(&absent, Value::String("sentinel".into())),
            Value::String("sentinel".into())
        );

        let mut dst = Value::Int(0);
        project_into(&absent, &mut dst);
        assert_eq!(dst, Value::Int(0));
    }

    #[test]
    fn engaged_optional_discards_payload() {
        let mut dst = Value::Int(7);
        project_into(&Some(3.14_f32), &mut dst);
        assert_eq!(dst, Value::Impulse);
    }

    #[test]
    fn projection_overwrites_destination() {
        let mut dst = Value::List(vec![Value::Int(1)]);
        project_into(&2.5_f64, &mut dst);
        assert_eq!(dst, Value::Float(2.5));
    }

    struct Decibels(f32);

    impl FloatLike for Decibels {
        fn to_f32(&self) -> f32 {
            self.0
        }
    }

    impl Project for Decibels {
        const SHAPE: Shape = Shape::Float;

        fn project_into(&self, dst: &mut Value) {
            project_float(self, dst)
        }
    }

    #[test]
    fn hand_written_floats_are_vector_components() {
        assert_eq!(<[Decibels; 2] as Project>::SHAPE, Shape::Vector(2));
        assert_eq!(
            project(&[Decibels(-6.0), Decibels(0.5)]),
            Value::Vec2f([-6.0, 0.5])
        );
        assert_eq!(
            project(&(Decibels(1.0), 2.0_f32, Decibels(3.0))),
            Value::Vec3f([1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn float_tuple_rejects_other_arities() {
        assert_eq!(float_tuple(&[1.0_f32]), None);
        assert_eq!(
            float_tuple(&[1.0_f32, 2.0, 3.0]),
            Some(Value::Vec3f([1.0, 2.0, 3.0]))
        );
        assert_eq!(float_tuple(&[1_i32, 2]), None);
    }
}
