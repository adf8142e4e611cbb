//! [`Project`] for standard library types.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use super::{
    float_tuple, project_bool, project_float, project_integer, project_map, project_optional,
    project_record, project_sequence, project_string, project_variant, Project,
};
use crate::shape::{
    record_shape, vector_compatible, AlternativeVisitor, BoolLike, FieldVisitor, FloatLike,
    IntegerLike, MapLike, OptionalLike, Record, SequenceLike, Shape, StringLike, VariantLike,
};
use crate::Value;

// =============================================================================
// Scalars
// =============================================================================

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntegerLike for $ty {
                fn to_i32(&self) -> i32 {
                    *self as i32
                }
            }

            impl Project for $ty {
                const SHAPE: Shape = Shape::Integer;

                fn project_into(&self, dst: &mut Value) {
                    project_integer(self, dst)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FloatLike for $ty {
                fn to_f32(&self) -> f32 {
                    *self as f32
                }
            }

            impl Project for $ty {
                const SHAPE: Shape = Shape::Float;

                fn project_into(&self, dst: &mut Value) {
                    project_float(self, dst)
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl BoolLike for bool {
    fn to_bool(&self) -> bool {
        *self
    }
}

impl Project for bool {
    const SHAPE: Shape = Shape::Bool;

    fn project_into(&self, dst: &mut Value) {
        project_bool(self, dst)
    }
}

macro_rules! impl_string {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StringLike for $ty {
                fn to_text(&self) -> String {
                    self.to_string()
                }
            }

            impl Project for $ty {
                const SHAPE: Shape = Shape::String;

                fn project_into(&self, dst: &mut Value) {
                    project_string(self, dst)
                }
            }
        )*
    };
}

impl_string!(str, String, char);

impl StringLike for Cow<'_, str> {
    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Project for Cow<'_, str> {
    const SHAPE: Shape = Shape::String;

    fn project_into(&self, dst: &mut Value) {
        project_string(self, dst)
    }
}

// =============================================================================
// Transparent indirection
// =============================================================================

macro_rules! impl_transparent {
    ($($ptr:ident),*) => {
        $(
            impl<T: Project + ?Sized> Project for $ptr<T> {
                const SHAPE: Shape = T::SHAPE;
                const MEMBERS: &'static [&'static str] = T::MEMBERS;

                fn project_into(&self, dst: &mut Value) {
                    (**self).project_into(dst)
                }
            }
        )*
    };
}

impl_transparent!(Box, Rc, Arc);

impl<T: Project + ?Sized> Project for &T {
    const SHAPE: Shape = T::SHAPE;
    const MEMBERS: &'static [&'static str] = T::MEMBERS;

    fn project_into(&self, dst: &mut Value) {
        (**self).project_into(dst)
    }
}

// =============================================================================
// Optional and sum types
// =============================================================================

impl<T> OptionalLike for Option<T> {
    fn is_engaged(&self) -> bool {
        self.is_some()
    }

    fn reset(&mut self) {
        *self = None;
    }
}

impl<T> Project for Option<T> {
    const SHAPE: Shape = Shape::Optional;

    fn project_into(&self, dst: &mut Value) {
        project_optional(self, dst)
    }
}

impl<T: Project, E: Project> VariantLike for Result<T, E> {
    const ALTERNATIVES: usize = 2;

    fn active_index(&self) -> usize {
        match self {
            Ok(_) => 0,
            Err(_) => 1,
        }
    }

    fn visit_active<V: AlternativeVisitor>(&self, visitor: V) -> V::Output {
        match self {
            Ok(value) => visitor.visit(value),
            Err(error) => visitor.visit(error),
        }
    }
}

impl<T: Project, E: Project> Project for Result<T, E> {
    const SHAPE: Shape = Shape::Variant;

    fn project_into(&self, dst: &mut Value) {
        project_variant(self, dst)
    }
}

// =============================================================================
// Sequences
// =============================================================================

macro_rules! impl_sequence {
    ($(impl<$t:ident> for $ty:ty;)*) => {
        $(
            impl<$t: Project> SequenceLike for $ty {
                type Element = $t;

                fn len(&self) -> usize {
                    <$ty>::len(self)
                }

                fn element(&self, index: usize) -> Option<&$t> {
                    self.get(index)
                }
            }

            impl<$t: Project> Project for $ty {
                const SHAPE: Shape = Shape::Sequence;

                fn project_into(&self, dst: &mut Value) {
                    project_sequence(self, dst)
                }
            }
        )*
    };
}

impl_sequence! {
    impl<T> for [T];
    impl<T> for Vec<T>;
    impl<T> for VecDeque<T>;
}

impl<T: Project, const N: usize> SequenceLike for [T; N] {
    type Element = T;

    fn len(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

/// Float arrays of length 2 to 4 are vectors; every other array is a sequence.
impl<T: Project, const N: usize> Project for [T; N] {
    const SHAPE: Shape = if T::SHAPE.is_float() && N >= 2 && N <= 4 {
        Shape::Vector(N)
    } else {
        Shape::Sequence
    };

    fn project_into(&self, dst: &mut Value) {
        if Self::SHAPE.is_vector() {
            if let Some(vector) = float_tuple(self.iter()) {
                *dst = vector;
                return;
            }
        }
        project_sequence(self, dst)
    }
}

// =============================================================================
// Maps
// =============================================================================

impl<K: Project, V: Project> MapLike for BTreeMap<K, V> {
    type Key = K;
    type Item = V;

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

impl<K: Project, V: Project> Project for BTreeMap<K, V> {
    const SHAPE: Shape = Shape::Map;

    fn project_into(&self, dst: &mut Value) {
        project_map(self, dst)
    }
}

/// Entries are sorted by key so the projection does not depend on hashing.
impl<K: Project + Ord, V: Project, S: BuildHasher> MapLike for HashMap<K, V, S> {
    type Key = K;
    type Item = V;

    fn entries(&self) -> Vec<(&K, &V)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<K: Project + Ord, V: Project, S: BuildHasher> Project for HashMap<K, V, S> {
    const SHAPE: Shape = Shape::Map;

    fn project_into(&self, dst: &mut Value) {
        project_map(self, dst)
    }
}

// =============================================================================
// Tuples are records with positional fields
// =============================================================================

macro_rules! impl_tuple {
    ($count:expr; $($name:ident : $idx:tt),*) => {
        impl<$($name: Project),*> Record for ($($name,)*) {
            const FIELD_COUNT: usize = $count;
            const FIELD_NAMES: &'static [&'static str] = &[$(stringify!($idx)),*];
            const VECTOR_COMPATIBLE: bool = vector_compatible(&[$(<$name as Project>::SHAPE),*]);

            #[allow(unused_variables)]
            fn visit_fields<Vis: FieldVisitor>(&self, visitor: &mut Vis) {
                $(visitor.visit_field($idx, stringify!($idx), &self.$idx);)*
            }
        }

        impl<$($name: Project),*> Project for ($($name,)*) {
            const SHAPE: Shape = record_shape(&[$(<$name as Project>::SHAPE),*]);

            fn project_into(&self, dst: &mut Value) {
                project_record(self, dst)
            }
        }
    };
}

impl_tuple!(0;);
impl_tuple!(1; A: 0);
impl_tuple!(2; A: 0, B: 1);
impl_tuple!(3; A: 0, B: 1, C: 2);
impl_tuple!(4; A: 0, B: 1, C: 2, D: 3);
impl_tuple!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tuple!(6; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_tuple!(7; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_tuple!(8; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
