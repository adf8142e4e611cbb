//! Classification of processor ports.
//!
//! A port is a record. It is a *parameter* when it has a default-constructible
//! `value` member, a *control* when it additionally exposes a [`Range`] or a
//! [`WidgetKind`], and *sample accurate* when it carries a `values` history in
//! one of the [`TimedShape`] forms. `#[derive(Port)]` computes all of this at
//! compile time into [`Port::SHAPE`]; the predicates below only read it.

mod range;
mod timed;

pub use range::{Range, RangeKind, WidgetKind};
pub use timed::{linear_block, TimedShape, TimedValue, TimedValues};

use serde::{Deserialize, Serialize};

use crate::shape::has_members;
use crate::{project, Project, Shape, Value};

/// Sub-kind of a parameter, derived from the shape of its `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "arity", rename_all = "snake_case")]
pub enum ParamKind {
    Int,
    Enum,
    Float,
    Bool,
    String,
    Vector(usize),
    Other,
}

/// Compile-time description of a port's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortShape {
    /// Shape of the `value` member, if there is one.
    pub value: Option<Shape>,
    pub range: Option<RangeKind>,
    pub widget: Option<WidgetKind>,
    /// Shape of the `values` history, if there is one.
    pub timed: Option<TimedShape>,
    /// The `value` record has `x` and `y` members.
    pub xy: bool,
    /// The `value` record has `r`, `g` and `b` members.
    pub rgb: bool,
}

impl PortShape {
    /// A record with no `value` member.
    pub const NONE: PortShape = PortShape {
        value: None,
        range: None,
        widget: None,
        timed: None,
        xy: false,
        rgb: false,
    };

    pub const fn parameter(value: Shape) -> Self {
        Self {
            value: Some(value),
            ..Self::NONE
        }
    }

    /// Records which coordinate and colour members the `value` type names.
    pub const fn with_members(self, members: &[&str]) -> Self {
        Self {
            xy: has_members(members, &["x", "y"]),
            rgb: has_members(members, &["r", "g", "b"]),
            ..self
        }
    }

    pub const fn with_range(self, range: RangeKind) -> Self {
        Self {
            range: Some(range),
            ..self
        }
    }

    pub const fn with_widget(self, widget: WidgetKind) -> Self {
        Self {
            widget: Some(widget),
            ..self
        }
    }

    pub const fn with_timed(self, timed: TimedShape) -> Self {
        Self {
            timed: Some(timed),
            ..self
        }
    }

    pub const fn is_parameter(self) -> bool {
        self.value.is_some()
    }

    pub const fn is_control(self) -> bool {
        self.is_parameter() && (self.range.is_some() || self.widget.is_some())
    }

    /// A parameter which is not a control.
    pub const fn is_value_port(self) -> bool {
        self.is_parameter() && !self.is_control()
    }

    pub const fn is_int_parameter(self) -> bool {
        matches!(self.value, Some(Shape::Integer))
    }

    /// The value is a language enumeration.
    pub const fn is_enum_parameter(self) -> bool {
        matches!(self.value, Some(Shape::Enum))
    }

    /// Enumeration, or any parameter offering a discrete value set.
    pub const fn is_enum_ish_parameter(self) -> bool {
        self.is_enum_parameter()
            || (self.is_parameter() && matches!(self.range, Some(RangeKind::Discrete)))
    }

    pub const fn is_float_parameter(self) -> bool {
        matches!(self.value, Some(Shape::Float))
    }

    pub const fn is_bool_parameter(self) -> bool {
        matches!(self.value, Some(Shape::Bool))
    }

    pub const fn is_string_parameter(self) -> bool {
        matches!(self.value, Some(Shape::String))
    }

    /// The value is a 2 to 4 float record, e.g. an xy position or an rgb colour.
    pub const fn is_vector_parameter(self) -> bool {
        matches!(self.value, Some(Shape::Vector(_)))
    }

    /// The value has `x` and `y` members, whatever their types.
    pub const fn is_xy_parameter(self) -> bool {
        self.is_parameter() && self.xy
    }

    /// The value has `r`, `g` and `b` members, whatever their types.
    pub const fn is_rgb_parameter(self) -> bool {
        self.is_parameter() && self.rgb
    }

    pub const fn is_int_control(self) -> bool {
        self.is_int_parameter() && self.is_control()
    }

    pub const fn is_enum_control(self) -> bool {
        self.is_enum_parameter() && self.is_control()
    }

    pub const fn is_float_control(self) -> bool {
        self.is_float_parameter() && self.is_control()
    }

    pub const fn is_bool_control(self) -> bool {
        self.is_bool_parameter() && self.is_control()
    }

    pub const fn is_string_control(self) -> bool {
        self.is_string_parameter() && self.is_control()
    }

    pub const fn is_int_value_port(self) -> bool {
        self.is_int_parameter() && !self.is_control()
    }

    pub const fn is_enum_value_port(self) -> bool {
        self.is_enum_parameter() && !self.is_control()
    }

    pub const fn is_float_value_port(self) -> bool {
        self.is_float_parameter() && !self.is_control()
    }

    pub const fn is_bool_value_port(self) -> bool {
        self.is_bool_parameter() && !self.is_control()
    }

    pub const fn is_string_value_port(self) -> bool {
        self.is_string_parameter() && !self.is_control()
    }

    pub const fn is_sample_accurate(self) -> bool {
        self.is_parameter() && self.timed.is_some()
    }

    pub const fn is_linear_sample_accurate(self) -> bool {
        self.is_parameter() && matches!(self.timed, Some(TimedShape::Linear))
    }

    pub const fn is_span_sample_accurate(self) -> bool {
        self.is_parameter() && matches!(self.timed, Some(TimedShape::Span))
    }

    pub const fn is_dynamic_sample_accurate(self) -> bool {
        self.is_parameter() && matches!(self.timed, Some(TimedShape::Dynamic))
    }

    pub const fn is_sample_accurate_control(self) -> bool {
        self.is_sample_accurate() && self.is_control()
    }

    pub const fn is_sample_accurate_value_port(self) -> bool {
        self.is_sample_accurate() && !self.is_control()
    }

    /// Summary sub-kind. A discrete value set makes any parameter an enum.
    pub const fn kind(self) -> Option<ParamKind> {
        if !self.is_parameter() {
            return None;
        }
        if self.is_enum_ish_parameter() {
            return Some(ParamKind::Enum);
        }
        Some(match self.value {
            Some(Shape::Integer) => ParamKind::Int,
            Some(Shape::Float) => ParamKind::Float,
            Some(Shape::Bool) => ParamKind::Bool,
            Some(Shape::String) => ParamKind::String,
            Some(Shape::Vector(n)) => ParamKind::Vector(n),
            _ => ParamKind::Other,
        })
    }

    /// True when the `value` member is numeric.
    pub const fn is_numeric_parameter(self) -> bool {
        matches!(self.value, Some(Shape::Integer | Shape::Float))
    }
}

/// A record classified by `#[derive(Port)]`.
pub trait Port {
    const NAME: &'static str;
    const SHAPE: PortShape;

    /// Range metadata, if the port declares one.
    fn range() -> Option<Range> {
        None
    }
}

/// A port with a `value` member.
///
/// The member type must be `Default` as well as [`Project`]. The derive cannot
/// see trait impls, so a `value` of any other type is a compile error rather
/// than a port that silently classifies as a non-parameter. Rename the member
/// if the record is not meant to be a parameter.
///
/// ```compile_fail
/// use portvalue_core::{Port, Project};
///
/// #[derive(Project)]
/// struct Handle {
///     id: u32,
///     name: String,
/// }
///
/// #[derive(Port)]
/// struct Output {
///     value: Handle,
/// }
/// ```
pub trait Parameter: Port {
    type Value: Default + Project;

    fn value(&self) -> &Self::Value;

    fn value_mut(&mut self) -> &mut Self::Value;

    fn project_value(&self) -> Value {
        project(self.value())
    }

    /// The range's initial value in the value model, if a range exists.
    fn init_value() -> Option<Value> {
        Self::range().and_then(|range| range.init_value(<Self::Value as Project>::SHAPE))
    }
}

/// A parameter with a per-sample `values` history.
pub trait SampleAccurate: Parameter {
    type Timed: TimedValues<Item = Self::Value>;

    fn timed(&self) -> &Self::Timed;

    fn timed_mut(&mut self) -> &mut Self::Timed;

    /// Copies the latest recorded change into `value`.
    ///
    /// Returns false, leaving `value` alone, when nothing was recorded.
    fn apply_latest(&mut self) -> bool
    where
        Self::Value: Clone,
    {
        match self.timed().latest().cloned() {
            Some(latest) => {
                *self.value_mut() = latest;
                true
            }
            None => false,
        }
    }

    /// Each recorded change projected into the value model.
    fn project_changes(&self) -> Vec<(usize, Value)> {
        self.timed()
            .changes()
            .into_iter()
            .map(|(frame, value)| (frame, project(value)))
            .collect()
    }
}

pub const fn is_parameter<T: Port + ?Sized>() -> bool {
    T::SHAPE.is_parameter()
}

pub const fn is_control<T: Port + ?Sized>() -> bool {
    T::SHAPE.is_control()
}

pub const fn is_value_port<T: Port + ?Sized>() -> bool {
    T::SHAPE.is_value_port()
}

pub const fn is_sample_accurate<T: Port + ?Sized>() -> bool {
    T::SHAPE.is_sample_accurate()
}

pub const fn is_linear_sample_accurate<T: Port + ?Sized>() -> bool {
    T::SHAPE.is_linear_sample_accurate()
}

pub const fn is_span_sample_accurate<T: Port + ?Sized>() -> bool {
    T::SHAPE.is_span_sample_accurate()
}

pub const fn is_dynamic_sample_accurate<T: Port + ?Sized>() -> bool {
    T::SHAPE.is_dynamic_sample_accurate()
}

pub const fn param_kind<T: Port + ?Sized>() -> Option<ParamKind> {
    T::SHAPE.kind()
}
