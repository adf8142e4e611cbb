//! Structural projection of plain Rust data into a dynamic parameter value.
//!
//! The crate converts values of statically known shapes (scalars, records,
//! tuples, sequences, optionals, sum types, enumerations, float vectors and
//! maps) into a single [`Value`] model, choosing the conversion from the
//! type's compile-time [`Shape`]. Types that fit no shape do not implement
//! [`Project`] and are rejected by the compiler.
//!
//! The [`port`] module applies the same idea to processor ports, labelling a
//! record as a value port, a control or a sample-accurate parameter.
//!
//! ```
//! use portvalue_core::{project, Project, Value};
//!
//! #[derive(Project)]
//! struct Position {
//!     x: f32,
//!     y: f32,
//! }
//!
//! #[derive(Project)]
//! struct Note {
//!     pitch: i32,
//!     name: String,
//!     on: bool,
//! }
//!
//! assert_eq!(project(&Position { x: 1.0, y: 2.0 }), Value::Vec2f([1.0, 2.0]));
//! assert_eq!(
//!     project(&Note { pitch: 1, name: "hi".into(), on: true }),
//!     Value::List(vec![Value::Int(1), Value::String("hi".into()), Value::Bool(true)]),
//! );
//! ```

extern crate self as portvalue_core;

pub mod config;
pub mod error;
pub mod port;
pub mod project;
pub mod shape;
pub mod value;

pub use config::{AppConfig, BlockConfig, OutputConfig};
pub use error::{PortValueError, Result};
pub use port::{
    Parameter, ParamKind, Port, PortShape, Range, RangeKind, SampleAccurate, TimedShape,
    TimedValue, TimedValues, WidgetKind,
};
pub use portvalue_derive::{Port, Project};
pub use project::{project, project_into, project_seeded, Project};
pub use shape::Shape;
pub use value::{Value, ValueType};
