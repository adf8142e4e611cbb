use std::collections::BTreeMap;

use portvalue_core::port::{self, linear_block};
use portvalue_core::{
    Parameter, ParamKind, Port, Project, Range, RangeKind, SampleAccurate, TimedShape, TimedValue,
    TimedValues, Value, WidgetKind,
};

#[derive(Port, Default)]
struct Level {
    value: f32,
}

#[derive(Port, Default)]
#[port(range(min = 20.0, max = 20000.0, init = 440.0))]
struct Cutoff {
    value: f32,
}

#[derive(Port, Default)]
#[port(widget = Toggle, name = "Bypass")]
struct Bypass {
    value: bool,
}

#[derive(Port, Default)]
#[port(range(min = -12, max = 12, init = 0), widget = Spinbox)]
struct Transpose {
    value: i32,
}

#[derive(Port, Default)]
#[port(values("sine", "square", "saw"), init = 1)]
struct Shape {
    value: i32,
}

#[derive(Project, Default, Clone, Copy, PartialEq, Debug)]
enum Mode {
    #[default]
    Mono,
    Poly,
}

#[derive(Port, Default)]
struct VoiceMode {
    value: Mode,
}

#[derive(Port, Default)]
#[port(widget = LineEdit)]
struct Title {
    value: String,
}

#[derive(Project, Default, Clone, Copy, PartialEq, Debug)]
struct Xy {
    x: f32,
    y: f32,
}

#[derive(Port, Default)]
#[port(widget = XyPad)]
struct Pan {
    value: Xy,
}

#[derive(Project, Default)]
struct Cell {
    x: i32,
    y: i32,
}

#[derive(Port, Default)]
struct Grid {
    value: Cell,
}

#[derive(Project, Default)]
struct Rgb {
    r: f32,
    g: f32,
    b: f32,
}

#[derive(Port, Default)]
#[port(widget = Color)]
struct Tint {
    value: Rgb,
}

#[derive(Project, Default)]
struct Uvw {
    u: f32,
    v: f32,
    w: f32,
}

#[derive(Port, Default)]
struct Texel {
    value: Uvw,
}

#[derive(Port)]
struct Gate {
    value: f32,
    values: Vec<Option<f32>>,
}

#[derive(Port, Default)]
#[port(range(min = 0.0, max = 1.0, init = 0.5))]
struct Velocity {
    value: f32,
    values: Vec<TimedValue<f32>>,
}

#[derive(Port, Default)]
struct Pitch {
    value: i32,
    values: BTreeMap<usize, i32>,
}

#[derive(Port)]
#[port(widget = Knob)]
#[allow(dead_code)]
struct Display {
    text: String,
}

#[test]
fn bare_value_is_a_value_port() {
    const SHAPE: portvalue_core::PortShape = <Level as Port>::SHAPE;
    assert!(SHAPE.is_parameter());
    assert!(SHAPE.is_float_value_port());
    assert!(port::is_value_port::<Level>());
    assert!(!port::is_control::<Level>());
    assert_eq!(port::param_kind::<Level>(), Some(ParamKind::Float));
    assert_eq!(Level::range(), None);
    assert_eq!(<Level as Port>::NAME, "Level");
}

#[test]
fn range_makes_a_float_control() {
    assert!(<Cutoff as Port>::SHAPE.is_float_control());
    assert_eq!(<Cutoff as Port>::SHAPE.range, Some(RangeKind::Continuous));
    assert_eq!(
        Cutoff::range(),
        Some(Range::Continuous {
            min: 20.0,
            max: 20000.0,
            init: 440.0
        })
    );
    assert_eq!(Cutoff::init_value(), Some(Value::Float(440.0)));
    assert!(Cutoff::range().unwrap().validate().is_ok());
}

#[test]
fn widget_alone_makes_a_control() {
    assert!(<Bypass as Port>::SHAPE.is_bool_control());
    assert_eq!(<Bypass as Port>::SHAPE.widget, Some(WidgetKind::Toggle));
    assert_eq!(<Bypass as Port>::NAME, "Bypass");
    assert_eq!(Bypass::init_value(), None);
}

#[test]
fn negative_integer_range() {
    assert!(<Transpose as Port>::SHAPE.is_int_control());
    assert_eq!(
        Transpose::range(),
        Some(Range::Continuous {
            min: -12.0,
            max: 12.0,
            init: 0.0
        })
    );
    assert_eq!(Transpose::init_value(), Some(Value::Int(0)));
}

#[test]
fn discrete_values_make_an_enum_control() {
    let shape = <Shape as Port>::SHAPE;
    assert!(shape.is_int_parameter());
    assert!(shape.is_enum_ish_parameter());
    assert!(!shape.is_enum_parameter());
    assert!(shape.is_control());
    assert_eq!(shape.kind(), Some(ParamKind::Enum));
    assert_eq!(Shape::init_value(), Some(Value::String("square".into())));
    match Shape::range() {
        Some(Range::Discrete { values, init }) => {
            assert_eq!(values.len(), 3);
            assert_eq!(init, 1);
        }
        other => panic!("expected a discrete range, got {other:?}"),
    }
}

#[test]
fn enumeration_values_are_enum_value_ports() {
    assert!(<VoiceMode as Port>::SHAPE.is_enum_value_port());
    let mut port = VoiceMode::default();
    *port.value_mut() = Mode::Poly;
    assert_eq!(port.project_value(), Value::Int(1));
}

#[test]
fn string_and_vector_parameters() {
    assert!(<Title as Port>::SHAPE.is_string_control());
    assert_eq!(port::param_kind::<Pan>(), Some(ParamKind::Vector(2)));
    assert!(<Pan as Port>::SHAPE.is_vector_parameter());

    let pan = Pan {
        value: Xy { x: -1.0, y: 0.5 },
    };
    assert_eq!(pan.project_value(), Value::Vec2f([-1.0, 0.5]));
}

#[test]
fn coordinate_and_colour_parameters_are_found_by_member_name() {
    assert!(<Grid as Port>::SHAPE.is_xy_parameter());
    assert!(!<Grid as Port>::SHAPE.is_vector_parameter());
    assert!(<Pan as Port>::SHAPE.is_xy_parameter());

    assert!(<Tint as Port>::SHAPE.is_rgb_parameter());
    assert!(<Tint as Port>::SHAPE.is_vector_parameter());
    assert!(!<Tint as Port>::SHAPE.is_xy_parameter());

    assert!(<Texel as Port>::SHAPE.is_vector_parameter());
    assert!(!<Texel as Port>::SHAPE.is_rgb_parameter());
    assert!(!<Level as Port>::SHAPE.is_xy_parameter());
}

#[test]
fn linear_sample_accurate_parameter() {
    assert!(port::is_linear_sample_accurate::<Gate>());
    assert!(!port::is_span_sample_accurate::<Gate>());
    assert!(<Gate as Port>::SHAPE.is_sample_accurate_value_port());

    let mut gate = Gate {
        value: 0.0,
        values: linear_block(16),
    };
    gate.timed_mut().record(5, 123.0);
    gate.timed_mut().record(9, 0.5);
    assert_eq!(
        gate.project_changes(),
        vec![(5, Value::Float(123.0)), (9, Value::Float(0.5))]
    );
    assert!(gate.apply_latest());
    assert_eq!(*gate.value(), 0.5);
}

#[test]
fn span_sample_accurate_control() {
    assert!(port::is_span_sample_accurate::<Velocity>());
    assert!(<Velocity as Port>::SHAPE.is_sample_accurate_control());
    assert_eq!(<Velocity as Port>::SHAPE.timed, Some(TimedShape::Span));

    let mut velocity = Velocity::default();
    assert!(!velocity.apply_latest());
    velocity.timed_mut().record(3, 0.9);
    velocity.timed_mut().record(1, 0.1);
    assert!(velocity.apply_latest());
    assert_eq!(velocity.value, 0.9);
}

#[test]
fn span_filled_by_push_applies_the_highest_frame() {
    let mut velocity = Velocity::default();
    velocity.values.push(TimedValue::new(9, 0.9));
    velocity.values.push(TimedValue::new(2, 0.2));
    assert_eq!(
        velocity.project_changes(),
        vec![(2, Value::Float(0.2)), (9, Value::Float(0.9))]
    );
    assert!(velocity.apply_latest());
    assert_eq!(velocity.value, 0.9);
}

#[test]
fn dynamic_sample_accurate_parameter() {
    assert!(port::is_dynamic_sample_accurate::<Pitch>());
    assert!(port::is_sample_accurate::<Pitch>());

    let mut pitch = Pitch::default();
    pitch.values.insert(12, 64);
    pitch.values.insert(4, 60);
    assert_eq!(
        pitch.project_changes(),
        vec![(4, Value::Int(60)), (12, Value::Int(64))]
    );
    assert!(pitch.apply_latest());
    assert_eq!(pitch.value, 64);
}

#[test]
fn records_without_value_are_not_parameters() {
    assert!(!port::is_parameter::<Display>());
    assert!(!port::is_control::<Display>());
    assert_eq!(port::param_kind::<Display>(), None);
    assert_eq!(<Display as Port>::SHAPE.widget, Some(WidgetKind::Knob));
}
