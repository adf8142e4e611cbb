//! Ports of a small demo synthesiser voice.
//!
//! Together they cover every parameter sub-kind, the three sample-accurate
//! history shapes, and records, sum types, optionals and maps as values.

use std::collections::BTreeMap;

use portvalue_core::port::linear_block;
use portvalue_core::{
    project_seeded, Parameter, Port, Project, SampleAccurate, TimedValue, TimedValues, Value,
};
use serde_json::{json, Map, Value as Json};

#[derive(Project, Default, Clone, Copy, Debug)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Saw,
    Triangle,
}

#[derive(Project, Default, Clone, Copy, Debug)]
pub struct Xy {
    pub x: f32,
    pub y: f32,
}

#[derive(Project, Default, Clone, Debug)]
pub struct Adsr {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub curve: i32,
}

#[derive(Project, Default, Clone, Debug)]
pub enum Trigger {
    #[default]
    Idle,
    Note(i32),
    Chord(Vec<i32>),
}

#[derive(Port, Default)]
#[port(range(min = 20.0, max = 20000.0, init = 440.0), widget = Knob)]
pub struct Frequency {
    pub value: f32,
}

#[derive(Port, Default)]
#[port(widget = Combobox)]
pub struct Shape {
    pub value: Waveform,
}

#[derive(Port, Default)]
#[port(range(min = 0.0, max = 1.0, init = 0.5), widget = Slider)]
pub struct Gain {
    pub value: f32,
    pub values: Vec<Option<f32>>,
}

#[derive(Port, Default)]
#[port(widget = XyPad)]
pub struct Pan {
    pub value: Xy,
}

#[derive(Port, Default)]
pub struct Envelope {
    pub value: Adsr,
}

#[derive(Port, Default)]
#[port(widget = Toggle)]
pub struct Gate {
    pub value: bool,
    pub values: Vec<TimedValue<bool>>,
}

#[derive(Port, Default)]
pub struct Note {
    pub value: i32,
    pub values: BTreeMap<usize, i32>,
}

#[derive(Port, Default)]
#[port(widget = LineEdit)]
pub struct Label {
    pub value: String,
}

#[derive(Port, Default)]
#[port(values("init", "pad", "lead"), init = 0)]
pub struct Preset {
    pub value: i32,
}

#[derive(Port, Default)]
pub struct Glide {
    pub value: Option<f32>,
}

#[derive(Port, Default)]
pub struct Retrigger {
    pub value: Trigger,
}

#[derive(Port, Default)]
pub struct Macros {
    pub value: BTreeMap<String, f32>,
}

/// One voice worth of ports, filled with a representative processing block.
#[derive(Default)]
pub struct Voice {
    pub frequency: Frequency,
    pub shape: Shape,
    pub gain: Gain,
    pub pan: Pan,
    pub envelope: Envelope,
    pub gate: Gate,
    pub note: Note,
    pub label: Label,
    pub preset: Preset,
    pub glide: Glide,
    pub retrigger: Retrigger,
    pub macros: Macros,
}

impl Voice {
    pub fn demo(block_size: usize) -> Self {
        let mut voice = Voice::default();
        voice.frequency.value = 440.0;
        voice.shape.value = Waveform::Saw;

        voice.gain.values = linear_block(block_size);
        voice.gain.values.record(0, 0.25);
        voice.gain.values.record(block_size / 2, 0.75);
        voice.gain.apply_latest();

        voice.pan.value = Xy { x: -0.5, y: 0.25 };
        voice.envelope.value = Adsr {
            attack: 0.01,
            decay: 0.2,
            sustain: 0.7,
            release: 0.5,
            curve: 2,
        };

        voice.gate.values.record(0, true);
        voice.gate.values.record(block_size.saturating_sub(1), false);
        voice.gate.apply_latest();

        voice.note.values.record(0, 60);
        voice.note.values.record(block_size / 4, 64);
        voice.note.apply_latest();

        voice.label.value = "lead voice".to_string();
        voice.preset.value = 2;
        voice.retrigger.value = Trigger::Chord(vec![60, 64, 67]);
        voice.macros.value.insert("brightness".to_string(), 0.6);
        voice.macros.value.insert("drive".to_string(), 0.1);
        voice
    }

    /// Projected value of every port, over `seed`.
    pub fn project(&self, seed: &Value) -> Json {
        let mut ports = Map::new();
        ports.insert(Frequency::NAME.into(), describe(&self.frequency, seed));
        ports.insert(Shape::NAME.into(), describe(&self.shape, seed));
        ports.insert(Gain::NAME.into(), describe_timed(&self.gain, seed));
        ports.insert(Pan::NAME.into(), describe(&self.pan, seed));
        ports.insert(Envelope::NAME.into(), describe(&self.envelope, seed));
        ports.insert(Gate::NAME.into(), describe_timed(&self.gate, seed));
        ports.insert(Note::NAME.into(), describe_timed(&self.note, seed));
        ports.insert(Label::NAME.into(), describe(&self.label, seed));
        ports.insert(Preset::NAME.into(), describe(&self.preset, seed));
        ports.insert(Glide::NAME.into(), describe(&self.glide, seed));
        ports.insert(Retrigger::NAME.into(), describe(&self.retrigger, seed));
        ports.insert(Macros::NAME.into(), describe(&self.macros, seed));
        Json::Object(ports)
    }

    /// Classification of every port type.
    pub fn classify() -> Json {
        json!([
            classify::<Frequency>(),
            classify::<Shape>(),
            classify::<Gain>(),
            classify::<Pan>(),
            classify::<Envelope>(),
            classify::<Gate>(),
            classify::<Note>(),
            classify::<Label>(),
            classify::<Preset>(),
            classify::<Glide>(),
            classify::<Retrigger>(),
            classify::<Macros>(),
        ])
    }
}

fn describe<P: Parameter>(port: &P, seed: &Value) -> Json {
    let value = project_seeded(port.value(), seed.clone());
    tracing::debug!(port = P::NAME, ?value, "projected port value");
    json!({
        "value": value,
        "init": P::init_value(),
    })
}

fn describe_timed<P: SampleAccurate>(port: &P, seed: &Value) -> Json {
    let mut description = describe(port, seed);
    let changes: Vec<Json> = port
        .project_changes()
        .into_iter()
        .map(|(frame, value)| json!({ "frame": frame, "value": value }))
        .collect();
    description["changes"] = Json::Array(changes);
    description
}

fn classify<P: Port>() -> Json {
    let shape = P::SHAPE;
    let role = if shape.is_control() {
        "control"
    } else if shape.is_value_port() {
        "value_port"
    } else {
        "record"
    };
    json!({
        "name": P::NAME,
        "role": role,
        "kind": shape.kind(),
        "shape": shape,
        "range": P::range(),
    })
}
