// SPDX-License-Identifier: MIT OR Apache-2.0
//! Value kinds and the conversion rules between them.

use serde::{Deserialize, Serialize};

/// Semantic type of the data flowing through a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// RGBA color
    Color,
    /// Single float
    Scalar,
    /// 2D texture coordinates
    Uv,
    /// Surface normal (3 components, never reinterpreted)
    Normal,
    /// Generic 4D vector
    Vector,
    /// Emissive RGBA color
    Emission,
}

/// Static description of a value kind.
#[derive(Debug)]
pub struct KindDef {
    /// Display name
    pub name: &'static str,
    /// Number of meaningful components
    pub component_count: usize,
    /// Per-component labels, used for split pins
    pub component_names: &'static [&'static str],
    /// Whether an output of this kind can be split into channels
    pub splittable: bool,
    /// Whether this kind can be promoted back into a composite
    pub promotable: bool,
    /// Kinds an output of this kind may feed without an exact match
    pub compatible: &'static [ValueKind],
}

const COLOR_DEF: KindDef = KindDef {
    name: "Color",
    component_count: 4,
    component_names: &["R", "G", "B", "A"],
    splittable: true,
    promotable: false,
    compatible: &[ValueKind::Scalar, ValueKind::Vector, ValueKind::Emission],
};

const SCALAR_DEF: KindDef = KindDef {
    name: "Scalar",
    component_count: 1,
    component_names: &["Value"],
    splittable: false,
    promotable: true,
    compatible: &[ValueKind::Color, ValueKind::Vector],
};

const UV_DEF: KindDef = KindDef {
    name: "UV",
    component_count: 2,
    component_names: &["U", "V"],
    splittable: true,
    promotable: false,
    compatible: &[ValueKind::Vector],
};

const NORMAL_DEF: KindDef = KindDef {
    name: "Normal",
    component_count: 3,
    component_names: &["X", "Y", "Z"],
    splittable: true,
    promotable: false,
    // Normal data must match exactly; it is never reinterpreted as a
    // generic vector.
    compatible: &[],
};

const VECTOR_DEF: KindDef = KindDef {
    name: "Vector",
    component_count: 4,
    component_names: &["X", "Y", "Z", "W"],
    splittable: true,
    promotable: false,
    compatible: &[ValueKind::Color, ValueKind::Scalar, ValueKind::Uv],
};

const EMISSION_DEF: KindDef = KindDef {
    name: "Emission",
    component_count: 4,
    component_names: &["R", "G", "B", "A"],
    splittable: true,
    promotable: false,
    compatible: &[ValueKind::Color],
};

impl ValueKind {
    /// All registered kinds.
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Color,
        ValueKind::Scalar,
        ValueKind::Uv,
        ValueKind::Normal,
        ValueKind::Vector,
        ValueKind::Emission,
    ];

    /// Get the static definition for this kind.
    pub fn definition(self) -> &'static KindDef {
        match self {
            Self::Color => &COLOR_DEF,
            Self::Scalar => &SCALAR_DEF,
            Self::Uv => &UV_DEF,
            Self::Normal => &NORMAL_DEF,
            Self::Vector => &VECTOR_DEF,
            Self::Emission => &EMISSION_DEF,
        }
    }

    /// Check whether an output of this kind may feed an input of `input`.
    ///
    /// Compatibility is reflexive but otherwise directional: it follows
    /// this kind's declared target set, not the reverse.
    pub fn compatible_with(self, input: ValueKind) -> bool {
        self == input || self.definition().compatible.contains(&input)
    }

    /// Default value carried by an unconnected pin of this kind.
    pub fn default_value(self) -> Value {
        match self {
            Self::Color => Value::Vec4([0.5, 0.5, 0.5, 1.0]),
            Self::Scalar => Value::Scalar(0.5),
            Self::Uv => Value::Vec2([0.0, 0.0]),
            Self::Normal => Value::Vec4([0.0, 0.0, 1.0, 0.0]),
            Self::Vector => Value::Vec4([0.0, 0.0, 0.0, 0.0]),
            Self::Emission => Value::Vec4([0.0, 0.0, 0.0, 1.0]),
        }
    }
}

/// A value produced during graph evaluation, in one of the three
/// canonical shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Single float
    Scalar(f32),
    /// Two components (UV)
    Vec2([f32; 2]),
    /// Four components (color, vector, normal, emission)
    Vec4([f32; 4]),
}

impl Value {
    /// The scalar payload, if this is a scalar.
    pub fn as_scalar(self) -> Option<f32> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The two-component payload, if this is a `Vec2`.
    pub fn as_vec2(self) -> Option<[f32; 2]> {
        match self {
            Self::Vec2(v) => Some(v),
            _ => None,
        }
    }

    /// The four-component payload, if this is a `Vec4`.
    pub fn as_vec4(self) -> Option<[f32; 4]> {
        match self {
            Self::Vec4(v) => Some(v),
            _ => None,
        }
    }

    /// Widen to four components. A bare scalar is broadcast into every
    /// component; a `Vec2` is zero-extended.
    pub fn broadcast4(self) -> [f32; 4] {
        match self {
            Self::Scalar(s) => [s, s, s, s],
            Self::Vec2([x, y]) => [x, y, 0.0, 0.0],
            Self::Vec4(v) => v,
        }
    }

    fn component(self, index: usize) -> Option<f32> {
        match self {
            Self::Scalar(s) => (index == 0).then_some(s),
            Self::Vec2(v) => v.get(index).copied(),
            Self::Vec4(v) => v.get(index).copied(),
        }
    }
}

/// Component index outside the kind's declared shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("component index {index} out of range for {kind:?}")]
pub struct ComponentOutOfRange {
    /// Kind the component was requested from
    pub kind: ValueKind,
    /// The offending index
    pub index: usize,
}

/// Convert `value` from one kind to another.
///
/// Identity when the kinds are equal, otherwise the first matching directed
/// converter, otherwise the source kind's default converter. Conversion never
/// fails: when nothing applies the value passes through unchanged.
pub fn convert(value: Value, from: ValueKind, to: ValueKind) -> Value {
    if from == to {
        return value;
    }

    match (from, to) {
        (ValueKind::Scalar, ValueKind::Color) => match value {
            Value::Scalar(s) => Value::Vec4([s, s, s, 1.0]),
            other => other,
        },
        (ValueKind::Color, ValueKind::Scalar) => match value {
            Value::Vec4(v) => Value::Scalar((v[0] + v[1] + v[2]) / 3.0),
            _ => Value::Scalar(0.5),
        },
        (ValueKind::Color, ValueKind::Vector) | (ValueKind::Vector, ValueKind::Color) => {
            match value {
                v @ Value::Vec4(_) => v,
                _ => Value::Vec4([0.5, 0.5, 0.5, 1.0]),
            }
        }
        (ValueKind::Uv, ValueKind::Vector) => match value {
            Value::Vec2([u, v]) => Value::Vec4([u, v, 0.0, 1.0]),
            _ => Value::Vec4([0.5, 0.5, 0.0, 1.0]),
        },
        (ValueKind::Vector, ValueKind::Uv) => match value {
            Value::Vec4(v) => Value::Vec2([v[0], v[1]]),
            _ => Value::Vec2([0.5, 0.5]),
        },
        _ => default_convert(value, from),
    }
}

/// The per-kind fallback converter, applied when no directed converter
/// matches the pair.
fn default_convert(value: Value, from: ValueKind) -> Value {
    match from {
        ValueKind::Color | ValueKind::Vector | ValueKind::Emission => match value {
            Value::Scalar(s) => Value::Vec4([s, s, s, 1.0]),
            other => other,
        },
        ValueKind::Scalar => match value {
            Value::Vec4(v) => Value::Scalar((v[0] + v[1] + v[2]) / 3.0),
            other => other,
        },
        ValueKind::Uv => match value {
            Value::Vec4(v) => Value::Vec2([v[0], v[1]]),
            other => other,
        },
        ValueKind::Normal => value,
    }
}

/// Extract one component of `value`, interpreted as `kind`.
///
/// A shape that does not carry the requested component degrades to 0
/// rather than erroring; only an index outside the kind's shape fails.
pub fn extract_component(
    value: Value,
    kind: ValueKind,
    index: usize,
) -> Result<f32, ComponentOutOfRange> {
    if index >= kind.definition().component_count {
        return Err(ComponentOutOfRange { kind, index });
    }
    Ok(value.component(index).unwrap_or(0.0))
}

/// Compose a value of `target_kind` from per-component scalars.
///
/// Absent components default to 0, except an omitted alpha/W component of a
/// four-component kind, which defaults to 1. Normal's padding component is
/// always 0.
pub fn combine_components(components: &[f32], target_kind: ValueKind) -> Value {
    let get = |i: usize, fallback: f32| components.get(i).copied().unwrap_or(fallback);
    match target_kind {
        ValueKind::Color | ValueKind::Emission | ValueKind::Vector => Value::Vec4([
            get(0, 0.0),
            get(1, 0.0),
            get(2, 0.0),
            get(3, 1.0),
        ]),
        ValueKind::Scalar => Value::Scalar(get(0, 0.0)),
        ValueKind::Uv => Value::Vec2([get(0, 0.0), get(1, 0.0)]),
        ValueKind::Normal => Value::Vec4([get(0, 0.0), get(1, 0.0), get(2, 0.0), 0.0]),
    }
}
