// SPDX-License-Identifier: MIT OR Apache-2.0
//! The catalog of node behaviors: pin layouts and evaluation.

use crate::evaluation::{EvaluationContext, EvaluationError};
use crate::node::Node;
use crate::pin::Pin;
use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::array;
use std::f32::consts::TAU;
use std::path::PathBuf;

/// Denominators smaller than this make a divide component yield 0.
const DIVIDE_EPSILON: f32 = 1e-6;

/// Elementwise binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// A + B
    Add,
    /// A - B
    Subtract,
    /// A * B
    Multiply,
    /// A / B, 0 for near-zero denominators
    Divide,
    /// min(A, B)
    Min,
    /// max(A, B)
    Max,
    /// A raised to B
    Power,
}

/// Elementwise unary math operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Absolute value
    Abs,
    /// Round down
    Floor,
    /// Round up
    Ceil,
    /// Fractional part
    Frac,
    /// Sine (radians)
    Sin,
    /// Cosine (radians)
    Cos,
}

impl UnaryOp {
    /// Sin/Cos operate on scalars; the rest are elementwise over colors.
    fn is_scalar(self) -> bool {
        matches!(self, Self::Sin | Self::Cos)
    }
}

/// The closed set of node behaviors, each variant owning its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Scalar literal
    ScalarConstant {
        /// The literal value
        value: f32,
    },
    /// Vector literal
    VectorConstant {
        /// The literal value
        value: [f32; 4],
    },
    /// Color literal
    ColorConstant {
        /// The literal RGBA color
        color: [f32; 4],
    },
    /// Elementwise binary arithmetic
    Arithmetic(ArithmeticOp),
    /// Unary math function
    UnaryMath(UnaryOp),
    /// Linear interpolation between two colors
    Lerp,
    /// Pack three scalars into an RGB color (alpha 1)
    PackVector3,
    /// Pack four scalars into an RGBA color
    PackVector4,
    /// Unpack a color into three scalar outputs
    UnpackVector3,
    /// Unpack a color into four scalar outputs
    UnpackVector4,
    /// Extract one named component as a scalar
    ExtractComponent {
        /// Component index (0..4)
        component: usize,
    },
    /// Choose two components into a 2-vector
    Swizzle {
        /// Source component for U
        x: usize,
        /// Source component for V
        y: usize,
    },
    /// UV coordinate source with scale and offset
    TexCoord {
        /// Base coordinates, overridden by connected inputs
        coordinates: [f32; 2],
        /// UV scale, non-positive components coerce to 1
        scale: [f32; 2],
        /// UV offset
        offset: [f32; 2],
    },
    /// Elapsed process time from the frame inputs
    Time,
    /// Frame delta time from the frame inputs
    DeltaTime,
    /// Clamp a scalar to a range
    Clamp {
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },
    /// Multiply a color by a clamped scalar mask
    Mask,
    /// Rotate a color's hue, preserving alpha
    HueShift,
    /// Pan UVs linearly over time
    Panner {
        /// Pan speed in UV units per second
        speed: [f32; 2],
    },
    /// Rotate UVs about a center over time
    Rotator {
        /// Rotation center
        center: [f32; 2],
        /// Revolutions per second
        speed: f32,
    },
    /// Sample a texture file with bilinear filtering
    TextureSample {
        /// Path to the texture file, if configured
        path: Option<PathBuf>,
        /// UV scale applied before sampling
        uv_scale: [f32; 2],
        /// UV offset applied before sampling
        uv_offset: [f32; 2],
    },
    /// The material sink: final surface attributes, zero outputs
    MaterialOutput,
}

impl NodeKind {
    /// Display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ScalarConstant { .. } => "Scalar Parameter",
            Self::VectorConstant { .. } => "Vector Parameter",
            Self::ColorConstant { .. } => "Color",
            Self::Arithmetic(op) => match op {
                ArithmeticOp::Add => "Add",
                ArithmeticOp::Subtract => "Subtract",
                ArithmeticOp::Multiply => "Multiply",
                ArithmeticOp::Divide => "Divide",
                ArithmeticOp::Min => "Min",
                ArithmeticOp::Max => "Max",
                ArithmeticOp::Power => "Power",
            },
            Self::UnaryMath(op) => match op {
                UnaryOp::Abs => "Abs",
                UnaryOp::Floor => "Floor",
                UnaryOp::Ceil => "Ceil",
                UnaryOp::Frac => "Frac",
                UnaryOp::Sin => "Sin",
                UnaryOp::Cos => "Cos",
            },
            Self::Lerp => "Lerp",
            Self::PackVector3 => "To Vector 3",
            Self::PackVector4 => "To Vector 4",
            Self::UnpackVector3 => "From Vector 3",
            Self::UnpackVector4 => "From Vector 4",
            Self::ExtractComponent { .. } => "To Scalar",
            Self::Swizzle { .. } => "To Vector 2",
            Self::TexCoord { .. } => "TexCoord",
            Self::Time => "Time",
            Self::DeltaTime => "Delta Time",
            Self::Clamp { .. } => "Clamp",
            Self::Mask => "Mask",
            Self::HueShift => "Hue Shift",
            Self::Panner { .. } => "Panner",
            Self::Rotator { .. } => "Rotator",
            Self::TextureSample { .. } => "Texture Sample",
            Self::MaterialOutput => "Material Output",
        }
    }

    /// Whether this kind is the material sink. This role marker, not the
    /// display name, is what the resolution pass searches for.
    pub fn is_sink(&self) -> bool {
        matches!(self, Self::MaterialOutput)
    }

    /// Declared input pins for this kind.
    pub(crate) fn input_pins(&self) -> Vec<Pin> {
        let zero = Value::Vec4([0.0; 4]);
        let one = Value::Vec4([1.0; 4]);
        let center = Value::Vec2([0.5, 0.5]);
        match self {
            Self::ScalarConstant { .. }
            | Self::VectorConstant { .. }
            | Self::ColorConstant { .. }
            | Self::Time
            | Self::DeltaTime => Vec::new(),
            Self::Arithmetic(op) => {
                // Multiplicative operations default to the identity so a
                // missing operand leaves the other untouched.
                let default = match op {
                    ArithmeticOp::Multiply | ArithmeticOp::Divide | ArithmeticOp::Power => one,
                    _ => zero,
                };
                vec![
                    Pin::input("A", ValueKind::Color).with_default(default),
                    Pin::input("B", ValueKind::Color).with_default(default),
                ]
            }
            Self::UnaryMath(op) => {
                if op.is_scalar() {
                    vec![Pin::input("Input", ValueKind::Scalar).with_default(Value::Scalar(0.0))]
                } else {
                    vec![Pin::input("Input", ValueKind::Color).with_default(zero)]
                }
            }
            Self::Lerp => vec![
                Pin::input("A", ValueKind::Color).with_default(zero),
                Pin::input("B", ValueKind::Color).with_default(zero),
                Pin::input("Alpha", ValueKind::Scalar),
            ],
            Self::PackVector3 => vec![
                Pin::input("X", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
                Pin::input("Y", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
                Pin::input("Z", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
            ],
            Self::PackVector4 => vec![
                Pin::input("X", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
                Pin::input("Y", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
                Pin::input("Z", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
                Pin::input("W", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
            ],
            Self::UnpackVector3 => {
                vec![Pin::input("RGB", ValueKind::Color).with_default(zero)]
            }
            Self::UnpackVector4 => {
                vec![Pin::input("RGBA", ValueKind::Color).with_default(zero)]
            }
            Self::ExtractComponent { .. } | Self::Swizzle { .. } => {
                vec![Pin::input("Input", ValueKind::Color)]
            }
            Self::TexCoord { .. } => vec![
                Pin::input("Coordinates U", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
                Pin::input("Coordinates V", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
                Pin::input("Scale U", ValueKind::Scalar).with_default(Value::Scalar(1.0)),
                Pin::input("Scale V", ValueKind::Scalar).with_default(Value::Scalar(1.0)),
                Pin::input("Offset U", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
                Pin::input("Offset V", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
            ],
            Self::Clamp { .. } => vec![Pin::input("Input", ValueKind::Scalar)],
            Self::Mask => vec![
                Pin::input("Input", ValueKind::Color).with_default(zero),
                Pin::input("Mask", ValueKind::Scalar).with_default(Value::Scalar(1.0)),
            ],
            Self::HueShift => vec![
                Pin::input("Input", ValueKind::Color),
                Pin::input("Shift", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
            ],
            Self::Panner { .. } | Self::Rotator { .. } => vec![
                Pin::input("UV", ValueKind::Uv).with_default(center),
                Pin::input("Time", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
            ],
            Self::TextureSample { .. } => vec![
                Pin::input("UVs", ValueKind::Uv).with_default(center),
                Pin::input("Tint", ValueKind::Color).with_default(one),
            ],
            Self::MaterialOutput => vec![
                Pin::input("Base Color", ValueKind::Color).with_default(one),
                Pin::input("Metallic", ValueKind::Scalar).with_default(Value::Scalar(0.0)),
                Pin::input("Specular", ValueKind::Scalar).with_default(Value::Scalar(0.5)),
                Pin::input("Roughness", ValueKind::Scalar).with_default(Value::Scalar(0.5)),
                Pin::input("Normal", ValueKind::Normal),
                Pin::input("Ambient Occlusion", ValueKind::Scalar)
                    .with_default(Value::Scalar(1.0)),
            ],
        }
    }

    /// Declared output pins for this kind.
    pub(crate) fn output_pins(&self) -> Vec<Pin> {
        match self {
            Self::ScalarConstant { .. } => vec![Pin::output("Value", ValueKind::Scalar)],
            Self::VectorConstant { .. } => vec![Pin::output("Vector", ValueKind::Vector)],
            Self::ColorConstant { .. } => vec![Pin::output("Color", ValueKind::Color)],
            Self::Arithmetic(_) | Self::Lerp | Self::Mask | Self::HueShift => {
                vec![Pin::output("Result", ValueKind::Color)]
            }
            Self::UnaryMath(op) => {
                if op.is_scalar() {
                    vec![Pin::output("Result", ValueKind::Scalar)]
                } else {
                    vec![Pin::output("Result", ValueKind::Color)]
                }
            }
            Self::PackVector3 => vec![Pin::output("RGB", ValueKind::Color)],
            Self::PackVector4 => vec![Pin::output("RGBA", ValueKind::Color)],
            Self::UnpackVector3 => vec![
                Pin::output("X", ValueKind::Scalar),
                Pin::output("Y", ValueKind::Scalar),
                Pin::output("Z", ValueKind::Scalar),
            ],
            Self::UnpackVector4 => vec![
                Pin::output("X", ValueKind::Scalar),
                Pin::output("Y", ValueKind::Scalar),
                Pin::output("Z", ValueKind::Scalar),
                Pin::output("W", ValueKind::Scalar),
            ],
            Self::ExtractComponent { .. } => vec![Pin::output("Scalar", ValueKind::Scalar)],
            Self::Swizzle { .. } => vec![Pin::output("Vector 2", ValueKind::Uv)],
            Self::TexCoord { .. } | Self::Panner { .. } | Self::Rotator { .. } => {
                vec![Pin::output("UV", ValueKind::Uv)]
            }
            Self::Time => vec![Pin::output("Time", ValueKind::Scalar)],
            Self::DeltaTime => vec![Pin::output("Delta Time", ValueKind::Scalar)],
            Self::Clamp { .. } => vec![Pin::output("Result", ValueKind::Scalar)],
            Self::TextureSample { .. } => vec![
                Pin::output("RGBA", ValueKind::Color),
                Pin::output("Alpha", ValueKind::Scalar),
            ],
            Self::MaterialOutput => Vec::new(),
        }
    }

    /// Evaluate one logical output of `node`.
    ///
    /// Pure with respect to the node's parameters and values obtained
    /// through the context; returns `None` for out-of-range outputs, in
    /// which case callers fall back to pin defaults.
    pub(crate) fn evaluate(
        &self,
        node: &Node,
        output: usize,
        ctx: &mut EvaluationContext,
    ) -> Result<Option<Value>, EvaluationError> {
        match self {
            Self::ScalarConstant { value } => {
                Ok((output == 0).then_some(Value::Scalar(*value)))
            }
            Self::VectorConstant { value } => Ok((output == 0).then_some(Value::Vec4(*value))),
            Self::ColorConstant { color } => Ok((output == 0).then_some(Value::Vec4(*color))),
            Self::Arithmetic(op) => {
                if output != 0 {
                    return Ok(None);
                }
                let a = ctx.resolve_input_raw(node.id, 0)?.broadcast4();
                let b = ctx.resolve_input_raw(node.id, 1)?.broadcast4();
                let result: [f32; 4] = match op {
                    ArithmeticOp::Add => array::from_fn(|i| a[i] + b[i]),
                    ArithmeticOp::Subtract => array::from_fn(|i| a[i] - b[i]),
                    ArithmeticOp::Multiply => array::from_fn(|i| a[i] * b[i]),
                    ArithmeticOp::Divide => array::from_fn(|i| {
                        if b[i].abs() < DIVIDE_EPSILON {
                            0.0
                        } else {
                            a[i] / b[i]
                        }
                    }),
                    ArithmeticOp::Min => array::from_fn(|i| a[i].min(b[i])),
                    ArithmeticOp::Max => array::from_fn(|i| a[i].max(b[i])),
                    ArithmeticOp::Power => array::from_fn(|i| a[i].powf(b[i])),
                };
                Ok(Some(Value::Vec4(result)))
            }
            Self::UnaryMath(op) => {
                if output != 0 {
                    return Ok(None);
                }
                if op.is_scalar() {
                    let x = ctx.scalar_input(node.id, 0)?;
                    let result = match op {
                        UnaryOp::Sin => x.sin(),
                        UnaryOp::Cos => x.cos(),
                        _ => unreachable!(),
                    };
                    return Ok(Some(Value::Scalar(result)));
                }
                let v = ctx.resolve_input_raw(node.id, 0)?.broadcast4();
                let f = |x: f32| match op {
                    UnaryOp::Abs => x.abs(),
                    UnaryOp::Floor => x.floor(),
                    UnaryOp::Ceil => x.ceil(),
                    UnaryOp::Frac => x - x.floor(),
                    UnaryOp::Sin | UnaryOp::Cos => unreachable!(),
                };
                Ok(Some(Value::Vec4(v.map(f))))
            }
            Self::Lerp => {
                if output != 0 {
                    return Ok(None);
                }
                let a = ctx.vec4_input(node.id, 0)?;
                let b = ctx.vec4_input(node.id, 1)?;
                let alpha = ctx.scalar_input(node.id, 2)?.clamp(0.0, 1.0);
                Ok(Some(Value::Vec4(array::from_fn(|i| {
                    a[i] + (b[i] - a[i]) * alpha
                }))))
            }
            Self::PackVector3 => {
                if output != 0 {
                    return Ok(None);
                }
                let x = ctx.scalar_input(node.id, 0)?;
                let y = ctx.scalar_input(node.id, 1)?;
                let z = ctx.scalar_input(node.id, 2)?;
                Ok(Some(Value::Vec4([x, y, z, 1.0])))
            }
            Self::PackVector4 => {
                if output != 0 {
                    return Ok(None);
                }
                let x = ctx.scalar_input(node.id, 0)?;
                let y = ctx.scalar_input(node.id, 1)?;
                let z = ctx.scalar_input(node.id, 2)?;
                let w = ctx.scalar_input(node.id, 3)?;
                Ok(Some(Value::Vec4([x, y, z, w])))
            }
            Self::UnpackVector3 | Self::UnpackVector4 => {
                let count = if matches!(self, Self::UnpackVector3) { 3 } else { 4 };
                if output >= count {
                    return Ok(None);
                }
                let v = ctx.vec4_input(node.id, 0)?;
                Ok(Some(Value::Scalar(v[output])))
            }
            Self::ExtractComponent { component } => {
                if output != 0 {
                    return Ok(None);
                }
                let v = ctx.vec4_input(node.id, 0)?;
                let value = if *component < 4 { v[*component] } else { 0.0 };
                Ok(Some(Value::Scalar(value)))
            }
            Self::Swizzle { x, y } => {
                if output != 0 {
                    return Ok(None);
                }
                let v = ctx.vec4_input(node.id, 0)?;
                let pick = |i: usize| if i < 4 { v[i] } else { 0.0 };
                Ok(Some(Value::Vec2([pick(*x), pick(*y)])))
            }
            Self::TexCoord {
                coordinates,
                scale,
                offset,
            } => {
                if output != 0 {
                    return Ok(None);
                }
                let coord_u = ctx.connected_scalar(node.id, 0)?.unwrap_or(coordinates[0]);
                let coord_v = ctx.connected_scalar(node.id, 1)?.unwrap_or(coordinates[1]);
                let mut scale_u = ctx.connected_scalar(node.id, 2)?.unwrap_or(scale[0]);
                let mut scale_v = ctx.connected_scalar(node.id, 3)?.unwrap_or(scale[1]);
                let offset_u = ctx.connected_scalar(node.id, 4)?.unwrap_or(offset[0]);
                let offset_v = ctx.connected_scalar(node.id, 5)?.unwrap_or(offset[1]);
                if scale_u <= 0.0 {
                    scale_u = 1.0;
                }
                if scale_v <= 0.0 {
                    scale_v = 1.0;
                }
                Ok(Some(Value::Vec2([
                    coord_u / scale_u + offset_u,
                    coord_v / scale_v + offset_v,
                ])))
            }
            Self::Time => Ok((output == 0).then_some(Value::Scalar(ctx.frame().time))),
            Self::DeltaTime => {
                Ok((output == 0).then_some(Value::Scalar(ctx.frame().delta_time)))
            }
            Self::Clamp { min, max } => {
                if output != 0 {
                    return Ok(None);
                }
                let input = ctx.scalar_input(node.id, 0)?;
                // max-then-min stays total on an inverted range.
                Ok(Some(Value::Scalar(input.max(*min).min(*max))))
            }
            Self::Mask => {
                if output != 0 {
                    return Ok(None);
                }
                let input = ctx.vec4_input(node.id, 0)?;
                let mask = ctx.scalar_input(node.id, 1)?.clamp(0.0, 1.0);
                Ok(Some(Value::Vec4(input.map(|c| c * mask))))
            }
            Self::HueShift => {
                if output != 0 {
                    return Ok(None);
                }
                let input = ctx.vec4_input(node.id, 0)?;
                let shift = ctx.scalar_input(node.id, 1)?;
                let (h, s, v) = rgb_to_hsv([input[0], input[1], input[2]]);
                let [r, g, b] = hsv_to_rgb((h + shift).rem_euclid(1.0), s, v);
                Ok(Some(Value::Vec4([r, g, b, input[3]])))
            }
            Self::Panner { speed } => {
                if output != 0 {
                    return Ok(None);
                }
                let uv = ctx.vec2_input(node.id, 0)?;
                let time = ctx.scalar_input(node.id, 1)?;
                Ok(Some(Value::Vec2([
                    uv[0] + speed[0] * time,
                    uv[1] + speed[1] * time,
                ])))
            }
            Self::Rotator { center, speed } => {
                if output != 0 {
                    return Ok(None);
                }
                let uv = ctx.vec2_input(node.id, 0)?;
                let time = ctx.scalar_input(node.id, 1)?;
                let (sin, cos) = (TAU * speed * time).sin_cos();
                let dx = uv[0] - center[0];
                let dy = uv[1] - center[1];
                Ok(Some(Value::Vec2([
                    center[0] + cos * dx - sin * dy,
                    center[1] + sin * dx + cos * dy,
                ])))
            }
            Self::TextureSample {
                path,
                uv_scale,
                uv_offset,
            } => {
                if output > 1 {
                    return Ok(None);
                }
                let uv = ctx.vec2_input(node.id, 0)?;
                let uv = [
                    uv[0] * uv_scale[0] + uv_offset[0],
                    uv[1] * uv_scale[1] + uv_offset[1],
                ];
                let tint = ctx.vec4_input(node.id, 1)?;
                let sampled = match path {
                    // No texture configured: a UV gradient placeholder.
                    None => [uv[0], uv[1], 0.5, 1.0],
                    Some(path) => match ctx.sample_texture(path, uv) {
                        Ok(color) => color,
                        Err(err) => {
                            tracing::warn!(
                                "texture sample failed for {}: {err}",
                                path.display()
                            );
                            ctx.report(
                                node.id,
                                format!("texture '{}': {err}", path.display()),
                            );
                            ValueKind::Color.default_value().broadcast4()
                        }
                    },
                };
                let color: [f32; 4] = array::from_fn(|i| sampled[i] * tint[i]);
                if output == 0 {
                    Ok(Some(Value::Vec4(color)))
                } else {
                    Ok(Some(Value::Scalar(color[3])))
                }
            }
            Self::MaterialOutput => Ok(None),
        }
    }
}

/// RGB to HSV, all channels in [0, 1].
fn rgb_to_hsv([r, g, b]: [f32; 3]) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta.abs() < f32::EPSILON {
        0.0
    } else if (max - r).abs() < f32::EPSILON {
        (((g - b) / delta).rem_euclid(6.0)) / 6.0
    } else if (max - g).abs() < f32::EPSILON {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    let s = if max <= 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

/// HSV to RGB, hue wrapped into [0, 1).
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as i32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_hue_shift_half_turn() {
        // Red shifted by half a turn lands on cyan.
        let (h, s, v) = rgb_to_hsv([1.0, 0.0, 0.0]);
        let [r, g, b] = hsv_to_rgb(h + 0.5, s, v);
        assert_close(r, 0.0);
        assert_close(g, 1.0);
        assert_close(b, 1.0);
    }

    #[test]
    fn test_hsv_round_trip() {
        for rgb in [[0.2, 0.4, 0.8], [1.0, 1.0, 0.0], [0.3, 0.3, 0.3]] {
            let (h, s, v) = rgb_to_hsv(rgb);
            let back = hsv_to_rgb(h, s, v);
            for i in 0..3 {
                assert_close(back[i], rgb[i]);
            }
        }
    }

    #[test]
    fn test_sink_role_marker() {
        assert!(NodeKind::MaterialOutput.is_sink());
        assert!(!NodeKind::Time.is_sink());
        assert!(NodeKind::MaterialOutput.output_pins().is_empty());
    }

    #[test]
    fn test_arithmetic_pin_defaults() {
        let add = NodeKind::Arithmetic(ArithmeticOp::Add).input_pins();
        assert_eq!(add[0].default_value, Value::Vec4([0.0; 4]));
        let mul = NodeKind::Arithmetic(ArithmeticOp::Multiply).input_pins();
        assert_eq!(mul[1].default_value, Value::Vec4([1.0; 4]));
    }
}
