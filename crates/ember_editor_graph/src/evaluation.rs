// SPDX-License-Identifier: MIT OR Apache-2.0
//! Memoized recursive graph evaluation.

use crate::graph::Graph;
use crate::node::NodeId;
use crate::texture::{TextureCache, TextureError};
use crate::value::{convert, extract_component, Value, ValueKind};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Per-pass frame inputs threaded through the context, so time-varying
/// nodes stay pure instead of reading process-wide state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInputs {
    /// Elapsed time in seconds
    pub time: f32,
    /// Time since the previous frame in seconds
    pub delta_time: f32,
}

/// A per-node diagnostic surfaced to the caller without aborting the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDiagnostic {
    /// The node that reported the problem
    pub node: NodeId,
    /// Human-readable description
    pub message: String,
}

/// Error during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    /// The graph contains a cycle reachable from the evaluated output.
    #[error("cycle detected while evaluating node {node:?}")]
    CycleDetected {
        /// The node revisited while still being evaluated
        node: NodeId,
    },

    /// A connection references a node that no longer exists.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// A pin index is out of range for its node.
    #[error("pin index {index} out of range on node {node:?}")]
    PinOutOfRange {
        /// The node whose pin was addressed
        node: NodeId,
        /// The offending pin index
        index: usize,
    },
}

/// State for one evaluation pass.
///
/// Created fresh per pass and discarded after; only the borrowed texture
/// cache outlives it. The memo cache is keyed by (node, logical output)
/// so that every node evaluates at most once per pass, and the in-flight
/// set fails fast on cycles instead of recursing unboundedly.
pub struct EvaluationContext<'a> {
    graph: &'a Graph,
    textures: &'a mut TextureCache,
    frame: FrameInputs,
    cache: HashMap<(NodeId, usize), Value>,
    in_flight: HashSet<(NodeId, usize)>,
    diagnostics: Vec<NodeDiagnostic>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context for one pass over `graph`.
    pub fn new(graph: &'a Graph, frame: FrameInputs, textures: &'a mut TextureCache) -> Self {
        Self {
            graph,
            textures,
            frame,
            cache: HashMap::new(),
            in_flight: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The graph being evaluated.
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// This pass's frame inputs.
    pub fn frame(&self) -> FrameInputs {
        self.frame
    }

    /// Evaluate one output pin of a node.
    ///
    /// Returns the memoized value on a cache hit. A split-channel pin
    /// evaluates its parent logical output and extracts exactly that
    /// channel; the whole value is never reinterpreted.
    pub fn evaluate_output(
        &mut self,
        node_id: NodeId,
        pin_index: usize,
    ) -> Result<Option<Value>, EvaluationError> {
        let graph = self.graph;
        let node = graph
            .node(node_id)
            .ok_or(EvaluationError::NodeNotFound(node_id))?;
        let Some((logical, channel)) = node.logical_output(pin_index) else {
            return Err(EvaluationError::PinOutOfRange {
                node: node_id,
                index: pin_index,
            });
        };

        let value = self.evaluate_logical(node_id, logical)?;
        match (value, channel) {
            (Some(v), Some(ch)) => {
                Ok(extract_component(v, ch.origin, ch.index).ok().map(Value::Scalar))
            }
            (value, None) => Ok(value),
            (None, Some(_)) => Ok(None),
        }
    }

    fn evaluate_logical(
        &mut self,
        node_id: NodeId,
        logical: usize,
    ) -> Result<Option<Value>, EvaluationError> {
        let key = (node_id, logical);
        if let Some(value) = self.cache.get(&key) {
            return Ok(Some(*value));
        }
        if !self.in_flight.insert(key) {
            return Err(EvaluationError::CycleDetected { node: node_id });
        }

        let graph = self.graph;
        let node = graph
            .node(node_id)
            .ok_or(EvaluationError::NodeNotFound(node_id))?;
        let result = node.kind.evaluate(node, logical, self);
        self.in_flight.remove(&key);

        let value = result?;
        if let Some(v) = value {
            self.cache.insert(key, v);
        }
        Ok(value)
    }

    /// Resolve the value feeding an input pin, converted to `requested`.
    ///
    /// An unconnected pin yields its default; a connected source is taken
    /// as-is when its kind matches and converted through the registry only
    /// on a mismatch; an absent source value falls back to the pin's
    /// default. Always produces a value.
    pub fn resolve_input(
        &mut self,
        node_id: NodeId,
        input_index: usize,
        requested: ValueKind,
    ) -> Result<Value, EvaluationError> {
        self.resolve(node_id, input_index, Some(requested))
    }

    /// Resolve the value feeding an input pin without any kind conversion.
    ///
    /// Used where the node applies its own widening, such as the
    /// arithmetic broadcast of a bare scalar operand.
    pub fn resolve_input_raw(
        &mut self,
        node_id: NodeId,
        input_index: usize,
    ) -> Result<Value, EvaluationError> {
        self.resolve(node_id, input_index, None)
    }

    fn resolve(
        &mut self,
        node_id: NodeId,
        input_index: usize,
        requested: Option<ValueKind>,
    ) -> Result<Value, EvaluationError> {
        let graph = self.graph;
        let node = graph
            .node(node_id)
            .ok_or(EvaluationError::NodeNotFound(node_id))?;
        let pin = node
            .input(input_index)
            .ok_or(EvaluationError::PinOutOfRange {
                node: node_id,
                index: input_index,
            })?;
        let pin_kind = pin.kind;
        let fallback = pin.default_value;
        let apply = |value: Value, from: ValueKind| match requested {
            Some(to) if to != from => convert(value, from, to),
            _ => value,
        };

        let Some(conn) = graph.connection_into(node_id, input_index) else {
            return Ok(apply(fallback, pin_kind));
        };
        let source_kind = graph
            .node(conn.src)
            .and_then(|n| n.output(conn.src_output))
            .map(|p| p.kind);
        let (src, src_output) = (conn.src, conn.src_output);

        match (self.evaluate_output(src, src_output)?, source_kind) {
            (Some(value), Some(from)) => Ok(apply(value, from)),
            _ => Ok(apply(fallback, pin_kind)),
        }
    }

    /// Resolve an input only if it is connected; `None` otherwise.
    ///
    /// For inputs that override a node parameter when wired up.
    pub fn connected_input(
        &mut self,
        node_id: NodeId,
        input_index: usize,
        requested: ValueKind,
    ) -> Result<Option<Value>, EvaluationError> {
        if self.graph.connection_into(node_id, input_index).is_none() {
            return Ok(None);
        }
        self.resolve_input(node_id, input_index, requested).map(Some)
    }

    /// Connected-only scalar resolve; `None` when the pin is unwired.
    pub fn connected_scalar(
        &mut self,
        node_id: NodeId,
        input_index: usize,
    ) -> Result<Option<f32>, EvaluationError> {
        Ok(self
            .connected_input(node_id, input_index, ValueKind::Scalar)?
            .map(|v| v.as_scalar().unwrap_or(0.0)))
    }

    /// Resolve an input converted to its pin's declared kind.
    pub fn input_value(
        &mut self,
        node_id: NodeId,
        input_index: usize,
    ) -> Result<Value, EvaluationError> {
        let graph = self.graph;
        let kind = graph
            .node(node_id)
            .ok_or(EvaluationError::NodeNotFound(node_id))?
            .input(input_index)
            .ok_or(EvaluationError::PinOutOfRange {
                node: node_id,
                index: input_index,
            })?
            .kind;
        self.resolve_input(node_id, input_index, kind)
    }

    /// Resolve an input as a scalar.
    pub fn scalar_input(
        &mut self,
        node_id: NodeId,
        input_index: usize,
    ) -> Result<f32, EvaluationError> {
        Ok(self.input_value(node_id, input_index)?.as_scalar().unwrap_or(0.0))
    }

    /// Resolve an input as two components.
    pub fn vec2_input(
        &mut self,
        node_id: NodeId,
        input_index: usize,
    ) -> Result<[f32; 2], EvaluationError> {
        Ok(match self.input_value(node_id, input_index)? {
            Value::Vec2(v) => v,
            Value::Vec4(v) => [v[0], v[1]],
            Value::Scalar(s) => [s, s],
        })
    }

    /// Resolve an input as four components.
    pub fn vec4_input(
        &mut self,
        node_id: NodeId,
        input_index: usize,
    ) -> Result<[f32; 4], EvaluationError> {
        Ok(self.input_value(node_id, input_index)?.broadcast4())
    }

    /// Sample the shared texture cache.
    pub(crate) fn sample_texture(
        &mut self,
        path: &Path,
        uv: [f32; 2],
    ) -> Result<[f32; 4], TextureError> {
        self.textures.sample(path, uv)
    }

    /// Record a per-node diagnostic for the caller.
    pub fn report(&mut self, node: NodeId, message: impl Into<String>) {
        self.diagnostics.push(NodeDiagnostic {
            node,
            message: message.into(),
        });
    }

    /// Diagnostics accumulated so far this pass.
    pub fn diagnostics(&self) -> &[NodeDiagnostic] {
        &self.diagnostics
    }

    /// Drain the accumulated diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<NodeDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{ArithmeticOp, NodeKind, UnaryOp};

    fn eval(
        graph: &Graph,
        textures: &mut TextureCache,
        node: NodeId,
        output: usize,
    ) -> Option<Value> {
        let mut ctx = EvaluationContext::new(graph, FrameInputs::default(), textures);
        ctx.evaluate_output(node, output).unwrap()
    }

    #[test]
    fn test_constant_evaluation() {
        let mut graph = Graph::default();
        let scalar = graph.add_node(NodeKind::ScalarConstant { value: 0.25 });
        let mut textures = TextureCache::new();
        assert_eq!(
            eval(&graph, &mut textures, scalar, 0),
            Some(Value::Scalar(0.25))
        );
    }

    #[test]
    fn test_add_without_inputs_is_zero() {
        let mut graph = Graph::default();
        let add = graph.add_node(NodeKind::Arithmetic(ArithmeticOp::Add));
        let mut textures = TextureCache::new();
        assert_eq!(
            eval(&graph, &mut textures, add, 0),
            Some(Value::Vec4([0.0; 4]))
        );
    }

    #[test]
    fn test_multiply_broadcasts_scalar_operand() {
        let mut graph = Graph::default();
        let a = graph.add_node(NodeKind::ScalarConstant { value: 0.25 });
        let b = graph.add_node(NodeKind::ScalarConstant { value: 4.0 });
        let mul = graph.add_node(NodeKind::Arithmetic(ArithmeticOp::Multiply));
        assert!(graph.connect(a, 0, mul, 0));
        assert!(graph.connect(b, 0, mul, 1));

        let mut textures = TextureCache::new();
        assert_eq!(
            eval(&graph, &mut textures, mul, 0),
            Some(Value::Vec4([1.0; 4]))
        );
    }

    #[test]
    fn test_divide_guards_near_zero() {
        let mut graph = Graph::default();
        let a = graph.add_node(NodeKind::ColorConstant {
            color: [1.0, 2.0, 3.0, 4.0],
        });
        let b = graph.add_node(NodeKind::ColorConstant {
            color: [2.0, 0.0, 2.0, 0.0],
        });
        let div = graph.add_node(NodeKind::Arithmetic(ArithmeticOp::Divide));
        assert!(graph.connect(a, 0, div, 0));
        assert!(graph.connect(b, 0, div, 1));

        let mut textures = TextureCache::new();
        assert_eq!(
            eval(&graph, &mut textures, div, 0),
            Some(Value::Vec4([0.5, 0.0, 1.5, 0.0]))
        );
    }

    #[test]
    fn test_clamp_scenario() {
        let mut graph = Graph::default();
        let constant = graph.add_node(NodeKind::ScalarConstant { value: 1.5 });
        let clamp = graph.add_node(NodeKind::Clamp { min: 0.2, max: 0.8 });
        assert!(graph.connect(constant, 0, clamp, 0));

        let mut textures = TextureCache::new();
        assert_eq!(
            eval(&graph, &mut textures, clamp, 0),
            Some(Value::Scalar(0.8))
        );
    }

    #[test]
    fn test_mask_scales_input() {
        let mut graph = Graph::default();
        let color = graph.add_node(NodeKind::ColorConstant {
            color: [1.0, 0.5, 0.25, 1.0],
        });
        let strength = graph.add_node(NodeKind::ScalarConstant { value: 2.0 });
        let mask = graph.add_node(NodeKind::Mask);
        assert!(graph.connect(color, 0, mask, 0));
        assert!(graph.connect(strength, 0, mask, 1));

        // The mask clamps to 1 before multiplying.
        let mut textures = TextureCache::new();
        assert_eq!(
            eval(&graph, &mut textures, mask, 0),
            Some(Value::Vec4([1.0, 0.5, 0.25, 1.0]))
        );
    }

    #[test]
    fn test_time_nodes_read_frame_inputs() {
        let mut graph = Graph::default();
        let time = graph.add_node(NodeKind::Time);
        let delta = graph.add_node(NodeKind::DeltaTime);

        let frame = FrameInputs {
            time: 5.5,
            delta_time: 0.016,
        };
        let mut textures = TextureCache::new();
        let mut ctx = EvaluationContext::new(&graph, frame, &mut textures);
        assert_eq!(
            ctx.evaluate_output(time, 0).unwrap(),
            Some(Value::Scalar(5.5))
        );
        assert_eq!(
            ctx.evaluate_output(delta, 0).unwrap(),
            Some(Value::Scalar(0.016))
        );
    }

    #[test]
    fn test_panner_offsets_uv() {
        let mut graph = Graph::default();
        let time = graph.add_node(NodeKind::Time);
        let panner = graph.add_node(NodeKind::Panner { speed: [0.1, 0.2] });
        assert!(graph.connect(time, 0, panner, 1));

        let frame = FrameInputs {
            time: 2.0,
            delta_time: 0.0,
        };
        let mut textures = TextureCache::new();
        let mut ctx = EvaluationContext::new(&graph, frame, &mut textures);
        let Some(Value::Vec2(uv)) = ctx.evaluate_output(panner, 0).unwrap() else {
            panic!("expected UV output");
        };
        assert!((uv[0] - 0.7).abs() < 1e-5);
        assert!((uv[1] - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_rotator_half_turn() {
        let mut graph = Graph::default();
        let time = graph.add_node(NodeKind::Time);
        let uv = graph.add_node(NodeKind::TexCoord {
            coordinates: [0.75, 0.5],
            scale: [1.0, 1.0],
            offset: [0.0, 0.0],
        });
        let rotator = graph.add_node(NodeKind::Rotator {
            center: [0.5, 0.5],
            speed: 0.5,
        });
        assert!(graph.connect(uv, 0, rotator, 0));
        assert!(graph.connect(time, 0, rotator, 1));

        // speed 0.5 rev/s at t=1 is half a turn.
        let frame = FrameInputs {
            time: 1.0,
            delta_time: 0.0,
        };
        let mut textures = TextureCache::new();
        let mut ctx = EvaluationContext::new(&graph, frame, &mut textures);
        let Some(Value::Vec2(rotated)) = ctx.evaluate_output(rotator, 0).unwrap() else {
            panic!("expected UV output");
        };
        assert!((rotated[0] - 0.25).abs() < 1e-5);
        assert!((rotated[1] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_tex_coord_input_overrides_parameter() {
        let mut graph = Graph::default();
        let scale = graph.add_node(NodeKind::ScalarConstant { value: 2.0 });
        let uv = graph.add_node(NodeKind::TexCoord {
            coordinates: [1.0, 1.0],
            scale: [4.0, 4.0],
            offset: [0.0, 0.25],
        });
        assert!(graph.connect(scale, 0, uv, 2));

        let mut textures = TextureCache::new();
        let Some(Value::Vec2(out)) = eval(&graph, &mut textures, uv, 0) else {
            panic!("expected UV output");
        };
        // U uses the connected scale, V keeps the parameter.
        assert!((out[0] - 0.5).abs() < 1e-5);
        assert!((out[1] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_pack_unpack() {
        let mut graph = Graph::default();
        let x = graph.add_node(NodeKind::ScalarConstant { value: 0.1 });
        let y = graph.add_node(NodeKind::ScalarConstant { value: 0.2 });
        let pack = graph.add_node(NodeKind::PackVector3);
        let unpack = graph.add_node(NodeKind::UnpackVector4);
        assert!(graph.connect(x, 0, pack, 0));
        assert!(graph.connect(y, 0, pack, 1));
        assert!(graph.connect(pack, 0, unpack, 0));

        let mut textures = TextureCache::new();
        let mut ctx = EvaluationContext::new(&graph, FrameInputs::default(), &mut textures);
        assert_eq!(
            ctx.evaluate_output(pack, 0).unwrap(),
            Some(Value::Vec4([0.1, 0.2, 0.0, 1.0]))
        );
        assert_eq!(ctx.evaluate_output(unpack, 1).unwrap(), Some(Value::Scalar(0.2)));
        assert_eq!(ctx.evaluate_output(unpack, 3).unwrap(), Some(Value::Scalar(1.0)));
    }

    #[test]
    fn test_hue_shift_preserves_alpha() {
        let mut graph = Graph::default();
        let color = graph.add_node(NodeKind::ColorConstant {
            color: [1.0, 0.0, 0.0, 0.25],
        });
        let shift = graph.add_node(NodeKind::ScalarConstant { value: 0.5 });
        let hue = graph.add_node(NodeKind::HueShift);
        assert!(graph.connect(color, 0, hue, 0));
        assert!(graph.connect(shift, 0, hue, 1));

        let mut textures = TextureCache::new();
        let Some(Value::Vec4(out)) = eval(&graph, &mut textures, hue, 0) else {
            panic!("expected color output");
        };
        assert!(out[0].abs() < 1e-5);
        assert!((out[1] - 1.0).abs() < 1e-5);
        assert!((out[2] - 1.0).abs() < 1e-5);
        assert!((out[3] - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_split_channel_extracts_from_parent() {
        let mut graph = Graph::default();
        let color = graph.add_node(NodeKind::ColorConstant {
            color: [0.1, 0.2, 0.3, 0.4],
        });
        assert!(graph.split_output(color, 0));

        let mut textures = TextureCache::new();
        let mut ctx = EvaluationContext::new(&graph, FrameInputs::default(), &mut textures);
        for (i, expected) in [0.1, 0.2, 0.3, 0.4].into_iter().enumerate() {
            assert_eq!(
                ctx.evaluate_output(color, i).unwrap(),
                Some(Value::Scalar(expected))
            );
        }
    }

    #[test]
    fn test_diamond_evaluates_shared_source_once() {
        // A texture node with a missing file reports a diagnostic every
        // time it actually evaluates, so a diamond above it counts
        // evaluations: one diagnostic means one evaluation.
        let mut graph = Graph::default();
        let texture = graph.add_node(NodeKind::TextureSample {
            path: Some(std::path::PathBuf::from("definitely/not/here.png")),
            uv_scale: [1.0, 1.0],
            uv_offset: [0.0, 0.0],
        });
        let left = graph.add_node(NodeKind::Arithmetic(ArithmeticOp::Add));
        let right = graph.add_node(NodeKind::Arithmetic(ArithmeticOp::Add));
        let join = graph.add_node(NodeKind::Arithmetic(ArithmeticOp::Add));
        assert!(graph.connect(texture, 0, left, 0));
        assert!(graph.connect(texture, 0, right, 0));
        assert!(graph.connect(left, 0, join, 0));
        assert!(graph.connect(right, 0, join, 1));

        let mut textures = TextureCache::new();
        let mut ctx = EvaluationContext::new(&graph, FrameInputs::default(), &mut textures);
        assert!(ctx.evaluate_output(join, 0).unwrap().is_some());
        assert_eq!(ctx.diagnostics().len(), 1);
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = Graph::default();
        let a = graph.add_node(NodeKind::Arithmetic(ArithmeticOp::Add));
        let b = graph.add_node(NodeKind::Arithmetic(ArithmeticOp::Add));
        assert!(graph.connect(a, 0, b, 0));
        assert!(graph.connect(b, 0, a, 0));

        let mut textures = TextureCache::new();
        let mut ctx = EvaluationContext::new(&graph, FrameInputs::default(), &mut textures);
        assert!(matches!(
            ctx.evaluate_output(a, 0),
            Err(EvaluationError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_sin_of_unconnected_input() {
        let mut graph = Graph::default();
        let sin = graph.add_node(NodeKind::UnaryMath(UnaryOp::Sin));
        let mut textures = TextureCache::new();
        assert_eq!(
            eval(&graph, &mut textures, sin, 0),
            Some(Value::Scalar(0.0))
        );
    }

    #[test]
    fn test_unary_math_elementwise() {
        let mut graph = Graph::default();
        let color = graph.add_node(NodeKind::ColorConstant {
            color: [-0.5, 1.25, -2.0, 0.75],
        });
        let abs = graph.add_node(NodeKind::UnaryMath(UnaryOp::Abs));
        let frac = graph.add_node(NodeKind::UnaryMath(UnaryOp::Frac));
        assert!(graph.connect(color, 0, abs, 0));
        assert!(graph.connect(color, 0, frac, 0));

        let mut textures = TextureCache::new();
        let mut ctx = EvaluationContext::new(&graph, FrameInputs::default(), &mut textures);
        assert_eq!(
            ctx.evaluate_output(abs, 0).unwrap(),
            Some(Value::Vec4([0.5, 1.25, 2.0, 0.75]))
        );
        assert_eq!(
            ctx.evaluate_output(frac, 0).unwrap(),
            Some(Value::Vec4([0.5, 0.25, 0.0, 0.75]))
        );
    }
}
