// SPDX-License-Identifier: MIT OR Apache-2.0
//! The material resolution pass: flattening a graph into shader-ready
//! surface attributes.

use crate::evaluation::{EvaluationContext, EvaluationError, FrameInputs, NodeDiagnostic};
use crate::graph::Graph;
use crate::node::{Node, NodeId};
use crate::nodes::NodeKind;
use crate::texture::TextureCache;
use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Sink input indices.
const BASE_COLOR: usize = 0;
const METALLIC: usize = 1;
const SPECULAR: usize = 2;
const ROUGHNESS: usize = 3;

/// Uv input index on a texture-sampling node.
const TEXTURE_UV: usize = 0;
/// Time input index on a panner node.
const PANNER_TIME: usize = 1;

/// Flattened material attributes produced by one resolution pass, ready to
/// bind as shader parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    /// Flat diffuse color; white when a diffuse map is set
    pub diffuse_color: [f32; 4],
    /// Metalness in [0, 1]
    pub metallic: f32,
    /// Specular intensity in [0, 1]
    pub specular: f32,
    /// Surface roughness in [0, 1]
    pub roughness: f32,
    /// Diffuse texture path, when the base color is texture-fed
    pub diffuse_map: Option<PathBuf>,
    /// Effective UV scale for the diffuse map
    pub uv_scale: [f32; 2],
    /// Effective UV offset for the diffuse map
    pub uv_offset: [f32; 2],
}

impl Default for MaterialDescription {
    fn default() -> Self {
        Self {
            diffuse_color: [1.0, 1.0, 1.0, 1.0],
            metallic: 0.0,
            specular: 0.5,
            roughness: 0.5,
            diffuse_map: None,
            uv_scale: [1.0, 1.0],
            uv_offset: [0.0, 0.0],
        }
    }
}

/// Result of one resolution pass.
#[derive(Debug, Clone)]
pub struct ResolvedMaterial {
    /// The flattened material attributes
    pub description: MaterialDescription,
    /// Per-node diagnostics collected during the pass
    pub diagnostics: Vec<NodeDiagnostic>,
}

/// Resolve the graph's sink into a flattened material description.
///
/// Returns `Ok(None)` when the graph has no sink node. Scalar attributes
/// are clamped to [0, 1]. When the base color is ultimately fed by a
/// texture-sampling node, the texture path is recorded instead of a flat
/// color, and the chain feeding that node's UV input is walked to recover
/// an effective UV scale/offset.
pub fn resolve_material(
    graph: &Graph,
    frame: FrameInputs,
    textures: &mut TextureCache,
) -> Result<Option<ResolvedMaterial>, EvaluationError> {
    let Some(sink) = graph.sink() else {
        return Ok(None);
    };
    let sink_id = sink.id;

    let mut ctx = EvaluationContext::new(graph, frame, textures);
    let mut description = MaterialDescription::default();

    if let Value::Vec4(color) = ctx.resolve_input(sink_id, BASE_COLOR, ValueKind::Color)? {
        description.diffuse_color = color;
    }
    description.metallic = ctx.scalar_input(sink_id, METALLIC)?.clamp(0.0, 1.0);
    description.specular = ctx.scalar_input(sink_id, SPECULAR)?.clamp(0.0, 1.0);
    description.roughness = ctx.scalar_input(sink_id, ROUGHNESS)?.clamp(0.0, 1.0);

    if let Some(texture) = find_texture_source(graph, sink_id, BASE_COLOR) {
        if let NodeKind::TextureSample {
            path: Some(path), ..
        } = &texture.kind
        {
            description.diffuse_map = Some(path.clone());
            // The map replaces the flat color; a white base leaves the
            // sampled color unscaled.
            description.diffuse_color = [1.0, 1.0, 1.0, 1.0];
            if let Some((scale, offset)) = recover_uv_transform(graph, texture, &mut ctx)? {
                description.uv_scale = scale;
                description.uv_offset = offset;
            }
        }
    }

    Ok(Some(ResolvedMaterial {
        description,
        diagnostics: ctx.take_diagnostics(),
    }))
}

/// Walk the connection chain feeding an input backward through any
/// intermediate nodes until a texture-sampling node is found.
fn find_texture_source(graph: &Graph, node_id: NodeId, input: usize) -> Option<&Node> {
    let conn = graph.connection_into(node_id, input)?;
    let source = graph.node(conn.src)?;
    let mut visited = HashSet::new();
    texture_in_chain(graph, source, &mut visited)
}

fn texture_in_chain<'g>(
    graph: &'g Graph,
    node: &'g Node,
    visited: &mut HashSet<NodeId>,
) -> Option<&'g Node> {
    if !visited.insert(node.id) {
        return None;
    }
    if matches!(node.kind, NodeKind::TextureSample { .. }) {
        return Some(node);
    }
    for input in 0..node.inputs.len() {
        let Some(conn) = graph.connection_into(node.id, input) else {
            continue;
        };
        let Some(source) = graph.node(conn.src) else {
            continue;
        };
        if let Some(texture) = texture_in_chain(graph, source, visited) {
            return Some(texture);
        }
    }
    None
}

/// Walk the chain feeding a texture node's UV input and recover an
/// effective (scale, offset).
///
/// A coordinate source contributes its explicit parameters; a panner
/// contributes its instantaneous offset. The walk passes through other
/// nodes via their first UV input and stops at the first recognized
/// contributor.
fn recover_uv_transform(
    graph: &Graph,
    texture: &Node,
    ctx: &mut EvaluationContext,
) -> Result<Option<([f32; 2], [f32; 2])>, EvaluationError> {
    let mut visited = HashSet::new();
    let mut current = graph
        .connection_into(texture.id, TEXTURE_UV)
        .and_then(|c| graph.node(c.src));

    while let Some(node) = current {
        if !visited.insert(node.id) {
            break;
        }
        match &node.kind {
            NodeKind::TexCoord { scale, offset, .. } => {
                return Ok(Some((*scale, *offset)));
            }
            NodeKind::Panner { speed } => {
                let time = ctx.scalar_input(node.id, PANNER_TIME)?;
                return Ok(Some(([1.0, 1.0], [speed[0] * time, speed[1] * time])));
            }
            _ => {
                current = node
                    .inputs
                    .iter()
                    .position(|pin| pin.kind == ValueKind::Uv)
                    .and_then(|input| graph.connection_into(node.id, input))
                    .and_then(|conn| graph.node(conn.src));
            }
        }
    }
    Ok(None)
}
