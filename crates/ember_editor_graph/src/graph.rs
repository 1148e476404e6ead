// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure: nodes, connections, and structural rewrites.

use crate::connection::Connection;
use crate::node::{Node, NodeId};
use crate::nodes::NodeKind;
use crate::pin::Pin;
use crate::value::{extract_component, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A material node graph.
///
/// Structurally invalid edit requests are rejected by returning `false`
/// rather than erroring; the graph is edited incrementally and must always
/// stay evaluable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    nodes: IndexMap<NodeId, Node>,
    connections: Vec<Connection>,
    next_id: u64,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a node of the given kind, allocating its ID.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, kind));
        id
    }

    /// Remove a node and every connection touching it.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections.retain(|c| !c.involves_node(node_id));
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID.
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID.
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Iterate over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All connections.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// The connection feeding an input pin, if any. Fan-in is at most one.
    pub fn connection_into(&self, node_id: NodeId, input: usize) -> Option<&Connection> {
        self.connections.iter().find(|c| c.into_input(node_id, input))
    }

    /// Connections fanning out from an output pin.
    pub fn connections_from(
        &self,
        node_id: NodeId,
        output: usize,
    ) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(move |c| c.from_output(node_id, output))
    }

    /// The graph's sink node, identified by its role marker.
    pub fn sink(&self) -> Option<&Node> {
        self.nodes.values().find(|n| n.is_sink())
    }

    /// Connect an output pin to an input pin.
    ///
    /// No-ops (returning `false`) unless both nodes exist and differ, both
    /// pin indices are in range, and the kinds are compatible. A split
    /// scalar channel never connects into a multi-component input: a single
    /// channel must not silently fill all components. Any existing
    /// connection into the destination is replaced.
    pub fn connect(
        &mut self,
        src: NodeId,
        src_output: usize,
        dst: NodeId,
        dst_input: usize,
    ) -> bool {
        if src == dst {
            tracing::debug!("rejected connection: same node {src:?}");
            return false;
        }
        let (Some(src_node), Some(dst_node)) = (self.nodes.get(&src), self.nodes.get(&dst))
        else {
            return false;
        };
        let (Some(out_pin), Some(in_pin)) =
            (src_node.output(src_output), dst_node.input(dst_input))
        else {
            return false;
        };
        if !out_pin.kind.compatible_with(in_pin.kind) {
            tracing::debug!(
                "rejected connection: {:?} output does not feed {:?} input",
                out_pin.kind,
                in_pin.kind
            );
            return false;
        }
        if out_pin.is_split_channel() && in_pin.kind.definition().component_count > 1 {
            tracing::debug!("rejected connection: split channel into composite input");
            return false;
        }

        self.connections.retain(|c| !c.into_input(dst, dst_input));
        self.connections.push(Connection::new(src, src_output, dst, dst_input));
        true
    }

    /// Remove the connection feeding an input pin, if any.
    pub fn disconnect_input(&mut self, dst: NodeId, dst_input: usize) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| !c.into_input(dst, dst_input));
        self.connections.len() != before
    }

    /// Split a composite output pin into per-channel scalar pins.
    ///
    /// Valid only for splittable kinds. The pin is replaced in place by one
    /// scalar pin per component, labelled with the kind's component names
    /// and tagged with the origin kind. Outgoing connections from the split
    /// pin are dropped (their types can no longer match); connections from
    /// later pins are re-indexed.
    pub fn split_output(&mut self, node_id: NodeId, output: usize) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        let Some(pin) = node.outputs.get(output) else {
            return false;
        };
        if pin.is_split_channel() || !pin.kind.definition().splittable {
            return false;
        }

        let kind = pin.kind;
        let base_default = pin.default_value;
        let channels: Vec<Pin> = kind
            .definition()
            .component_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let default = extract_component(base_default, kind, i).unwrap_or(0.0);
                Pin::split_channel(*name, kind, i, Value::Scalar(default))
            })
            .collect();
        let count = channels.len();
        node.outputs.splice(output..=output, channels);

        self.connections.retain(|c| !c.from_output(node_id, output));
        for c in &mut self.connections {
            if c.src == node_id && c.src_output > output {
                c.src_output += count - 1;
            }
        }
        true
    }

    /// Promote a run of split channels back into one composite pin.
    ///
    /// Inverse of [`Graph::split_output`]. The contiguous run is located
    /// from the pin's recorded origin kind and channel index and must be
    /// complete. Connections sourced inside the run are redirected to the
    /// promoted pin; connections sourced after it are re-indexed.
    pub fn promote_output(&mut self, node_id: NodeId, output: usize) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        let Some(pin) = node.outputs.get(output) else {
            return false;
        };
        let Some(channel) = pin.channel else {
            return false;
        };

        let origin = channel.origin;
        let count = origin.definition().component_count;
        if channel.index >= count {
            return false;
        }
        let Some(start) = output.checked_sub(channel.index) else {
            return false;
        };
        if start + count > node.outputs.len() {
            return false;
        }
        // The run must be this origin's channels 0..count in order; the
        // channel indices keep two adjacent runs of the same kind apart.
        for i in 0..count {
            match node.outputs[start + i].channel {
                Some(ch) if ch.origin == origin && ch.index == i => {}
                _ => return false,
            }
        }

        let promoted = Pin::output(origin.definition().name, origin);
        node.outputs.splice(start..start + count, [promoted]);

        for c in &mut self.connections {
            if c.src != node_id {
                continue;
            }
            if (start..start + count).contains(&c.src_output) {
                c.src_output = start;
            } else if c.src_output >= start + count {
                c.src_output -= count - 1;
            }
        }
        true
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
