// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// A directed connection from an output pin to an input pin.
///
/// Endpoints are addressed by pin index; structural rewrites (split and
/// promote) re-index existing connections in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Source node ID
    pub src: NodeId,
    /// Source output pin index
    pub src_output: usize,
    /// Destination node ID
    pub dst: NodeId,
    /// Destination input pin index
    pub dst_input: usize,
}

impl Connection {
    /// Create a new connection.
    pub fn new(src: NodeId, src_output: usize, dst: NodeId, dst_input: usize) -> Self {
        Self {
            src,
            src_output,
            dst,
            dst_input,
        }
    }

    /// Check if this connection touches a specific node.
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.src == node_id || self.dst == node_id
    }

    /// Check if this connection originates from a specific output pin.
    pub fn from_output(&self, node_id: NodeId, output: usize) -> bool {
        self.src == node_id && self.src_output == output
    }

    /// Check if this connection feeds a specific input pin.
    pub fn into_input(&self, node_id: NodeId, input: usize) -> bool {
        self.dst == node_id && self.dst_input == input
    }
}
