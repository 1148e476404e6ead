// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node identity and the node instance model.

use crate::nodes::NodeKind;
use crate::pin::{Pin, SplitChannel};
use serde::{Deserialize, Serialize};

/// Unique identifier for a node, monotonic per graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

/// A node instance in the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Behavior and parameters
    pub kind: NodeKind,
    /// Input pins
    pub inputs: Vec<Pin>,
    /// Output pins
    pub outputs: Vec<Pin>,
}

impl Node {
    /// Create a node with the pin layout declared by its kind.
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        let inputs = kind.input_pins();
        let outputs = kind.output_pins();
        Self {
            id,
            kind,
            inputs,
            outputs,
        }
    }

    /// Get an input pin by index.
    pub fn input(&self, index: usize) -> Option<&Pin> {
        self.inputs.get(index)
    }

    /// Get an output pin by index.
    pub fn output(&self, index: usize) -> Option<&Pin> {
        self.outputs.get(index)
    }

    /// Whether this node is the material sink.
    pub fn is_sink(&self) -> bool {
        self.kind.is_sink()
    }

    /// Map a physical output pin index to its logical output.
    ///
    /// A contiguous run of split-channel pins counts as a single logical
    /// output: the node's evaluate function is indexed by logical outputs,
    /// and the channel (when present) selects one component of that value.
    pub fn logical_output(&self, pin_index: usize) -> Option<(usize, Option<SplitChannel>)> {
        if pin_index >= self.outputs.len() {
            return None;
        }
        let mut logical = 0usize;
        for (i, pin) in self.outputs.iter().enumerate() {
            let starts_run = pin.channel.map_or(true, |ch| ch.index == 0);
            if i > 0 && starts_run {
                logical += 1;
            }
            if i == pin_index {
                return Some((logical, pin.channel));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Value, ValueKind};

    #[test]
    fn test_logical_output_without_splits() {
        let node = Node::new(
            NodeId(1),
            NodeKind::TextureSample {
                path: None,
                uv_scale: [1.0, 1.0],
                uv_offset: [0.0, 0.0],
            },
        );
        assert_eq!(node.logical_output(0), Some((0, None)));
        assert_eq!(node.logical_output(1), Some((1, None)));
        assert_eq!(node.logical_output(2), None);
    }

    #[test]
    fn test_logical_output_through_split_run() {
        let mut node = Node::new(
            NodeId(1),
            NodeKind::TextureSample {
                path: None,
                uv_scale: [1.0, 1.0],
                uv_offset: [0.0, 0.0],
            },
        );
        // Replace the RGBA output with four split channels by hand; the
        // Alpha output slides to index 4.
        let channels: Vec<Pin> = ["R", "G", "B", "A"]
            .iter()
            .enumerate()
            .map(|(i, label)| {
                Pin::split_channel(*label, ValueKind::Color, i, Value::Scalar(0.0))
            })
            .collect();
        node.outputs.splice(0..=0, channels);

        for i in 0..4 {
            let (logical, channel) = node.logical_output(i).unwrap();
            assert_eq!(logical, 0);
            assert_eq!(channel.unwrap().index, i);
        }
        assert_eq!(node.logical_output(4), Some((1, None)));
    }
}
