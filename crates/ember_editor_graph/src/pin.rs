// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pin definitions for node inputs/outputs.

use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};

/// Marker on an output pin that represents one channel of a previously
/// composite output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitChannel {
    /// Channel index within the original composite value
    pub index: usize,
    /// The kind the pin was split from, recorded at split time so that
    /// promotion never has to re-infer it
    pub origin: ValueKind,
}

/// A typed input or output slot on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Pin label
    pub label: String,
    /// Data kind
    pub kind: ValueKind,
    /// Value used when the pin is unconnected
    pub default_value: Value,
    /// Split-channel marker (output pins only)
    pub channel: Option<SplitChannel>,
}

impl Pin {
    /// Create an input pin with the kind's default value.
    pub fn input(label: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            label: label.into(),
            kind,
            default_value: kind.default_value(),
            channel: None,
        }
    }

    /// Create an output pin with the kind's default value.
    pub fn output(label: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            label: label.into(),
            kind,
            default_value: kind.default_value(),
            channel: None,
        }
    }

    /// Create a scalar output pin standing in for one channel of a split
    /// composite output.
    pub fn split_channel(
        label: impl Into<String>,
        origin: ValueKind,
        index: usize,
        default_value: Value,
    ) -> Self {
        Self {
            label: label.into(),
            kind: ValueKind::Scalar,
            default_value,
            channel: Some(SplitChannel { index, origin }),
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = value;
        self
    }

    /// Whether this pin is a split channel of a composite output.
    pub fn is_split_channel(&self) -> bool {
        self.channel.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_carries_kind_default() {
        let pin = Pin::input("UV", ValueKind::Uv);
        assert_eq!(pin.default_value, Value::Vec2([0.0, 0.0]));
        assert!(!pin.is_split_channel());
    }

    #[test]
    fn test_split_channel_is_scalar() {
        let pin = Pin::split_channel("G", ValueKind::Color, 1, Value::Scalar(0.5));
        assert_eq!(pin.kind, ValueKind::Scalar);
        assert_eq!(
            pin.channel,
            Some(SplitChannel {
                index: 1,
                origin: ValueKind::Color
            })
        );
    }
}
