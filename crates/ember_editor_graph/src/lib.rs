// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material node graph engine for Ember Editor.
//!
//! A typed node-graph evaluation core for authoring materials visually:
//! constants, arithmetic, conversions, time-varying utilities, and texture
//! sampling flow into a single sink node holding the final surface
//! attributes.
//!
//! ## Architecture
//!
//! - Typed pins with registry-defined compatibility and conversion
//! - Structural rewrites: splitting composite outputs into channels and
//!   promoting them back, with connection re-indexing
//! - Memoized, side-effect-free recursive evaluation with fail-fast cycle
//!   detection
//! - A resolution pass flattening the sink into a [`MaterialDescription`]
//!
//! The on-screen editor, renderer, and scene systems are external callers:
//! they mutate the [`Graph`] between passes and consume the resolved
//! material.

pub mod connection;
pub mod evaluation;
pub mod graph;
pub mod material;
pub mod node;
pub mod nodes;
pub mod pin;
pub mod texture;
pub mod value;

pub use connection::Connection;
pub use evaluation::{EvaluationContext, EvaluationError, FrameInputs, NodeDiagnostic};
pub use graph::Graph;
pub use material::{resolve_material, MaterialDescription, ResolvedMaterial};
pub use node::{Node, NodeId};
pub use nodes::{ArithmeticOp, NodeKind, UnaryOp};
pub use pin::{Pin, SplitChannel};
pub use texture::{TextureCache, TextureData, TextureError};
pub use value::{
    combine_components, convert, extract_component, ComponentOutOfRange, KindDef, Value,
    ValueKind,
};
