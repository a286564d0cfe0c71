//! Minimal tensor IR substrate for compiler unit tests.
//!
//! A [`Graph`] owns a collection of data-flow nodes and two ordered terminal
//! tables declaring its external inputs and outputs. Terminals carry a shape
//! and an element type; input/output nodes mirror those attributes and link
//! back to their terminal by position index. A [`Module`] aggregates fully
//! built graphs under single ownership.
//!
//! ```text
//! Module
//!    |
//!    +-- Graph
//!         |
//!         +-- Nodes (arena: input / output / op nodes)
//!         |
//!         +-- Inputs  (ordered GraphInput terminals)
//!         |
//!         +-- Outputs (ordered GraphOutput terminals)
//! ```

pub mod dtype;
pub mod graph;
pub mod module;
pub mod node;
pub mod shape;

pub use dtype::DType;
pub use graph::{Graph, GraphError, GraphInput, GraphOutput, PortKind};
pub use module::{GraphId, Module};
pub use node::{InputNode, Node, NodeId, OpNode, OutputNode, ShapeStatus};
pub use shape::{DimSymbol, Dimension, Shape};
