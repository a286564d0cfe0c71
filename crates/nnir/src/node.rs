//! Data-flow nodes stored in a graph's node arena.

use serde::{Deserialize, Serialize};

use crate::dtype::DType;
use crate::shape::Shape;

/// Identifies a node inside one graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Tracks whether a node's shape has been resolved.
///
/// Nodes start [`Undefined`](ShapeStatus::Undefined) and must be flipped to
/// [`Valid`](ShapeStatus::Valid) once a concrete shape is assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeStatus {
    #[default]
    Undefined,
    Valid,
}

macro_rules! impl_node_attrs {
    ($ty:ident) => {
        impl $ty {
            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn set_name(&mut self, name: impl Into<String>) {
                self.name = name.into();
            }

            pub fn dtype(&self) -> Option<DType> {
                self.dtype
            }

            pub fn set_dtype(&mut self, dtype: DType) {
                self.dtype = Some(dtype);
            }

            pub fn shape(&self) -> Option<&Shape> {
                self.shape.as_ref()
            }

            pub fn set_shape(&mut self, shape: Shape) {
                self.shape = Some(shape);
            }

            pub fn shape_status(&self) -> ShapeStatus {
                self.shape_status
            }

            pub fn set_shape_status(&mut self, status: ShapeStatus) {
                self.shape_status = status;
            }
        }
    };
}

/// Data-flow marker for one declared graph input.
///
/// Mirrors the shape and element type of its terminal and links back to it
/// via the terminal's position index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputNode {
    name: String,
    dtype: Option<DType>,
    shape: Option<Shape>,
    shape_status: ShapeStatus,
    index: Option<u32>,
}

impl InputNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Position of the paired graph input terminal, once linked.
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn set_index(&mut self, index: u32) {
        self.index = Some(index);
    }
}

impl_node_attrs!(InputNode);

/// Data-flow marker for one declared graph output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputNode {
    name: String,
    dtype: Option<DType>,
    shape: Option<Shape>,
    shape_status: ShapeStatus,
    index: Option<u32>,
    from: Option<NodeId>,
}

impl OutputNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Position of the paired graph output terminal, once linked.
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn set_index(&mut self, index: u32) {
        self.index = Some(index);
    }

    /// Node whose value this output surfaces, once wired.
    pub fn source(&self) -> Option<NodeId> {
        self.from
    }

    pub fn set_source(&mut self, from: NodeId) {
        self.from = Some(from);
    }
}

impl_node_attrs!(OutputNode);

/// Generic operation node for the computation under test.
///
/// Tests wire these between the generated input and output markers; the IR
/// slice only records the operation name and its operand links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpNode {
    name: String,
    dtype: Option<DType>,
    shape: Option<Shape>,
    shape_status: ShapeStatus,
    op: String,
    operands: Vec<NodeId>,
}

impl OpNode {
    pub(crate) fn new(op: impl Into<String>, operands: Vec<NodeId>) -> Self {
        Self {
            name: String::new(),
            dtype: None,
            shape: None,
            shape_status: ShapeStatus::Undefined,
            op: op.into(),
            operands,
        }
    }

    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn operands(&self) -> &[NodeId] {
        &self.operands
    }
}

impl_node_attrs!(OpNode);

/// Any node a graph's arena can own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Input(InputNode),
    Output(OutputNode),
    Op(OpNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Input(node) => node.name(),
            Node::Output(node) => node.name(),
            Node::Op(node) => node.name(),
        }
    }

    pub fn as_input(&self) -> Option<&InputNode> {
        match self {
            Node::Input(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_output(&self) -> Option<&OutputNode> {
        match self {
            Node::Output(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_op(&self) -> Option<&OpNode> {
        match self {
            Node::Op(node) => Some(node),
            _ => None,
        }
    }
}
