//! Graph container: a node arena plus ordered input/output terminal tables.
//!
//! Terminals declare the graph's external contract (shape and element type
//! per position); input/output nodes are the data-flow side of the same
//! declaration and link back to their terminal by index. [`Graph::verify`]
//! checks that the two stay consistent.

use std::fmt;

use thiserror::Error;

use crate::dtype::DType;
use crate::node::{InputNode, Node, NodeId, OpNode, OutputNode, ShapeStatus};
use crate::shape::Shape;

/// Creation-ordered arena owning every node of one graph.
#[derive(Debug, Default)]
pub struct Nodes {
    records: Vec<Node>,
}

impl Nodes {
    /// Appends a fresh input node and returns its id with a handle for
    /// attribute assignment.
    pub fn create_input(&mut self) -> (NodeId, &mut InputNode) {
        let id = self.next_id();
        self.records.push(Node::Input(InputNode::new()));
        match self.records.last_mut() {
            Some(Node::Input(node)) => (id, node),
            _ => unreachable!("arena tail is the input node just pushed"),
        }
    }

    /// Appends a fresh output node and returns its id with a handle for
    /// attribute assignment.
    pub fn create_output(&mut self) -> (NodeId, &mut OutputNode) {
        let id = self.next_id();
        self.records.push(Node::Output(OutputNode::new()));
        match self.records.last_mut() {
            Some(Node::Output(node)) => (id, node),
            _ => unreachable!("arena tail is the output node just pushed"),
        }
    }

    /// Appends an operation node consuming the given operands.
    pub fn create_op(&mut self, op: impl Into<String>, operands: Vec<NodeId>) -> (NodeId, &mut OpNode) {
        let id = self.next_id();
        self.records.push(Node::Op(OpNode::new(op, operands)));
        match self.records.last_mut() {
            Some(Node::Op(node)) => (id, node),
            _ => unreachable!("arena tail is the op node just pushed"),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.records.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.records.get_mut(id.0 as usize)
    }

    /// Typed lookup; `None` when the id is unknown or names another kind.
    pub fn input(&self, id: NodeId) -> Option<&InputNode> {
        self.get(id).and_then(Node::as_input)
    }

    pub fn input_mut(&mut self, id: NodeId) -> Option<&mut InputNode> {
        match self.get_mut(id) {
            Some(Node::Input(node)) => Some(node),
            _ => None,
        }
    }

    pub fn output(&self, id: NodeId) -> Option<&OutputNode> {
        self.get(id).and_then(Node::as_output)
    }

    pub fn output_mut(&mut self, id: NodeId) -> Option<&mut OutputNode> {
        match self.get_mut(id) {
            Some(Node::Output(node)) => Some(node),
            _ => None,
        }
    }

    pub fn op(&self, id: NodeId) -> Option<&OpNode> {
        self.get(id).and_then(Node::as_op)
    }

    pub fn op_mut(&mut self, id: NodeId) -> Option<&mut OpNode> {
        match self.get_mut(id) {
            Some(Node::Op(node)) => Some(node),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx as u32), node))
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.records.len() as u32)
    }
}

macro_rules! declare_terminal {
    ($(#[$meta:meta])* $terminal:ident, $(#[$table_meta:meta])* $table:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $terminal {
            index: u32,
            shape: Option<Shape>,
            dtype: Option<DType>,
        }

        impl $terminal {
            /// Position assigned at creation time, immutable thereafter.
            pub fn index(&self) -> u32 {
                self.index
            }

            pub fn shape(&self) -> Option<&Shape> {
                self.shape.as_ref()
            }

            /// Takes an owned shape; the terminal never aliases a node's copy.
            pub fn set_shape(&mut self, shape: Shape) {
                self.shape = Some(shape);
            }

            pub fn dtype(&self) -> Option<DType> {
                self.dtype
            }

            pub fn set_dtype(&mut self, dtype: DType) {
                self.dtype = Some(dtype);
            }
        }

        $(#[$table_meta])*
        #[derive(Debug, Default)]
        pub struct $table {
            ports: Vec<$terminal>,
        }

        impl $table {
            /// Appends a terminal at the next position index.
            pub fn create(&mut self) -> &mut $terminal {
                let index = self.ports.len();
                self.ports.push($terminal {
                    index: index as u32,
                    shape: None,
                    dtype: None,
                });
                &mut self.ports[index]
            }

            /// Borrows the terminal at `index`.
            ///
            /// Indices come from [`create`](Self::create); passing anything
            /// else is a caller contract violation and panics.
            pub fn at(&self, index: u32) -> &$terminal {
                &self.ports[index as usize]
            }

            pub fn at_mut(&mut self, index: u32) -> &mut $terminal {
                &mut self.ports[index as usize]
            }

            pub fn get(&self, index: u32) -> Option<&$terminal> {
                self.ports.get(index as usize)
            }

            pub fn len(&self) -> usize {
                self.ports.len()
            }

            pub fn is_empty(&self) -> bool {
                self.ports.is_empty()
            }

            pub fn iter(&self) -> impl Iterator<Item = &$terminal> {
                self.ports.iter()
            }
        }
    };
}

declare_terminal!(
    /// Graph-level declaration of one external input slot.
    GraphInput,
    /// Ordered index table of a graph's declared inputs.
    Inputs
);

declare_terminal!(
    /// Graph-level declaration of one external output slot.
    GraphOutput,
    /// Ordered index table of a graph's declared outputs.
    Outputs
);

/// Distinguishes the input and output sides in verifier findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Input,
    Output,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKind::Input => f.write_str("input"),
            PortKind::Output => f.write_str("output"),
        }
    }
}

/// Consistency violations between data-flow nodes and terminal tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("{kind} node {node:?} is not linked to any {kind} terminal")]
    UnlinkedNode { kind: PortKind, node: NodeId },
    #[error("{kind} node {node:?} links to missing terminal index {index}")]
    DanglingLink {
        kind: PortKind,
        node: NodeId,
        index: u32,
    },
    #[error("{kind} terminal {index} is claimed by more than one node")]
    DuplicateClaim { kind: PortKind, index: u32 },
    #[error("{kind} terminal {index} has no data-flow node")]
    UnclaimedTerminal { kind: PortKind, index: u32 },
    #[error("{kind} node {node:?} and terminal {index} disagree on shape")]
    ShapeMismatch {
        kind: PortKind,
        node: NodeId,
        index: u32,
    },
    #[error("{kind} node {node:?} and terminal {index} disagree on dtype")]
    DTypeMismatch {
        kind: PortKind,
        node: NodeId,
        index: u32,
    },
    #[error("{kind} node {node:?} carries a shape but its shape status is not valid")]
    ShapeStatusNotValid { kind: PortKind, node: NodeId },
}

/// IR container holding the nodes and declared external terminals for one
/// computation.
#[derive(Debug, Default)]
pub struct Graph {
    name: Option<String>,
    nodes: Nodes,
    inputs: Inputs,
    outputs: Outputs,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn nodes(&self) -> &Nodes {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Nodes {
        &mut self.nodes
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut Inputs {
        &mut self.inputs
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn outputs_mut(&mut self) -> &mut Outputs {
        &mut self.outputs
    }

    /// Checks shape/type/index consistency between marker nodes and the
    /// terminal tables.
    ///
    /// Every input/output node must link to an existing terminal, every
    /// terminal must be claimed by exactly one node, and each pair must
    /// agree on shape and dtype. Anything beyond that pairing (operand
    /// wiring, op semantics) is out of scope here.
    pub fn verify(&self) -> Result<(), GraphError> {
        let mut input_claims = vec![false; self.inputs.len()];
        let mut output_claims = vec![false; self.outputs.len()];

        for (id, node) in self.nodes.iter() {
            match node {
                Node::Input(input) => {
                    let index = check_link(
                        PortKind::Input,
                        id,
                        input.index(),
                        &mut input_claims,
                    )?;
                    let terminal = self.inputs.at(index);
                    check_pair(
                        PortKind::Input,
                        id,
                        index,
                        input.shape(),
                        input.dtype(),
                        input.shape_status(),
                        terminal.shape(),
                        terminal.dtype(),
                    )?;
                }
                Node::Output(output) => {
                    let index = check_link(
                        PortKind::Output,
                        id,
                        output.index(),
                        &mut output_claims,
                    )?;
                    let terminal = self.outputs.at(index);
                    check_pair(
                        PortKind::Output,
                        id,
                        index,
                        output.shape(),
                        output.dtype(),
                        output.shape_status(),
                        terminal.shape(),
                        terminal.dtype(),
                    )?;
                }
                Node::Op(_) => {}
            }
        }

        for (index, claimed) in input_claims.iter().enumerate() {
            if !claimed {
                return Err(GraphError::UnclaimedTerminal {
                    kind: PortKind::Input,
                    index: index as u32,
                });
            }
        }
        for (index, claimed) in output_claims.iter().enumerate() {
            if !claimed {
                return Err(GraphError::UnclaimedTerminal {
                    kind: PortKind::Output,
                    index: index as u32,
                });
            }
        }

        Ok(())
    }
}

fn check_link(
    kind: PortKind,
    node: NodeId,
    index: Option<u32>,
    claims: &mut [bool],
) -> Result<u32, GraphError> {
    let index = index.ok_or(GraphError::UnlinkedNode { kind, node })?;
    let slot = claims
        .get_mut(index as usize)
        .ok_or(GraphError::DanglingLink { kind, node, index })?;
    if *slot {
        return Err(GraphError::DuplicateClaim { kind, index });
    }
    *slot = true;
    Ok(index)
}

#[allow(clippy::too_many_arguments)]
fn check_pair(
    kind: PortKind,
    node: NodeId,
    index: u32,
    node_shape: Option<&Shape>,
    node_dtype: Option<DType>,
    node_status: ShapeStatus,
    terminal_shape: Option<&Shape>,
    terminal_dtype: Option<DType>,
) -> Result<(), GraphError> {
    if node_shape != terminal_shape {
        return Err(GraphError::ShapeMismatch { kind, node, index });
    }
    if node_dtype != terminal_dtype {
        return Err(GraphError::DTypeMismatch { kind, node, index });
    }
    if node_shape.is_some() && node_status != ShapeStatus::Valid {
        return Err(GraphError::ShapeStatusNotValid { kind, node });
    }
    Ok(())
}
