//! Builders that declare graph inputs and their paired data-flow nodes.

use nnir::{Graph, NodeId, Shape, ShapeStatus};

use crate::{FixtureError, FIXTURE_DTYPE};

/// Declares `N` graph input terminals and wires one input node to each.
///
/// The terminal count is fixed per instantiation; `init` checks the shape
/// sequence length against it at runtime and refuses to touch the graph on
/// mismatch.
#[derive(Debug)]
pub struct InputsFixture<const N: usize> {
    terminals: [Option<u32>; N],
    nodes: [Option<NodeId>; N],
}

impl<const N: usize> InputsFixture<N> {
    pub fn new() -> Self {
        Self {
            terminals: [None; N],
            nodes: [None; N],
        }
    }

    /// Populates `graph` with `N` input terminal/node pairs.
    ///
    /// For each position `n`, in order: a terminal is created on the
    /// graph's input table, an input node is created in the arena with
    /// shape `shapes[n]`, a valid shape status, the fixed float element
    /// type, and the name `input_n`, the node is linked to the terminal's
    /// index, and the terminal receives its own freshly constructed shape
    /// copy plus the same element type.
    pub fn init(&mut self, graph: &mut Graph, shapes: &[Shape]) -> Result<(), FixtureError> {
        if shapes.len() != N {
            return Err(FixtureError::ShapeCountMismatch {
                expected: N,
                got: shapes.len(),
            });
        }
        if self.nodes.iter().any(Option::is_some) {
            return Err(FixtureError::AlreadyInitialized);
        }

        for (n, shape) in shapes.iter().enumerate() {
            let index = graph.inputs_mut().create().index();

            let (id, node) = graph.nodes_mut().create_input();
            node.set_shape(shape.clone());
            node.set_shape_status(ShapeStatus::Valid);
            node.set_dtype(FIXTURE_DTYPE);
            node.set_name(format!("input_{n}"));
            node.set_index(index);

            // Fresh shape value; the terminal never aliases the node's copy.
            let terminal = graph.inputs_mut().at_mut(index);
            terminal.set_shape(shape.clone());
            terminal.set_dtype(FIXTURE_DTYPE);

            self.terminals[n] = Some(index);
            self.nodes[n] = Some(id);
        }

        Ok(())
    }

    /// Input node at `idx`, or `None` before `init`.
    ///
    /// `idx` is bounds-checked by caller contract, not re-validated.
    pub fn node(&self, idx: usize) -> Option<NodeId> {
        self.nodes[idx]
    }

    /// Terminal index paired with the node at `idx`, or `None` before `init`.
    pub fn terminal_index(&self, idx: usize) -> Option<u32> {
        self.terminals[idx]
    }

    pub fn num_inputs(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for InputsFixture<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-input convenience wrapper over [`InputsFixture<1>`].
#[derive(Debug, Default)]
pub struct InputFixture {
    inner: InputsFixture<1>,
}

impl InputFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forwards to the generic builder with a one-element shape sequence.
    pub fn init(&mut self, graph: &mut Graph, shape: Shape) -> Result<(), FixtureError> {
        self.inner.init(graph, &[shape])
    }

    /// The sole input node, or `None` before `init`.
    pub fn node(&self) -> Option<NodeId> {
        self.inner.node(0)
    }

    pub fn terminal_index(&self) -> Option<u32> {
        self.inner.terminal_index(0)
    }
}
