//! Builders that declare graph outputs and their paired data-flow nodes.

use nnir::{Graph, NodeId, Shape, ShapeStatus};

use crate::{FixtureError, FIXTURE_DTYPE};

/// Declares `N` graph output terminals and wires one output node to each.
///
/// Symmetric to [`InputsFixture`](crate::InputsFixture): same ordering,
/// naming, and type-fixing rules, applied to the graph's output table.
#[derive(Debug)]
pub struct OutputsFixture<const N: usize> {
    terminals: [Option<u32>; N],
    nodes: [Option<NodeId>; N],
}

impl<const N: usize> OutputsFixture<N> {
    pub fn new() -> Self {
        Self {
            terminals: [None; N],
            nodes: [None; N],
        }
    }

    /// Populates `graph` with `N` output terminal/node pairs, naming the
    /// k-th node `output_k`.
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
            let index = graph.outputs_mut().create().index();

            let (id, node) = graph.nodes_mut().create_output();
            node.set_shape(shape.clone());
            node.set_shape_status(ShapeStatus::Valid);
            node.set_dtype(FIXTURE_DTYPE);
            node.set_name(format!("output_{n}"));
            node.set_index(index);

            // Fresh shape value; the terminal never aliases the node's copy.
            let terminal = graph.outputs_mut().at_mut(index);
            terminal.set_shape(shape.clone());
            terminal.set_dtype(FIXTURE_DTYPE);

            self.terminals[n] = Some(index);
            self.nodes[n] = Some(id);
        }

        Ok(())
    }

    /// Output node at `idx`, or `None` before `init`.
    pub fn node(&self, idx: usize) -> Option<NodeId> {
        self.nodes[idx]
    }

    /// Terminal index paired with the node at `idx`, or `None` before `init`.
    pub fn terminal_index(&self, idx: usize) -> Option<u32> {
        self.terminals[idx]
    }

    pub fn num_outputs(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for OutputsFixture<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-output convenience wrapper over [`OutputsFixture<1>`].
#[derive(Debug, Default)]
pub struct OutputFixture {
    inner: OutputsFixture<1>,
}

impl OutputFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forwards to the generic builder with a one-element shape sequence.
    pub fn init(&mut self, graph: &mut Graph, shape: Shape) -> Result<(), FixtureError> {
        self.inner.init(graph, &[shape])
    }

    /// The sole output node, or `None` before `init`.
    pub fn node(&self) -> Option<NodeId> {
        self.inner.node(0)
    }

    pub fn terminal_index(&self) -> Option<u32> {
        self.inner.terminal_index(0)
    }
}
