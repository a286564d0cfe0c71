//! Aggregate ownership of multiple graphs.

use crate::graph::Graph;

/// Identifies a graph inside one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(pub u32);

/// Owns zero or more graphs; receiving a graph is a one-way transfer.
///
/// `add` takes the graph by value, so the previous owner's claim ends at
/// the call site and the borrow checker retires any outstanding handles.
#[derive(Debug, Default)]
pub struct Module {
    graphs: Vec<Graph>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves a fully built graph into the module and returns its id.
    pub fn add(&mut self, graph: Graph) -> GraphId {
        let id = GraphId(self.graphs.len() as u32);
        self.graphs.push(graph);
        id
    }

    pub fn graph(&self, id: GraphId) -> Option<&Graph> {
        self.graphs.get(id.0 as usize)
    }

    pub fn graph_mut(&mut self, id: GraphId) -> Option<&mut Graph> {
        self.graphs.get_mut(id.0 as usize)
    }

    pub fn num_graphs(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Iterates graphs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (GraphId, &Graph)> {
        self.graphs
            .iter()
            .enumerate()
            .map(|(idx, graph)| (GraphId(idx as u32), graph))
    }
}
