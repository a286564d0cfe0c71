//! Combined single-input/single-output fixture owning its graph.

use nnir::{Graph, GraphId, InputNode, Module, NodeId, OutputNode, Shape};

use crate::inputs::InputFixture;
use crate::outputs::OutputFixture;
use crate::FixtureError;

/// One graph with one declared input and one declared output.
///
/// The fixture creates and owns the graph; an [`InputFixture`] and an
/// [`OutputFixture`] populate it side by side. Tests read back the marker
/// nodes, attach the computation under test between them through
/// [`graph_mut`](Self::graph_mut), and may finally move the graph into a
/// [`Module`] for multi-graph scenarios.
///
/// The fixture walks a strict `Unbuilt -> Initialized -> Transferred`
/// state machine: accessors fail with
/// [`FixtureError::NotInitialized`] before [`init`](Self::init) and with
/// [`FixtureError::Transferred`] once [`transfer_to`](Self::transfer_to)
/// has given the graph away.
#[derive(Debug)]
pub struct IoFixture {
    graph: Option<Graph>,
    inputs: InputFixture,
    outputs: OutputFixture,
}

impl Default for IoFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl IoFixture {
    pub fn new() -> Self {
        Self {
            graph: Some(Graph::new()),
            inputs: InputFixture::new(),
            outputs: OutputFixture::new(),
        }
    }

    /// Declares the input then the output on the shared graph, in that
    /// order. Downstream wiring code conventionally assumes inputs exist
    /// before outputs, though the two terminal tables are independent.
    pub fn init(&mut self, shape_in: Shape, shape_out: Shape) -> Result<(), FixtureError> {
        let graph = self.graph.as_mut().ok_or(FixtureError::Transferred)?;
        self.inputs.init(graph, shape_in)?;
        self.outputs.init(graph, shape_out)?;
        Ok(())
    }

    pub fn graph(&self) -> Result<&Graph, FixtureError> {
        self.graph.as_ref().ok_or(FixtureError::Transferred)
    }

    pub fn graph_mut(&mut self) -> Result<&mut Graph, FixtureError> {
        self.graph.as_mut().ok_or(FixtureError::Transferred)
    }

    /// Id of the sole input node.
    pub fn input_id(&self) -> Result<NodeId, FixtureError> {
        self.graph()?;
        self.inputs.node().ok_or(FixtureError::NotInitialized)
    }

    /// Id of the sole output node.
    pub fn output_id(&self) -> Result<NodeId, FixtureError> {
        self.graph()?;
        self.outputs.node().ok_or(FixtureError::NotInitialized)
    }

    /// The sole input node.
    pub fn input(&self) -> Result<&InputNode, FixtureError> {
        let id = self.input_id()?;
        Ok(self
            .graph()?
            .nodes()
            .input(id)
            .expect("fixture input node was created during init"))
    }

    /// The sole output node.
    pub fn output(&self) -> Result<&OutputNode, FixtureError> {
        let id = self.output_id()?;
        Ok(self
            .graph()?
            .nodes()
            .output(id)
            .expect("fixture output node was created during init"))
    }

    /// Moves the owned graph into `module`, ending this fixture's
    /// ownership claim.
    ///
    /// One-shot: the fixture lands in its terminal state and every later
    /// call through it, including a second transfer, fails with
    /// [`FixtureError::Transferred`]. The graph itself stays valid inside
    /// the module.
    pub fn transfer_to(&mut self, module: &mut Module) -> Result<GraphId, FixtureError> {
        if self.inputs.node().is_none() {
            return Err(FixtureError::NotInitialized);
        }
        let graph = self.graph.take().ok_or(FixtureError::Transferred)?;
        Ok(module.add(graph))
    }
}
