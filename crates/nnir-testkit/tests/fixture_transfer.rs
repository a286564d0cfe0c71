use anyhow::Result;
use nnir::{Graph, Module, ShapeStatus};
use nnir_testkit::{FixtureError, InputsFixture, IoFixture};

fn initialized_fixture() -> Result<IoFixture> {
    let mut fx = IoFixture::new();
    fx.init([1, 3, 4, 4].into(), [1, 3, 4, 4].into())?;
    Ok(fx)
}

#[test]
fn transfer_moves_graph_into_module() -> Result<()> {
    let mut module = Module::new();
    let mut fx = initialized_fixture()?;

    let before = module.num_graphs();
    let id = fx.transfer_to(&mut module)?;
    assert_eq!(module.num_graphs(), before + 1);

    let graph = module.graph(id).expect("transferred graph owned by module");
    assert_eq!(graph.inputs().len(), 1);
    assert_eq!(graph.outputs().len(), 1);
    graph.verify()?;
    Ok(())
}

#[test]
fn fixture_handles_are_rejected_after_transfer() -> Result<()> {
    let mut module = Module::new();
    let mut fx = initialized_fixture()?;
    fx.transfer_to(&mut module)?;

    assert_eq!(fx.input().expect_err("stale"), FixtureError::Transferred);
    assert_eq!(fx.output().expect_err("stale"), FixtureError::Transferred);
    assert_eq!(fx.graph().expect_err("stale"), FixtureError::Transferred);
    assert_eq!(
        fx.init([1].into(), [1].into()).expect_err("stale"),
        FixtureError::Transferred
    );
    Ok(())
}

#[test]
fn second_transfer_is_rejected() -> Result<()> {
    let mut module = Module::new();
    let mut fx = initialized_fixture()?;
    fx.transfer_to(&mut module)?;

    let err = fx
        .transfer_to(&mut module)
        .expect_err("owning slot already empty");
    assert_eq!(err, FixtureError::Transferred);
    assert_eq!(module.num_graphs(), 1, "failed transfer adds nothing");
    Ok(())
}

#[test]
fn transfer_before_init_is_rejected() {
    let mut module = Module::new();
    let mut fx = IoFixture::new();
    assert_eq!(
        fx.transfer_to(&mut module).expect_err("unbuilt"),
        FixtureError::NotInitialized
    );
    assert!(module.is_empty());
}

#[test]
fn attached_op_between_io_keeps_graph_consistent() -> Result<()> {
    let mut fx = initialized_fixture()?;
    let input_id = fx.input_id()?;
    let output_id = fx.output_id()?;

    let graph = fx.graph_mut()?;
    let (op_id, op) = graph.nodes_mut().create_op("relu", vec![input_id]);
    op.set_name("relu_0");
    graph
        .nodes_mut()
        .output_mut(output_id)
        .expect("output node in arena")
        .set_source(op_id);

    fx.graph()?.verify()?;
    let output = fx.output()?;
    assert_eq!(output.source(), Some(op_id));
    assert_eq!(output.shape_status(), ShapeStatus::Valid);
    Ok(())
}

#[test]
fn multi_input_graph_transfers_via_module_add() -> Result<()> {
    let mut graph = Graph::new();
    let mut fx = InputsFixture::<2>::new();
    fx.init(&mut graph, &[[1, 2].into(), [3, 4].into()])?;

    // For externally owned graphs the move into the module is the
    // transfer; the borrow checker retires every outstanding handle.
    let mut module = Module::new();
    let id = module.add(graph);

    let owned = module.graph(id).expect("graph owned by module");
    assert_eq!(owned.inputs().len(), 2);
    assert_eq!(
        owned
            .nodes()
            .input(fx.node(1).expect("second node recorded"))
            .expect("ids stay valid inside the module")
            .name(),
        "input_1"
    );
    Ok(())
}
