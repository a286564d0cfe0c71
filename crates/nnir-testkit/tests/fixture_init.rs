use anyhow::Result;
use nnir::{DType, Graph, NodeId, Shape, ShapeStatus};
use nnir_testkit::{FixtureError, InputsFixture, IoFixture, OutputsFixture};

#[test]
fn single_io_fixture_builds_named_valid_float_nodes() -> Result<()> {
    let mut fx = IoFixture::new();
    fx.init([1, 3, 4, 4].into(), [1, 3, 4, 4].into())?;

    let input = fx.input()?;
    assert_eq!(input.name(), "input_0");
    assert_eq!(input.shape_status(), ShapeStatus::Valid);
    assert_eq!(input.dtype(), Some(DType::F32));
    assert_eq!(input.shape(), Some(&Shape::from([1, 3, 4, 4])));

    let output = fx.output()?;
    assert_eq!(output.name(), "output_0");
    assert_eq!(output.shape_status(), ShapeStatus::Valid);
    assert_eq!(output.dtype(), Some(DType::F32));
    assert_eq!(output.shape(), Some(&Shape::from([1, 3, 4, 4])));

    fx.graph()?.verify()?;
    Ok(())
}

#[test]
fn two_input_builder_assigns_shapes_in_order() -> Result<()> {
    let mut graph = Graph::new();
    let mut fx = InputsFixture::<2>::new();
    fx.init(&mut graph, &[[1, 2].into(), [3, 4].into()])?;

    assert_eq!(fx.num_inputs(), 2);

    let first = graph
        .nodes()
        .input(fx.node(0).expect("first node recorded"))
        .expect("first input node in arena");
    assert_eq!(first.name(), "input_0");
    assert_eq!(first.shape(), Some(&Shape::from([1, 2])));

    let second = graph
        .nodes()
        .input(fx.node(1).expect("second node recorded"))
        .expect("second input node in arena");
    assert_eq!(second.name(), "input_1");
    assert_eq!(second.shape(), Some(&Shape::from([3, 4])));
    Ok(())
}

#[test]
fn input_names_are_positional_with_no_gaps() -> Result<()> {
    let mut graph = Graph::new();
    let mut fx = InputsFixture::<3>::new();
    fx.init(
        &mut graph,
        &[[1].into(), [2].into(), [3].into()],
    )?;

    for n in 0..3 {
        let node = graph
            .nodes()
            .input(fx.node(n).expect("node recorded"))
            .expect("input node in arena");
        assert_eq!(node.name(), format!("input_{n}"));
    }
    Ok(())
}

#[test]
fn output_builder_is_symmetric_to_input_builder() -> Result<()> {
    let mut graph = Graph::new();
    let mut fx = OutputsFixture::<2>::new();
    fx.init(&mut graph, &[[2, 2].into(), [5].into()])?;

    assert_eq!(fx.num_outputs(), 2);
    assert_eq!(graph.outputs().len(), 2);

    for n in 0..2 {
        let node = graph
            .nodes()
            .output(fx.node(n).expect("node recorded"))
            .expect("output node in arena");
        assert_eq!(node.name(), format!("output_{n}"));
        assert_eq!(node.shape_status(), ShapeStatus::Valid);
        assert_eq!(node.dtype(), Some(DType::F32));
    }
    Ok(())
}

#[test]
fn node_and_terminal_round_trip_by_index() -> Result<()> {
    let mut graph = Graph::new();
    let mut fx = InputsFixture::<2>::new();
    fx.init(&mut graph, &[[1, 2].into(), [3, 4].into()])?;

    for n in 0..2 {
        let node = graph
            .nodes()
            .input(fx.node(n).expect("node recorded"))
            .expect("input node in arena");
        let index = node.index().expect("node linked to its terminal");
        assert_eq!(Some(index), fx.terminal_index(n));

        let terminal = graph.inputs().at(index);
        assert_eq!(terminal.index(), index);
        assert_eq!(terminal.shape(), node.shape(), "pair agrees on shape");
        assert_eq!(terminal.dtype(), node.dtype());
    }
    Ok(())
}

#[test]
fn init_with_wrong_shape_count_fails_before_building() {
    let mut graph = Graph::new();
    let mut fx = InputsFixture::<2>::new();

    let err = fx
        .init(&mut graph, &[[1, 2].into()])
        .expect_err("length mismatch is fixture misuse");
    assert_eq!(
        err,
        FixtureError::ShapeCountMismatch {
            expected: 2,
            got: 1
        }
    );

    // The check runs before any terminal or node is created.
    assert!(graph.inputs().is_empty());
    assert!(graph.nodes().is_empty());
    assert_eq!(fx.node(0), None);
}

#[test]
fn init_twice_is_rejected() -> Result<()> {
    let mut graph = Graph::new();
    let mut fx = InputsFixture::<1>::new();
    fx.init(&mut graph, &[[2].into()])?;

    let err = fx
        .init(&mut graph, &[[2].into()])
        .expect_err("second init is rejected");
    assert_eq!(err, FixtureError::AlreadyInitialized);
    assert_eq!(graph.inputs().len(), 1, "graph untouched by rejected init");
    Ok(())
}

#[test]
fn accessors_before_init_return_no_handles() {
    let fx = InputsFixture::<2>::new();
    assert_eq!(fx.node(0), None);
    assert_eq!(fx.node(1), None);
    assert_eq!(fx.terminal_index(0), None);

    let io = IoFixture::new();
    assert_eq!(io.input_id().expect_err("unbuilt"), FixtureError::NotInitialized);
    assert_eq!(io.output_id().expect_err("unbuilt"), FixtureError::NotInitialized);
}

#[test]
fn fixture_only_mutates_the_passed_graph() -> Result<()> {
    let mut graph = Graph::new();
    let untouched = Graph::new();
    let mut fx = InputsFixture::<1>::new();
    fx.init(&mut graph, &[[4].into()])?;

    assert_eq!(graph.nodes().len(), 1);
    assert!(untouched.nodes().is_empty());
    assert!(untouched.inputs().is_empty());

    // Ids recorded by the fixture resolve inside the populated graph only.
    assert_eq!(fx.node(0), Some(NodeId(0)));
    assert!(untouched.nodes().get(NodeId(0)).is_none());
    Ok(())
}
