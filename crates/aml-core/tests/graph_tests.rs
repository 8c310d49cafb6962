use aml_core::{Binding, CommandStep, GraphError, IoType, PipelineBuilder};

fn producer() -> CommandStep {
    CommandStep::builder("produce").command("gen --in ${{inputs.src}} --out ${{outputs.data}}")
                                   .input("src", IoType::UriFile)
                                   .output("data", IoType::UriFolder)
                                   .build()
                                   .expect("producer")
}

fn consumer() -> CommandStep {
    CommandStep::builder("consume").command("use --data ${{inputs.data}} --label ${{inputs.label}} --out ${{outputs.report}}")
                                   .input("data", IoType::UriFolder)
                                   .input("label", IoType::String)
                                   .output("report", IoType::UriFolder)
                                   .build()
                                   .expect("consumer")
}

#[test]
fn linear_graph_builds_with_edges_and_order() {
    let mut b = PipelineBuilder::new("demo");
    let src = b.input("src", IoType::UriFile).unwrap();
    let p = b.add_node("p", &producer(), [("src", src)]).unwrap();
    let c = b.add_node("c", &consumer(), [("data", Binding::from(p.output("data").unwrap())), ("label", Binding::literal("x"))])
             .unwrap();
    b.output("final_report", c.output("report").unwrap()).unwrap();
    let graph = b.build().expect("valid graph");

    assert_eq!(graph.len(), 2);
    let edges = graph.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!((edges[0].from_node.as_str(), edges[0].from_output.as_str()), ("p", "data"));
    assert_eq!((edges[0].to_node.as_str(), edges[0].to_input.as_str()), ("c", "data"));
    assert_eq!(graph.topological_order().unwrap(), vec!["p", "c"]);
    assert_eq!(graph.output_type("final_report"), Some(IoType::UriFolder));
    assert_eq!(graph.output_alias("c", "report"), Some("final_report"));
}

#[test]
fn unbound_input_is_rejected() {
    let mut b = PipelineBuilder::new("demo");
    let src = b.input("src", IoType::UriFile).unwrap();
    let p = b.add_node("p", &producer(), [("src", src)]).unwrap();
    b.add_node("c", &consumer(), [("data", p.output("data").unwrap())]).unwrap();
    assert_eq!(b.build().unwrap_err(),
               GraphError::UnboundInput { node: "c".into(), input: "label".into() });
}

#[test]
fn literal_cannot_feed_a_data_input() {
    let mut b = PipelineBuilder::new("demo");
    b.add_node("p", &producer(), [("src", Binding::literal("file.csv"))]).unwrap();
    assert_eq!(b.build().unwrap_err(),
               GraphError::TypeMismatch { node: "p".into(),
                                          input: "src".into(),
                                          expected: IoType::UriFile,
                                          found: IoType::String });
}

#[test]
fn unknown_output_and_input_are_reported() {
    let mut b = PipelineBuilder::new("demo");
    let src = b.input("src", IoType::UriFile).unwrap();
    let p = b.add_node("p", &producer(), [("src", src.clone())]).unwrap();
    assert!(matches!(p.output("nope"), Err(GraphError::UnknownOutput { .. })));

    b.add_node("q", &producer(), [("src", src.clone()), ("extra", src)]).unwrap();
    assert_eq!(b.build().unwrap_err(),
               GraphError::UnknownInput { node: "q".into(), input: "extra".into() });
}

#[test]
fn duplicates_are_rejected() {
    let mut b = PipelineBuilder::new("demo");
    let src = b.input("src", IoType::UriFile).unwrap();
    assert_eq!(b.input("src", IoType::UriFile).unwrap_err(), GraphError::DuplicatePipelineInput("src".into()));
    let p = b.add_node("p", &producer(), [("src", src.clone())]).unwrap();
    assert_eq!(b.add_node("p", &producer(), [("src", src)]).unwrap_err(), GraphError::DuplicateNode("p".into()));
    b.output("o", p.output("data").unwrap()).unwrap();
    assert_eq!(b.output("o", p.output("data").unwrap()).unwrap_err(), GraphError::DuplicatePipelineOutput("o".into()));
}

#[test]
fn forward_references_forming_a_cycle_are_rejected() {
    let relay = CommandStep::builder("relay").command("relay ${{inputs.data}} ${{outputs.data_out}}")
                                             .input("data", IoType::UriFolder)
                                             .output("data_out", IoType::UriFolder)
                                             .build()
                                             .unwrap();
    let mut b = PipelineBuilder::new("loop");
    b.add_node("a", &relay, [("data", Binding::node_output("b", "data_out"))]).unwrap();
    b.add_node("b", &relay, [("data", Binding::node_output("a", "data_out"))]).unwrap();
    assert!(matches!(b.build(), Err(GraphError::Cycle(_))));
}

#[test]
fn definition_hash_is_stable_and_sensitive() {
    let build = |label: &str| {
        let mut b = PipelineBuilder::new("demo");
        let src = b.input("src", IoType::UriFile).unwrap();
        let p = b.add_node("p", &producer(), [("src", src)]).unwrap();
        b.add_node("c", &consumer(), [("data", Binding::from(p.output("data").unwrap())), ("label", Binding::literal(label))])
         .unwrap();
        b.build().unwrap()
    };
    assert_eq!(build("x").definition_hash(), build("x").definition_hash());
    assert_ne!(build("x").definition_hash(), build("y").definition_hash());
}
