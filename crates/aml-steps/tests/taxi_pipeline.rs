//! Forma del pipeline de entrenamiento: nodos, aristas, literales y salidas.

use std::collections::HashSet;

use aml_core::{Binding, Edge, IoType, JobInput};
use aml_steps::{taxi_training_job, taxi_training_pipeline, TaxiJobInputs, TaxiSteps, MODEL_NAME};

fn steps() -> TaxiSteps {
    TaxiSteps::with_environment("taxi-env@latest").expect("steps")
}

fn edge(from_node: &str, from_output: &str, to_node: &str, to_input: &str) -> Edge {
    Edge { from_node: from_node.into(),
           from_output: from_output.into(),
           to_node: to_node.into(),
           to_input: to_input.into() }
}

#[test]
fn graph_has_four_nodes_and_exactly_five_edges() {
    let graph = taxi_training_pipeline(&steps()).unwrap();
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.nodes().map(|n| n.name()).collect::<Vec<_>>(), vec!["prep", "train", "evaluate", "register"]);

    let edges = graph.edges();
    assert_eq!(edges.len(), 5);
    let got: HashSet<Edge> = edges.into_iter().collect();
    let expected: HashSet<Edge> = [edge("prep", "train_data", "train", "train_data"),
                                   edge("prep", "test_data", "evaluate", "test_data"),
                                   edge("train", "model_output", "evaluate", "model_input"),
                                   edge("train", "model_output", "register", "model_path"),
                                   edge("evaluate", "evaluation_output", "register", "evaluation_output")].into_iter()
                                                                                                           .collect();
    assert_eq!(got, expected);
}

#[test]
fn topological_order_is_the_fixed_chain() {
    let graph = taxi_training_pipeline(&steps()).unwrap();
    assert_eq!(graph.topological_order().unwrap(), vec!["prep", "train", "evaluate", "register"]);
}

#[test]
fn model_name_literal_feeds_evaluate_and_register() {
    let graph = taxi_training_pipeline(&steps()).unwrap();
    for node in ["evaluate", "register"] {
        let binding = graph.node(node).unwrap().bindings().get("model_name").unwrap();
        assert_eq!(binding, &Binding::literal(MODEL_NAME));
    }
}

#[test]
fn pipeline_inputs_and_outputs() {
    let graph = taxi_training_pipeline(&steps()).unwrap();
    assert_eq!(graph.inputs().get("raw_data"), Some(&IoType::UriFile));
    assert_eq!(graph.inputs().get("enable_monitoring"), Some(&IoType::String));
    assert_eq!(graph.inputs().get("table_name"), Some(&IoType::String));

    let outputs: Vec<(&str, &str, &str)> = graph.outputs()
                                               .iter()
                                               .map(|(alias, (n, o))| (alias.as_str(), n.as_str(), o.as_str()))
                                               .collect();
    assert_eq!(outputs,
               vec![("pipeline_job_train_data", "prep", "train_data"),
                    ("pipeline_job_test_data", "prep", "test_data"),
                    ("pipeline_job_trained_model", "train", "model_output"),
                    ("pipeline_job_score_report", "evaluate", "evaluation_output")]);
}

#[test]
fn step_commands_keep_the_flag_contract() {
    let s = steps();
    assert_eq!(s.prep.code(), "data-science/src/prep");
    assert_eq!(s.prep.command().as_str(),
               "python prep.py --raw_data ${{inputs.raw_data}} --train_data ${{outputs.train_data}} --val_data ${{outputs.val_data}} --test_data ${{outputs.test_data}} --enable_monitoring ${{inputs.enable_monitoring}} --table_name ${{inputs.table_name}}");
    assert_eq!(s.train.display_name(), "train-model");
    assert_eq!(s.register.command().as_str(),
               "python register.py --model_name ${{inputs.model_name}} --model_path ${{inputs.model_path}} --evaluation_output ${{inputs.evaluation_output}} --model_info_output_path ${{outputs.model_info_output_path}}");
}

#[test]
fn job_binds_the_three_inputs() {
    let job = taxi_training_job(&steps(),
                                "exp1",
                                TaxiJobInputs { raw_data: "taxi-data@latest".into(),
                                                enable_monitoring: "false".into(),
                                                table_name: "taximonitoring".into() }).unwrap();
    assert_eq!(job.input("raw_data"), Some(&JobInput::asset(IoType::UriFile, "taxi-data@latest")));
    assert_eq!(job.input("enable_monitoring"), Some(&JobInput::literal("false")));
    assert_eq!(job.input("table_name"), Some(&JobInput::literal("taximonitoring")));
    assert_eq!(job.experiment_name(), "exp1");
}
