use aml_client::rest::wire::{encode_pipeline_job, DEFINITION_HASH_PROPERTY};
use aml_client::WorkspaceScope;
use aml_core::constants::DEFAULT_DATASTORE;
use aml_steps::{taxi_training_job, TaxiJobInputs, TaxiSteps};
use serde_json::Value;

fn scope() -> WorkspaceScope {
    WorkspaceScope { endpoint: "https://management.azure.com".into(),
                     subscription_id: "sub".into(),
                     resource_group: "rg".into(),
                     workspace_name: "ws".into() }
}

fn encoded() -> Value {
    let steps = TaxiSteps::with_environment("taxi-env@latest").unwrap();
    let mut job = taxi_training_job(&steps,
                                    "exp1",
                                    TaxiJobInputs { raw_data: "taxi-data@latest".into(),
                                                    enable_monitoring: "false".into(),
                                                    table_name: "taximonitoring".into() }).unwrap();
    job.settings.default_compute = Some("cpu-cluster".into());
    job.settings.default_datastore = Some(DEFAULT_DATASTORE.into());
    encode_pipeline_job(&job, &scope())
}

#[test]
fn pipeline_body_has_four_command_jobs() {
    let body = encoded();
    let props = &body["properties"];
    assert_eq!(props["jobType"], "Pipeline");
    assert_eq!(props["experimentName"], "exp1");
    let jobs = props["jobs"].as_object().unwrap();
    let names: Vec<&str> = jobs.keys().map(|k| k.as_str()).collect();
    assert_eq!(names.len(), 4);
    for n in ["prep", "train", "evaluate", "register"] {
        assert!(jobs.contains_key(n), "missing node {n}");
        assert_eq!(jobs[n]["component"]["environment"], "azureml:taxi-env@latest");
    }
    assert!(props["properties"][DEFINITION_HASH_PROPERTY].is_string());
}

#[test]
fn code_is_sent_as_relative_path() {
    let body = encoded();
    let jobs = &body["properties"]["jobs"];
    assert_eq!(jobs["prep"]["component"]["code"], "data-science/src/prep");
    assert_eq!(jobs["register"]["component"]["code"], "data-science/src/register");
}

#[test]
fn settings_reference_arm_ids() {
    let body = encoded();
    let settings = &body["properties"]["settings"];
    assert_eq!(settings["default_compute"],
               "azureml:/subscriptions/sub/resourceGroups/rg/providers/Microsoft.MachineLearningServices/workspaces/ws/computes/cpu-cluster");
    assert!(settings["default_datastore"].as_str().unwrap().ends_with("/datastores/workspaceblobstore"));
}

#[test]
fn inputs_and_bindings_are_encoded() {
    let body = encoded();
    let props = &body["properties"];
    assert_eq!(props["inputs"]["raw_data"]["uri"], "azureml:taxi-data@latest");
    assert_eq!(props["inputs"]["raw_data"]["jobInputType"], "uri_file");
    assert_eq!(props["inputs"]["table_name"]["value"], "taximonitoring");

    let jobs = &props["jobs"];
    assert_eq!(jobs["prep"]["inputs"]["raw_data"]["value"], "${{parent.inputs.raw_data}}");
    assert_eq!(jobs["train"]["inputs"]["train_data"]["value"], "${{parent.jobs.prep.outputs.train_data}}");
    assert_eq!(jobs["evaluate"]["inputs"]["model_name"]["value"], "taxi-model");
    assert_eq!(jobs["register"]["inputs"]["model_name"]["value"], "taxi-model");
    assert_eq!(jobs["prep"]["outputs"]["train_data"]["value"], "${{parent.outputs.pipeline_job_train_data}}");
}

#[test]
fn pipeline_outputs_are_declared() {
    let body = encoded();
    let outputs = body["properties"]["outputs"].as_object().unwrap();
    for alias in ["pipeline_job_train_data", "pipeline_job_test_data", "pipeline_job_trained_model", "pipeline_job_score_report"] {
        assert!(outputs.contains_key(alias), "missing output {alias}");
    }
    assert_eq!(outputs.len(), 4);
}
