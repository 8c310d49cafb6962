//! evaluate_model: evalúa el modelo entrenado contra el split de test.

use aml_core::{CommandStep, GraphError, IoType};

use super::code_dir;

const COMMAND: &str = concat!("python evaluate.py ",
                              "--model_name ${{inputs.model_name}} ",
                              "--model_input ${{inputs.model_input}} ",
                              "--test_data ${{inputs.test_data}} ",
                              "--evaluation_output ${{outputs.evaluation_output}}");

pub fn evaluate_model(code_root: &str, environment: &str) -> Result<CommandStep, GraphError> {
    CommandStep::builder("evaluate_model").display_name("evaluate-model")
                                          .code(code_dir(code_root, "evaluate"))
                                          .command(COMMAND)
                                          .environment(environment)
                                          .input("model_name", IoType::String)
                                          .input("model_input", IoType::UriFolder)
                                          .input("test_data", IoType::UriFolder)
                                          .output("evaluation_output", IoType::UriFolder)
                                          .build()
}
