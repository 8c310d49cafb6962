//! register_model: registra el modelo si la evaluación lo aprueba.
//!
//! La decisión la toma register.py a partir de `evaluation_output`; aquí
//! sólo se declara el contrato de flags.

use aml_core::{CommandStep, GraphError, IoType};

use super::code_dir;

const COMMAND: &str = concat!("python register.py ",
                              "--model_name ${{inputs.model_name}} ",
                              "--model_path ${{inputs.model_path}} ",
                              "--evaluation_output ${{inputs.evaluation_output}} ",
                              "--model_info_output_path ${{outputs.model_info_output_path}}");

pub fn register_model(code_root: &str, environment: &str) -> Result<CommandStep, GraphError> {
    CommandStep::builder("register_model").display_name("register-model")
                                          .code(code_dir(code_root, "register"))
                                          .command(COMMAND)
                                          .environment(environment)
                                          .input("model_name", IoType::String)
                                          .input("model_path", IoType::UriFolder)
                                          .input("evaluation_output", IoType::UriFolder)
                                          .output("model_info_output_path", IoType::UriFolder)
                                          .build()
}
