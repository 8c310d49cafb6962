//! train_model

use aml_core::{CommandStep, GraphError, IoType};

use super::code_dir;

const COMMAND: &str = "python train.py --train_data ${{inputs.train_data}} --model_output ${{outputs.model_output}}";

pub fn train_model(code_root: &str, environment: &str) -> Result<CommandStep, GraphError> {
    CommandStep::builder("train_model").display_name("train-model")
                                       .code(code_dir(code_root, "train"))
                                       .command(COMMAND)
                                       .environment(environment)
                                       .input("train_data", IoType::UriFolder)
                                       .output("model_output", IoType::UriFolder)
                                       .build()
}
