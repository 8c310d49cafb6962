//! prep_data: separa los datos crudos en train/val/test.

use aml_core::{CommandStep, GraphError, IoType};

use super::code_dir;

const COMMAND: &str = concat!("python prep.py ",
                              "--raw_data ${{inputs.raw_data}} ",
                              "--train_data ${{outputs.train_data}} ",
                              "--val_data ${{outputs.val_data}} ",
                              "--test_data ${{outputs.test_data}} ",
                              "--enable_monitoring ${{inputs.enable_monitoring}} ",
                              "--table_name ${{inputs.table_name}}");

pub fn prep_data(code_root: &str, environment: &str) -> Result<CommandStep, GraphError> {
    CommandStep::builder("prep_data").display_name("prep-data")
                                     .code(code_dir(code_root, "prep"))
                                     .command(COMMAND)
                                     .environment(environment)
                                     .input("raw_data", IoType::UriFile)
                                     .input("enable_monitoring", IoType::String)
                                     .input("table_name", IoType::String)
                                     .output("train_data", IoType::UriFolder)
                                     .output("val_data", IoType::UriFolder)
                                     .output("test_data", IoType::UriFolder)
                                     .build()
}
