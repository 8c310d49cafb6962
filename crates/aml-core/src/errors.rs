//! Errores de construcción del grafo y del job.

use thiserror::Error;

use crate::step::IoType;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GraphError {
    #[error("step '{step}': placeholder '{placeholder}' does not name a declared slot")]
    UnknownPlaceholder { step: String, placeholder: String },
    #[error("step '{step}': slot '{slot}' declared twice")]
    DuplicateSlot { step: String, slot: String },
    #[error("node '{0}' already exists in the pipeline")]
    DuplicateNode(String),
    #[error("node '{node}' has no input named '{input}'")]
    UnknownInput { node: String, input: String },
    #[error("node '{node}' has no output named '{output}'")]
    UnknownOutput { node: String, output: String },
    #[error("node '{node}': required input '{input}' is not bound")]
    UnboundInput { node: String, input: String },
    #[error("node '{node}' input '{input}': expected {expected}, got {found}")]
    TypeMismatch { node: String, input: String, expected: IoType, found: IoType },
    #[error("pipeline input '{0}' is not declared")]
    UnknownPipelineInput(String),
    #[error("pipeline input '{0}' declared twice")]
    DuplicatePipelineInput(String),
    #[error("pipeline input '{0}' has no value bound")]
    UnboundPipelineInput(String),
    #[error("pipeline output '{0}' declared twice")]
    DuplicatePipelineOutput(String),
    #[error("pipeline graph contains a cycle through '{0}'")]
    Cycle(String),
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}
