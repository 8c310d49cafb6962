//! Grafo del pipeline.
//!
//! Construir un pipeline no ejecuta nada: produce una descripción
//! (`PipelineGraph`) que consume la capa de envío. Cada nodo instancia un
//! `CommandStep` y enlaza sus entradas a:
//! - un input del pipeline (`Binding::PipelineInput`),
//! - la salida de otro nodo (`Binding::NodeOutput`, genera una arista),
//! - un literal de texto (`Binding::Literal`, sólo para inputs `string`).
//!
//! `PipelineBuilder::build` valida enlaces, tipos y que el grafo sea un DAG.

mod builder;
mod graph;

pub use builder::{NodeHandle, OutputHandle, PipelineBuilder};
pub use graph::{Binding, Edge, PipelineGraph, StepNode};
