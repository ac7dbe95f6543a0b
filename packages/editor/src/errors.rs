//! Error types for the editor

use composer_common::CommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Graph error: {0}")]
    Graph(#[from] crate::graph::GraphError),

    #[error("Config error: {0}")]
    Config(#[from] CommonError),

    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
