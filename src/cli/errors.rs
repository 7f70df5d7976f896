use thiserror::Error;

use crate::error::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid command line: {0}")]
    Options(#[source] Error),

    #[error("{0}")]
    ModelLoad(#[source] Error),

    #[error("Profile generation failed: {0}")]
    GenerateProfile(#[source] Error),

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Batch test tallied no examples")]
    NoExamples,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
