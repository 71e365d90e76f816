//! Error types for the viewer core

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    /// Hover state was touched after teardown or before a session began.
    #[error("hover state accessed outside of an active viewer session")]
    NoActiveSession,

    #[error("failed to load model '{}': {source}", path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("failed to read info registry '{}': {source}", path.display())]
    RegistryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed info registry: {0}")]
    RegistryParse(#[from] serde_json::Error),

    #[error("model has not finished loading")]
    ModelNotReady,
}

pub type Result<T> = std::result::Result<T, ViewerError>;
