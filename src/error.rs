use thiserror::Error;

use crate::ops::coordinator::CoordinatorPhase;

#[derive(Error, Debug)]
pub enum SessionError {
    // Integration defect: the caller drove the coordinator out of order.
    #[error("'{operation}' is not allowed while the coordinator is {phase}")]
    InvalidLifecycle {
        operation: &'static str,
        phase: CoordinatorPhase,
    },
    #[error("Playback engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("Handle store error: {0}")]
    Store(#[from] StoreError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl SessionError {
    pub fn invalid_lifecycle(operation: &'static str, phase: CoordinatorPhase) -> Self {
        SessionError::InvalidLifecycle { operation, phase }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("engine has not been prepared")]
    NotPrepared,
    #[error("{0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
