use thiserror::Error;

use crate::sync::SyncState;

#[derive(Debug, Error)]
pub enum ModemError {
    #[error("Bad synchronization sequence: sample at t={time} does not fit state {state:?}")]
    PreambleMismatch { state: SyncState, time: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Sample sink error: {0}")]
    Sink(String),

    #[error("Sample source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, ModemError>;
