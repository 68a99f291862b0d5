use thiserror::Error;

use crate::ControlError;

/// Errors that can occur while setting up or running an integration.
///
/// Every variant aborts the run. The accept/reject loop is the only place
/// a step is retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid control: {0}")]
    InvalidControl(#[from] ControlError),

    #[error("expected a state of length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("solver has not been initialised")]
    NotInitialised,

    #[error("integration failure: too many steps at {t}")]
    TooManySteps { t: f64 },

    #[error("integration failure: step too small at {t} (h = {h:e})")]
    StepTooSmall { t: f64, h: f64 },

    #[error("integration failure: step size vanished at {t} (h = {h:e})")]
    StepSizeVanished { t: f64, h: f64 },

    #[error("integration failure: problem became stiff at {t}")]
    Stiff { t: f64 },

    #[error("{reason}")]
    OutputMismatch { reason: &'static str },
}
