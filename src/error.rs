use thiserror::Error;

use crate::types::Finger;

/// Errors raised while defining gestures or configuring the classifier.
///
/// Classification itself never fails: unusable input is reported as "no
/// match".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("gesture name must not be empty")]
    EmptyGestureName,

    #[error("invalid weight {weight} for {finger:?} in gesture `{gesture}`: must be in (0, 1]")]
    InvalidWeight {
        gesture: String,
        finger: Finger,
        weight: f32,
    },

    #[error("gesture `{0}` is already registered")]
    DuplicateGesture(String),

    #[error("confidence threshold must be finite, got {0}")]
    InvalidThreshold(f32),
}

pub type Result<T> = std::result::Result<T, Error>;
