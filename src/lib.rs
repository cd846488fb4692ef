//! Static hand gesture recognition from 21-point hand landmarks.
//!
//! A [`GestureClassifier`] turns one hand's landmarks into per-finger curl and
//! direction features, scores them against every template of a
//! [`GestureLibrary`] and reports the best match above a confidence
//! threshold. The built-in library holds the static ASL letters
//! A B C D E F I L O S U V W Y.

pub mod config;
pub mod description;
pub mod error;
pub mod features;
pub mod gesture;
pub mod library;
pub mod pipeline;
pub mod types;

pub use description::{FingerRules, GestureBuilder, GestureDescription, define_gesture};
pub use error::{Error, Result};
pub use gesture::{DEFAULT_THRESHOLD, GestureClassifier, GestureEstimate, ScoreScale, score};
pub use library::GestureLibrary;
pub use pipeline::{LandmarkFrame, RecognizedFrame, RecognizerOptions, start_recognizer};
pub use types::{
    Finger, FingerCurl, FingerDirection, FingerPose, HAND_LANDMARK_COUNT, Hand, HandPose,
    Landmark, MatchResult,
};
