use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    description::GestureDescription,
    error::{Error, Result},
    features::estimate_pose,
    library::GestureLibrary,
    types::{Finger, Hand, HandPose, Landmark, MatchResult},
};

pub const DEFAULT_THRESHOLD: f32 = 8.0;

/// Credit for a rule missed by exactly one step.
const NEAR_MISS_CREDIT: f32 = 0.5;
const NORMALIZED_SCALE: f32 = 10.0;

/// How scores are reported and compared against the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// Sum of earned weights, in `[0, score_max]`.
    #[default]
    Raw,
    /// Raw score divided by `score_max`, scaled to `[0, 10]`.
    Normalized,
}

/// Every template that cleared the threshold for one hand.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GestureEstimate {
    pub pose: HandPose,
    /// In library order.
    pub matches: Vec<MatchResult>,
}

impl GestureEstimate {
    /// Highest score; exact ties go to the template defined first.
    pub fn best(&self) -> Option<&MatchResult> {
        self.matches.iter().fold(None, |best, candidate| match best {
            Some(current) if current.score >= candidate.score => Some(current),
            _ => Some(candidate),
        })
    }
}

/// Stateless matcher of hands against a read-only gesture library.
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    library: Arc<GestureLibrary>,
    threshold: f32,
    scale: ScoreScale,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self {
            library: GestureLibrary::builtin(),
            threshold: DEFAULT_THRESHOLD,
            scale: ScoreScale::Raw,
        }
    }
}

impl GestureClassifier {
    pub fn new(library: Arc<GestureLibrary>, threshold: f32) -> Result<Self> {
        Self::with_scale(library, threshold, ScoreScale::Raw)
    }

    pub fn with_scale(
        library: Arc<GestureLibrary>,
        threshold: f32,
        scale: ScoreScale,
    ) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(Error::InvalidThreshold(threshold));
        }
        Ok(Self {
            library,
            threshold,
            scale,
        })
    }

    pub fn library(&self) -> &GestureLibrary {
        &self.library
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn scale(&self) -> ScoreScale {
        self.scale
    }

    /// Best matching gesture, or `None` when the landmarks are unusable or no
    /// template reaches the threshold.
    pub fn classify(&self, landmarks: &[Landmark]) -> Option<MatchResult> {
        let hand = Hand::new(landmarks)?;
        self.classify_hand(&hand)
    }

    pub fn classify_hand(&self, hand: &Hand) -> Option<MatchResult> {
        let estimate = self.estimate_hand(hand)?;
        let best = estimate.best().cloned();
        match &best {
            Some(result) => log::debug!("classified hand as {}", result.display_text()),
            None => log::trace!("no gesture above threshold {}", self.threshold),
        }
        best
    }

    pub fn estimate(&self, landmarks: &[Landmark]) -> Option<GestureEstimate> {
        let hand = Hand::new(landmarks)?;
        self.estimate_hand(&hand)
    }

    /// Pose of the hand and every template scoring at least the threshold.
    pub fn estimate_hand(&self, hand: &Hand) -> Option<GestureEstimate> {
        let Some(pose) = estimate_pose(hand) else {
            log::trace!("degenerate hand, skipping classification");
            return None;
        };

        let matches = self
            .library
            .iter()
            .map(|gesture| MatchResult {
                name: gesture.name().to_string(),
                score: self.scaled_score(gesture, &pose),
            })
            .filter(|result| result.score >= self.threshold)
            .collect();

        Some(GestureEstimate { pose, matches })
    }

    fn scaled_score(&self, gesture: &GestureDescription, pose: &HandPose) -> f32 {
        let raw = score(gesture, pose);
        match self.scale {
            ScoreScale::Raw => raw,
            ScoreScale::Normalized => {
                let max = gesture.score_max();
                if max > 0.0 {
                    raw / max * NORMALIZED_SCALE
                } else {
                    0.0
                }
            }
        }
    }
}

/// Raw score of `gesture` against a hand pose.
///
/// Each rule earns its weight on an exact match and half of it one step away.
/// Rules of the same kind on one finger are alternatives; the finger keeps the
/// best credit among them.
pub fn score(gesture: &GestureDescription, pose: &HandPose) -> f32 {
    Finger::ALL
        .iter()
        .map(|&finger| {
            let rules = gesture.rules(finger);
            let observed = pose.finger(finger);

            let curl = best_credit(rules.curls.iter().map(|&(expected, weight)| {
                match expected.steps_from(observed.curl) {
                    0 => weight,
                    1 => weight * NEAR_MISS_CREDIT,
                    _ => 0.0,
                }
            }));
            let direction = best_credit(rules.directions.iter().map(|&(expected, weight)| {
                if expected == observed.direction {
                    weight
                } else if expected.is_adjacent(observed.direction) {
                    weight * NEAR_MISS_CREDIT
                } else {
                    0.0
                }
            }));

            curl + direction
        })
        .sum()
}

fn best_credit(credits: impl Iterator<Item = f32>) -> f32 {
    credits.fold(0.0, f32::max)
}
