use crate::{
    error::{Error, Result},
    types::{Finger, FingerCurl, FingerDirection},
};

/// Expected curls and directions for one finger, each with a weight in (0, 1].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FingerRules {
    pub curls: Vec<(FingerCurl, f32)>,
    pub directions: Vec<(FingerDirection, f32)>,
}

impl FingerRules {
    pub fn is_unconstrained(&self) -> bool {
        self.curls.is_empty() && self.directions.is_empty()
    }
}

/// An immutable, named hand-shape template.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureDescription {
    name: String,
    fingers: [FingerRules; 5],
}

impl GestureDescription {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self, finger: Finger) -> &FingerRules {
        &self.fingers[finger.index()]
    }

    /// Highest raw score the template can award.
    ///
    /// Rules of the same kind on one finger are alternatives, so each
    /// constrained (finger, kind) pair contributes its largest weight.
    pub fn score_max(&self) -> f32 {
        self.fingers
            .iter()
            .map(|rules| {
                max_weight(rules.curls.iter().map(|(_, w)| *w))
                    + max_weight(rules.directions.iter().map(|(_, w)| *w))
            })
            .sum()
    }
}

fn max_weight(weights: impl Iterator<Item = f32>) -> f32 {
    weights.fold(0.0, f32::max)
}

/// Starts a new, empty template called `name`.
pub fn define_gesture(name: impl Into<String>) -> Result<GestureBuilder> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(Error::EmptyGestureName);
    }
    Ok(GestureBuilder {
        name,
        fingers: Default::default(),
    })
}

#[derive(Clone, Debug)]
pub struct GestureBuilder {
    name: String,
    fingers: [FingerRules; 5],
}

impl GestureBuilder {
    pub fn add_curl(&mut self, finger: Finger, curl: FingerCurl, weight: f32) -> Result<&mut Self> {
        self.check_weight(finger, weight)?;
        self.fingers[finger.index()].curls.push((curl, weight));
        Ok(self)
    }

    pub fn add_direction(
        &mut self,
        finger: Finger,
        direction: FingerDirection,
        weight: f32,
    ) -> Result<&mut Self> {
        self.check_weight(finger, weight)?;
        self.fingers[finger.index()]
            .directions
            .push((direction, weight));
        Ok(self)
    }

    pub fn build(self) -> GestureDescription {
        GestureDescription {
            name: self.name,
            fingers: self.fingers,
        }
    }

    fn check_weight(&self, finger: Finger, weight: f32) -> Result<()> {
        // NaN fails both comparisons.
        if weight > 0.0 && weight <= 1.0 {
            Ok(())
        } else {
            Err(Error::InvalidWeight {
                gesture: self.name.clone(),
                finger,
                weight,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_names() {
        assert_eq!(define_gesture("").unwrap_err(), Error::EmptyGestureName);
        assert_eq!(define_gesture("  ").unwrap_err(), Error::EmptyGestureName);
    }

    #[test]
    fn rejects_weights_outside_unit_interval() {
        let mut builder = define_gesture("X").unwrap();
        for weight in [0.0, -0.5, 1.01, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                builder.add_curl(Finger::Index, FingerCurl::NoCurl, weight),
                Err(Error::InvalidWeight { .. })
            ));
            assert!(matches!(
                builder.add_direction(Finger::Index, FingerDirection::VerticalUp, weight),
                Err(Error::InvalidWeight { .. })
            ));
        }
        assert!(builder.add_curl(Finger::Index, FingerCurl::NoCurl, 1.0).is_ok());
        assert!(builder.add_curl(Finger::Index, FingerCurl::HalfCurl, 0.01).is_ok());
    }

    #[test]
    fn keeps_rules_in_insertion_order() -> Result<()> {
        let mut builder = define_gesture("B")?;
        builder
            .add_curl(Finger::Thumb, FingerCurl::NoCurl, 1.0)?
            .add_curl(Finger::Thumb, FingerCurl::HalfCurl, 0.8)?
            .add_direction(Finger::Thumb, FingerDirection::HorizontalLeft, 1.0)?;
        let gesture = builder.build();

        let thumb = gesture.rules(Finger::Thumb);
        assert_eq!(
            thumb.curls,
            vec![(FingerCurl::NoCurl, 1.0), (FingerCurl::HalfCurl, 0.8)]
        );
        assert_eq!(thumb.directions, vec![(FingerDirection::HorizontalLeft, 1.0)]);
        assert!(gesture.rules(Finger::Pinky).is_unconstrained());
        Ok(())
    }

    #[test]
    fn score_max_counts_best_alternative_per_finger() -> Result<()> {
        let mut builder = define_gesture("A")?;
        builder
            .add_curl(Finger::Thumb, FingerCurl::NoCurl, 1.0)?
            .add_direction(Finger::Thumb, FingerDirection::VerticalUp, 1.0)?
            .add_direction(Finger::Thumb, FingerDirection::DiagonalUpLeft, 0.9)?
            .add_curl(Finger::Index, FingerCurl::FullCurl, 0.5)?;
        assert!((builder.build().score_max() - 2.5).abs() < 1e-6);
        Ok(())
    }
}
