use serde::{Deserialize, Serialize};

/// Number of joints the landmark model reports per hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;

/// One joint position as reported by the landmark model.
///
/// MediaPipe convention: `x` grows to the right, `y` grows downwards and `z`
/// grows away from the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub(crate) fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// A complete, finite set of 21 landmarks for one detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    points: [Landmark; HAND_LANDMARK_COUNT],
}

impl Hand {
    /// Returns `None` unless `points` holds exactly 21 finite landmarks.
    pub fn new(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; HAND_LANDMARK_COUNT] = points.try_into().ok()?;
        if !points.iter().all(Landmark::is_finite) {
            return None;
        }
        Some(Self { points })
    }

    pub fn points(&self) -> &[Landmark; HAND_LANDMARK_COUNT] {
        &self.points
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Landmark indices of the finger's four joints, base to tip.
    pub fn joints(&self) -> [usize; 4] {
        match self {
            Finger::Thumb => [1, 2, 3, 4],
            Finger::Index => [5, 6, 7, 8],
            Finger::Middle => [9, 10, 11, 12],
            Finger::Ring => [13, 14, 15, 16],
            Finger::Pinky => [17, 18, 19, 20],
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerCurl {
    NoCurl,
    HalfCurl,
    FullCurl,
}

impl FingerCurl {
    /// Distance on the NoCurl < HalfCurl < FullCurl scale.
    pub fn steps_from(&self, other: FingerCurl) -> u8 {
        (*self as u8).abs_diff(other as u8)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FingerCurl::NoCurl => "no curl",
            FingerCurl::HalfCurl => "half curl",
            FingerCurl::FullCurl => "full curl",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerDirection {
    HorizontalLeft,
    HorizontalRight,
    DiagonalUpLeft,
    DiagonalUpRight,
    DiagonalDownLeft,
    DiagonalDownRight,
    VerticalUp,
    VerticalDown,
    Forward,
    Backward,
}

const DIAGONAL: f32 = std::f32::consts::FRAC_1_SQRT_2;

impl FingerDirection {
    /// Every bucket, in tie-break priority order.
    pub const ALL: [FingerDirection; 10] = [
        FingerDirection::HorizontalLeft,
        FingerDirection::HorizontalRight,
        FingerDirection::DiagonalUpLeft,
        FingerDirection::DiagonalUpRight,
        FingerDirection::DiagonalDownLeft,
        FingerDirection::DiagonalDownRight,
        FingerDirection::VerticalUp,
        FingerDirection::VerticalDown,
        FingerDirection::Forward,
        FingerDirection::Backward,
    ];

    /// Unit vector of the bucket in landmark coordinates (y down, z away).
    pub fn unit_vector(&self) -> [f32; 3] {
        match self {
            FingerDirection::HorizontalLeft => [-1.0, 0.0, 0.0],
            FingerDirection::HorizontalRight => [1.0, 0.0, 0.0],
            FingerDirection::DiagonalUpLeft => [-DIAGONAL, -DIAGONAL, 0.0],
            FingerDirection::DiagonalUpRight => [DIAGONAL, -DIAGONAL, 0.0],
            FingerDirection::DiagonalDownLeft => [-DIAGONAL, DIAGONAL, 0.0],
            FingerDirection::DiagonalDownRight => [DIAGONAL, DIAGONAL, 0.0],
            FingerDirection::VerticalUp => [0.0, -1.0, 0.0],
            FingerDirection::VerticalDown => [0.0, 1.0, 0.0],
            FingerDirection::Forward => [0.0, 0.0, -1.0],
            FingerDirection::Backward => [0.0, 0.0, 1.0],
        }
    }

    fn is_axis_aligned(&self) -> bool {
        matches!(
            self,
            FingerDirection::HorizontalLeft
                | FingerDirection::HorizontalRight
                | FingerDirection::VerticalUp
                | FingerDirection::VerticalDown
        )
    }

    /// Position on the planar compass ring, clockwise from up.
    fn compass_slot(&self) -> Option<u8> {
        match self {
            FingerDirection::VerticalUp => Some(0),
            FingerDirection::DiagonalUpRight => Some(1),
            FingerDirection::HorizontalRight => Some(2),
            FingerDirection::DiagonalDownRight => Some(3),
            FingerDirection::VerticalDown => Some(4),
            FingerDirection::DiagonalDownLeft => Some(5),
            FingerDirection::HorizontalLeft => Some(6),
            FingerDirection::DiagonalUpLeft => Some(7),
            FingerDirection::Forward | FingerDirection::Backward => None,
        }
    }

    /// One step apart: 45-degree neighbours on the compass ring, or a depth
    /// bucket paired with an axis-aligned planar one.
    pub fn is_adjacent(&self, other: FingerDirection) -> bool {
        match (self.compass_slot(), other.compass_slot()) {
            (Some(a), Some(b)) => matches!((a + 8 - b) % 8, 1 | 7),
            (None, Some(_)) => other.is_axis_aligned(),
            (Some(_), None) => self.is_axis_aligned(),
            (None, None) => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FingerDirection::HorizontalLeft => "horizontal left",
            FingerDirection::HorizontalRight => "horizontal right",
            FingerDirection::DiagonalUpLeft => "diagonal up left",
            FingerDirection::DiagonalUpRight => "diagonal up right",
            FingerDirection::DiagonalDownLeft => "diagonal down left",
            FingerDirection::DiagonalDownRight => "diagonal down right",
            FingerDirection::VerticalUp => "vertical up",
            FingerDirection::VerticalDown => "vertical down",
            FingerDirection::Forward => "forward",
            FingerDirection::Backward => "backward",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FingerPose {
    pub curl: FingerCurl,
    pub direction: FingerDirection,
}

/// Derived features of one hand, indexed by [`Finger::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HandPose {
    pub fingers: [FingerPose; 5],
}

impl HandPose {
    pub fn finger(&self, finger: Finger) -> FingerPose {
        self.fingers[finger.index()]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchResult {
    pub name: String,
    pub score: f32,
}

impl MatchResult {
    pub fn display_text(&self) -> String {
        format!("{} ({:.2})", self.name, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_points() -> Vec<Landmark> {
        (0..HAND_LANDMARK_COUNT)
            .map(|i| Landmark::new(i as f32 * 0.01, 0.5, 0.0))
            .collect()
    }

    #[test]
    fn hand_requires_exactly_21_finite_points() {
        let mut points = hand_points();
        assert!(Hand::new(&points).is_some());
        assert!(Hand::new(&points[..20]).is_none());
        assert!(Hand::new(&[]).is_none());

        points.push(Landmark::default());
        assert!(Hand::new(&points).is_none());

        let mut points = hand_points();
        points[7].z = f32::NAN;
        assert!(Hand::new(&points).is_none());
        points[7].z = f32::INFINITY;
        assert!(Hand::new(&points).is_none());
    }

    #[test]
    fn curl_steps_follow_the_ordinal_scale() {
        assert_eq!(FingerCurl::NoCurl.steps_from(FingerCurl::NoCurl), 0);
        assert_eq!(FingerCurl::NoCurl.steps_from(FingerCurl::HalfCurl), 1);
        assert_eq!(FingerCurl::FullCurl.steps_from(FingerCurl::HalfCurl), 1);
        assert_eq!(FingerCurl::FullCurl.steps_from(FingerCurl::NoCurl), 2);
    }

    #[test]
    fn compass_neighbours_are_adjacent() {
        use FingerDirection::*;
        assert!(VerticalUp.is_adjacent(DiagonalUpLeft));
        assert!(VerticalUp.is_adjacent(DiagonalUpRight));
        assert!(DiagonalUpLeft.is_adjacent(HorizontalLeft));
        assert!(!VerticalUp.is_adjacent(HorizontalLeft));
        assert!(!VerticalUp.is_adjacent(VerticalDown));
        assert!(!VerticalUp.is_adjacent(VerticalUp));
        assert!(Forward.is_adjacent(VerticalUp));
        assert!(HorizontalRight.is_adjacent(Backward));
        assert!(!Forward.is_adjacent(DiagonalDownLeft));
        assert!(!Forward.is_adjacent(Backward));
    }

    #[test]
    fn adjacency_is_symmetric() {
        for a in FingerDirection::ALL {
            for b in FingerDirection::ALL {
                assert_eq!(a.is_adjacent(b), b.is_adjacent(a), "{a:?} / {b:?}");
            }
        }
    }
}
