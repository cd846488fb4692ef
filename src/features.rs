//! Per-finger curl and direction estimation.
//!
//! Everything here works on angles and unit vectors of a hand normalised by
//! its own extent, so the landmark source may report pixels or normalised
//! image coordinates.

use crate::types::{
    Finger, FingerCurl, FingerDirection, FingerPose, Hand, HandPose, Landmark, WRIST,
};

// Total bend, in degrees, along wrist -> MCP -> PIP -> DIP -> tip.
const FINGER_NO_CURL_LIMIT: f32 = 60.0;
const FINGER_FULL_CURL_LIMIT: f32 = 170.0;
// The thumb only bends at MCP and IP.
const THUMB_NO_CURL_LIMIT: f32 = 40.0;
const THUMB_FULL_CURL_LIMIT: f32 = 110.0;

const MIN_HAND_SPAN: f32 = 1e-6;
const MIN_SEGMENT_LENGTH: f32 = 1e-5;
const DIRECTION_TIE_EPSILON: f32 = 1e-6;

/// Curl and direction of every finger, or `None` for a degenerate hand
/// (zero extent or a zero-length finger segment).
pub fn estimate_pose(hand: &Hand) -> Option<HandPose> {
    let points = normalize_landmarks(hand.points())?;

    let mut fingers = [FingerPose {
        curl: FingerCurl::NoCurl,
        direction: FingerDirection::VerticalUp,
    }; 5];
    for finger in Finger::ALL {
        fingers[finger.index()] = estimate_finger(&points, finger)?;
    }

    Some(HandPose { fingers })
}

fn estimate_finger(points: &[[f32; 3]], finger: Finger) -> Option<FingerPose> {
    let [base, j1, j2, tip] = finger.joints().map(|i| points[i]);

    let curl = match finger {
        Finger::Thumb => classify_curl(
            total_bend(&[base, j1, j2, tip])?,
            THUMB_NO_CURL_LIMIT,
            THUMB_FULL_CURL_LIMIT,
        ),
        _ => classify_curl(
            total_bend(&[points[WRIST], base, j1, j2, tip])?,
            FINGER_NO_CURL_LIMIT,
            FINGER_FULL_CURL_LIMIT,
        ),
    };
    // A finger folded back onto its base falls back to the last segment.
    let pointing = unit(sub(tip, base)).or_else(|| unit(sub(tip, j2)))?;
    let direction = nearest_direction(pointing);

    Some(FingerPose { curl, direction })
}

fn classify_curl(bend: f32, no_curl_limit: f32, full_curl_limit: f32) -> FingerCurl {
    if bend < no_curl_limit {
        FingerCurl::NoCurl
    } else if bend >= full_curl_limit {
        FingerCurl::FullCurl
    } else {
        FingerCurl::HalfCurl
    }
}

/// Sum of the turning angles, in degrees, between consecutive segments of a
/// joint chain. A straight chain bends 0 degrees.
pub fn total_bend(chain: &[[f32; 3]]) -> Option<f32> {
    let segments = chain
        .windows(2)
        .map(|pair| unit(sub(pair[1], pair[0])))
        .collect::<Option<Vec<_>>>()?;

    Some(
        segments
            .windows(2)
            .map(|pair| dot(pair[0], pair[1]).clamp(-1.0, 1.0).acos().to_degrees())
            .sum(),
    )
}

/// Bucket with the smallest angular distance to `v`; near-ties keep the
/// bucket listed first in [`FingerDirection::ALL`].
pub fn nearest_direction(v: [f32; 3]) -> FingerDirection {
    let mut best = FingerDirection::ALL[0];
    let mut best_cos = dot(v, best.unit_vector());

    for candidate in &FingerDirection::ALL[1..] {
        let cos = dot(v, candidate.unit_vector());
        if cos > best_cos + DIRECTION_TIE_EPSILON {
            best = *candidate;
            best_cos = cos;
        }
    }

    best
}

fn normalize_landmarks(points: &[Landmark]) -> Option<Vec<[f32; 3]>> {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];

    for point in points {
        let p = point.to_array();
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }

    let span = (0..3).map(|axis| max[axis] - min[axis]).fold(0.0, f32::max);
    if span <= MIN_HAND_SPAN {
        return None;
    }

    Some(
        points
            .iter()
            .map(|p| {
                [
                    (p.x - min[0]) / span,
                    (p.y - min[1]) / span,
                    (p.z - min[2]) / span,
                ]
            })
            .collect(),
    )
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn unit(v: [f32; 3]) -> Option<[f32; 3]> {
    let len = dot(v, v).sqrt();
    if len < MIN_SEGMENT_LENGTH {
        None
    } else {
        Some([v[0] / len, v[1] / len, v[2] / len])
    }
}
