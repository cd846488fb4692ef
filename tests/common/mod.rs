#![allow(dead_code)]

use fingerspell::{Finger, HAND_LANDMARK_COUNT, Landmark};

pub const UP: [f32; 3] = [0.0, -1.0, 0.0];
pub const DOWN: [f32; 3] = [0.0, 1.0, 0.0];
pub const LEFT: [f32; 3] = [-1.0, 0.0, 0.0];
pub const TOWARD: [f32; 3] = [0.0, 0.0, -1.0];
pub const AWAY: [f32; 3] = [0.0, 0.0, 1.0];

const SEGMENT: f32 = 0.05;

/// Synthetic hand, palm facing the camera, wrist at the bottom of the frame.
/// Every finger starts straight up.
pub struct HandSketch {
    points: Vec<Landmark>,
}

impl HandSketch {
    pub fn new() -> Self {
        let mut sketch = Self {
            points: vec![Landmark::new(0.5, 0.9, 0.0); HAND_LANDMARK_COUNT],
        };
        sketch.place(Finger::Thumb, [0.38, 0.8, 0.0], [UP, UP, UP]);
        for (finger, x) in [
            (Finger::Index, 0.44),
            (Finger::Middle, 0.48),
            (Finger::Ring, 0.52),
            (Finger::Pinky, 0.56),
        ] {
            sketch.place(finger, [x, 0.6, 0.0], [UP, UP, UP]);
        }
        sketch
    }

    /// Walks the finger from its base joint along three unit steps.
    pub fn finger(mut self, finger: Finger, steps: [[f32; 3]; 3]) -> Self {
        let base = self.points[finger.joints()[0]];
        self.place(finger, [base.x, base.y, base.z], steps);
        self
    }

    /// Straight, pointing up.
    pub fn straight(self, finger: Finger) -> Self {
        self.finger(finger, [UP, UP, UP])
    }

    /// Bent about 90 degrees in total, tip toward the camera.
    pub fn half_curled(self, finger: Finger) -> Self {
        match finger {
            Finger::Thumb => self.finger(finger, [UP, [0.0, -0.7071, -0.7071], TOWARD]),
            _ => {
                let bent = [0.0, -0.5, -0.866];
                self.finger(finger, [bent, bent, TOWARD])
            }
        }
    }

    /// Folded into the palm with the finger still reading as pointing up.
    pub fn fist(self, finger: Finger) -> Self {
        match finger {
            Finger::Thumb => self.finger(finger, [UP, TOWARD, DOWN]),
            _ => self.finger(finger, [TOWARD, UP, AWAY]),
        }
    }

    pub fn points(&self) -> Vec<Landmark> {
        self.points.clone()
    }

    fn place(&mut self, finger: Finger, start: [f32; 3], steps: [[f32; 3]; 3]) {
        let joints = finger.joints();
        let mut at = start;
        self.points[joints[0]] = at.into();
        for (joint, step) in joints[1..].iter().zip(steps) {
            at = [
                at[0] + step[0] * SEGMENT,
                at[1] + step[1] * SEGMENT,
                at[2] + step[2] * SEGMENT,
            ];
            self.points[*joint] = at.into();
        }
    }
}

/// Thumb straight up, other fingers folded.
pub fn letter_a() -> Vec<Landmark> {
    HandSketch::new()
        .fist(Finger::Index)
        .fist(Finger::Middle)
        .fist(Finger::Ring)
        .fist(Finger::Pinky)
        .points()
}

/// Every finger straight up.
pub fn letter_b() -> Vec<Landmark> {
    HandSketch::new().points()
}
