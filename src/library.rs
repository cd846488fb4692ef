//! The gesture registry and the built-in static ASL alphabet.
//!
//! J and Z need motion and cannot be described by a single pose, so they are
//! not part of the alphabet.

use std::sync::{Arc, OnceLock};

use crate::{
    description::{GestureDescription, define_gesture},
    error::{Error, Result},
    types::{
        Finger::{self, *},
        FingerCurl::{self, *},
        FingerDirection::{self, *},
    },
};

/// Named templates in insertion order. Names are unique.
#[derive(Clone, Debug, Default)]
pub struct GestureLibrary {
    gestures: Vec<GestureDescription>,
}

impl GestureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide, read-only library of built-in letters.
    pub fn builtin() -> Arc<GestureLibrary> {
        static BUILTIN: OnceLock<Arc<GestureLibrary>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                let library = Self::with_alphabet().expect("built-in letter tables are valid");
                log::info!("loaded {} built-in gestures", library.len());
                Arc::new(library)
            })
            .clone()
    }

    /// A fresh, mutable copy of the built-in letters.
    pub fn with_alphabet() -> Result<Self> {
        let mut library = Self::new();
        for letter in ALPHABET {
            library.register(letter.build()?)?;
        }
        Ok(library)
    }

    pub fn register(&mut self, gesture: GestureDescription) -> Result<()> {
        if self.get(gesture.name()).is_some() {
            return Err(Error::DuplicateGesture(gesture.name().to_string()));
        }
        self.gestures.push(gesture);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&GestureDescription> {
        self.gestures.iter().find(|g| g.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureDescription> {
        self.gestures.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.gestures.iter().map(|g| g.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }
}

/// One row of a letter table: the same rules applied to several fingers.
struct Row {
    fingers: &'static [Finger],
    curls: &'static [(FingerCurl, f32)],
    directions: &'static [(FingerDirection, f32)],
}

struct Letter {
    name: &'static str,
    rows: &'static [Row],
}

impl Letter {
    fn build(&self) -> Result<GestureDescription> {
        let mut builder = define_gesture(self.name)?;
        for row in self.rows {
            for &finger in row.fingers {
                for &(curl, weight) in row.curls {
                    builder.add_curl(finger, curl, weight)?;
                }
                for &(direction, weight) in row.directions {
                    builder.add_direction(finger, direction, weight)?;
                }
            }
        }
        Ok(builder.build())
    }
}

const ALL: &[Finger] = &Finger::ALL;
const FOUR: &[Finger] = &[Index, Middle, Ring, Pinky];

const ALPHABET: &[Letter] = &[
    // Fist with the thumb up along the side.
    Letter {
        name: "A",
        rows: &[
            Row {
                fingers: &[Thumb],
                curls: &[(NoCurl, 1.0)],
                directions: &[
                    (VerticalUp, 1.0),
                    (DiagonalUpLeft, 0.9),
                    (DiagonalUpRight, 0.9),
                ],
            },
            Row {
                fingers: FOUR,
                curls: &[(FullCurl, 1.0)],
                directions: &[(VerticalUp, 1.0)],
            },
        ],
    },
    // Flat hand, thumb folded across the palm.
    Letter {
        name: "B",
        rows: &[
            Row {
                fingers: ALL,
                curls: &[(NoCurl, 1.0)],
                directions: &[(VerticalUp, 1.0)],
            },
            Row {
                fingers: &[Thumb],
                curls: &[(HalfCurl, 0.8)],
                directions: &[(HorizontalLeft, 1.0), (HorizontalRight, 1.0)],
            },
        ],
    },
    Letter {
        name: "C",
        rows: &[Row {
            fingers: ALL,
            curls: &[(HalfCurl, 1.0)],
            directions: &[(DiagonalUpLeft, 0.9), (DiagonalUpRight, 0.9)],
        }],
    },
    // Index up, the rest curled onto the thumb.
    Letter {
        name: "D",
        rows: &[
            Row {
                fingers: &[Index],
                curls: &[(NoCurl, 1.0)],
                directions: &[(VerticalUp, 1.0)],
            },
            Row {
                fingers: &[Middle, Ring, Pinky],
                curls: &[(FullCurl, 1.0)],
                directions: &[],
            },
            Row {
                fingers: &[Thumb],
                curls: &[(HalfCurl, 1.0)],
                directions: &[],
            },
        ],
    },
    Letter {
        name: "E",
        rows: &[Row {
            fingers: ALL,
            curls: &[(FullCurl, 1.0)],
            directions: &[
                (VerticalUp, 0.9),
                (DiagonalUpLeft, 1.0),
                (DiagonalUpRight, 1.0),
            ],
        }],
    },
    // Index and thumb touch in a circle.
    Letter {
        name: "F",
        rows: &[
            Row {
                fingers: &[Index],
                curls: &[(HalfCurl, 1.0)],
                directions: &[],
            },
            Row {
                fingers: &[Middle, Ring, Pinky],
                curls: &[(NoCurl, 1.0)],
                directions: &[(VerticalUp, 1.0)],
            },
        ],
    },
    Letter {
        name: "I",
        rows: &[
            Row {
                fingers: &[Pinky],
                curls: &[(NoCurl, 1.0)],
                directions: &[(VerticalUp, 1.0)],
            },
            Row {
                fingers: &[Index, Middle, Ring],
                curls: &[(FullCurl, 1.0)],
                directions: &[],
            },
        ],
    },
    Letter {
        name: "L",
        rows: &[
            Row {
                fingers: &[Thumb, Index],
                curls: &[(NoCurl, 1.0)],
                directions: &[],
            },
            Row {
                fingers: &[Middle, Ring, Pinky],
                curls: &[(FullCurl, 1.0)],
                directions: &[],
            },
        ],
    },
    Letter {
        name: "O",
        rows: &[Row {
            fingers: ALL,
            curls: &[(HalfCurl, 1.0)],
            directions: &[],
        }],
    },
    // Fist with the thumb across the front.
    Letter {
        name: "S",
        rows: &[
            Row {
                fingers: FOUR,
                curls: &[(FullCurl, 1.0)],
                directions: &[],
            },
            Row {
                fingers: &[Thumb],
                curls: &[(HalfCurl, 0.9)],
                directions: &[],
            },
        ],
    },
    // Index and middle up together.
    Letter {
        name: "U",
        rows: &[
            Row {
                fingers: &[Index, Middle],
                curls: &[(NoCurl, 1.0)],
                directions: &[(VerticalUp, 1.0)],
            },
            Row {
                fingers: &[Ring, Pinky],
                curls: &[(FullCurl, 1.0)],
                directions: &[],
            },
        ],
    },
    // Like U, spread apart.
    Letter {
        name: "V",
        rows: &[
            Row {
                fingers: &[Index],
                curls: &[(NoCurl, 1.0)],
                directions: &[(DiagonalUpLeft, 0.9)],
            },
            Row {
                fingers: &[Middle],
                curls: &[(NoCurl, 1.0)],
                directions: &[(DiagonalUpRight, 0.9)],
            },
            Row {
                fingers: &[Ring, Pinky],
                curls: &[(FullCurl, 1.0)],
                directions: &[],
            },
        ],
    },
    Letter {
        name: "W",
        rows: &[
            Row {
                fingers: &[Index, Middle, Ring],
                curls: &[(NoCurl, 1.0)],
                directions: &[(VerticalUp, 1.0)],
            },
            Row {
                fingers: &[Pinky],
                curls: &[(FullCurl, 1.0)],
                directions: &[],
            },
        ],
    },
    Letter {
        name: "Y",
        rows: &[
            Row {
                fingers: &[Thumb, Pinky],
                curls: &[(NoCurl, 1.0)],
                directions: &[],
            },
            Row {
                fingers: &[Index, Middle, Ring],
                curls: &[(FullCurl, 1.0)],
                directions: &[],
            },
        ],
    },
];
