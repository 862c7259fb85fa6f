use crate::error::{RenderError, Result};

const SQUARE: [(f64, f64); 8] = [
    (-0.5, 0.5),
    (0.5, 0.5),
    (0.5, -0.5),
    (-0.5, -0.5),
    (0., 0.5),
    (0.5, 0.),
    (0., -0.5),
    (-0.5, 0.),
];

const CIRCLE: [(f64, f64); 8] = [
    (-0.3535533906, 0.3535533906),
    (0.3535533906, 0.3535533906),
    (0.3535533906, -0.3535533906),
    (-0.3535533906, -0.3535533906),
    (0., 0.5),
    (0.5, 0.),
    (0., -0.5),
    (-0.5, 0.),
];

const HEXAGON: [(f64, f64); 6] = [
    (-0.4330127019, 0.25),
    (0.4330127019, 0.25),
    (0.4330127019, -0.25),
    (-0.4330127019, -0.25),
    (0., 0.5),
    (0., -0.5),
];

/// Layout of the sub-pixel offsets averaged into one pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    Square,
    Circle,
    Hexagon,
}

impl Pattern {
    pub fn offsets(&self) -> &'static [(f64, f64)] {
        match self {
            Self::Square => &SQUARE,
            Self::Circle => &CIRCLE,
            Self::Hexagon => &HEXAGON,
        }
    }
}

/// A pattern together with how many of its offsets to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sampling {
    pattern: Pattern,
    count: usize,
}

impl Sampling {
    pub fn new(pattern: Pattern, count: usize) -> Result<Self> {
        let available = pattern.offsets().len();
        if count == 0 || count > available {
            return Err(RenderError::InvalidSampling {
                requested: count,
                available,
            });
        }
        Ok(Self { pattern, count })
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The first `count` offsets of the pattern.
    pub fn offsets(&self) -> &'static [(f64, f64)] {
        &self.pattern.offsets()[..self.count]
    }
}
