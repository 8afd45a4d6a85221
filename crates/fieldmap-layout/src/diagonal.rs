//! Diagonal choice for unchained boxes.
//!
//! An unchained box is described by two opposite corners of its
//! rectangle. Which diagonal is used is a coin flip per box per render.
//! The [`DiagonalChooser`] trait isolates that decision so renders can be
//! made reproducible with a seeded or fixed chooser.

use rand::Rng;

use crate::types::{Point, Rect};

/// One of the two diagonals of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// Top-left to bottom-right: `(left, top)`, `(right, bott)`.
    Main,
    /// Top-right to bottom-left: `(right, top)`, `(left, bott)`.
    Anti,
}

impl Diagonal {
    /// The two corners of `rect` on this diagonal, top corner first.
    #[must_use]
    pub const fn corners(self, rect: &Rect) -> (Point, Point) {
        match self {
            Self::Main => (
                Point::new(rect.left, rect.top),
                Point::new(rect.right, rect.bott),
            ),
            Self::Anti => (
                Point::new(rect.right, rect.top),
                Point::new(rect.left, rect.bott),
            ),
        }
    }
}

/// Decides which diagonal describes a box.
pub trait DiagonalChooser {
    /// Choose the diagonal for the box at `box_index`.
    fn choose(&mut self, box_index: usize) -> Diagonal;
}

/// Uniform 50/50 choice driven by a random number generator.
#[derive(Debug, Clone)]
pub struct RandomDiagonal<R> {
    rng: R,
}

impl<R: Rng> RandomDiagonal<R> {
    /// Wrap a random number generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DiagonalChooser for RandomDiagonal<R> {
    fn choose(&mut self, _box_index: usize) -> Diagonal {
        if self.rng.gen_range(0..2) == 0 {
            Diagonal::Main
        } else {
            Diagonal::Anti
        }
    }
}

/// Always the same diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDiagonal(pub Diagonal);

impl DiagonalChooser for FixedDiagonal {
    fn choose(&mut self, _box_index: usize) -> Diagonal {
        self.0
    }
}

impl<F: FnMut(usize) -> Diagonal> DiagonalChooser for F {
    fn choose(&mut self, box_index: usize) -> Diagonal {
        self(box_index)
    }
}
