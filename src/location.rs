use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

/// A single grid coordinate.
pub type Coord = usize;
/// A grid extent along one axis; never zero.
pub type Dimension = NonZero<Coord>;

/// A location `(row, col)` on a grid. The top left corner is `Location(0, 0)`.
///
/// Locations order row-major, so sorting a set of them yields the grid scan order.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row of this location.
    #[inline]
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column of this location.
    #[inline]
    pub fn col(&self) -> Coord {
        self.1
    }

    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    /// Sum of absolute row and column differences between `self` and `other`.
    pub fn manhattan_distance(&self, other: Location) -> Coord {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    /// Largest of the absolute row and column differences, i.e. the smallest radius whose square around `self` contains `other`.
    pub fn chebyshev_distance(&self, other: Location) -> Coord {
        self.0.abs_diff(other.0).max(self.1.abs_diff(other.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
