//! Hand-built grids, for when a random fill is not wanted.

use std::collections::HashSet;

use unordered_pair::UnorderedPair;

use crate::grid::{CityGrid, GridError};
use crate::location::{Coord, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A blocked cell or rectangle was specified outside the bounds given to [`GridBuilder::with_dims`].
    FeatureOutOfBounds,
    /// A pattern passed to [`GridBuilder::from_pattern`] has rows of differing widths.
    RaggedPattern,
}

/// A builder for [`CityGrid`]s with hand-placed blocked cells, mostly useful where a random fill is not wanted.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    // rows, cols
    dims: (usize, usize),
    radius: Coord,
    blocked: HashSet<Location>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::with_dims(10, 10)
    }
}

impl GridBuilder {
    /// Construct a new [`Self`] with every cell free and a tower radius of 1.
    pub fn with_dims(rows: usize, cols: usize) -> Self {
        Self {
            dims: (rows, cols),
            radius: 1,
            blocked: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Construct a new [`Self`] from a text picture of the grid, one line per row.
    ///
    /// `#` marks a blocked cell and any other character a free one.
    /// Surrounding whitespace on each line and blank lines are ignored.
    /// Rows of differing widths leave the builder in a [`RaggedPattern`](BuilderInvalidReason::RaggedPattern) invalid state.
    pub fn from_pattern(pattern: &str) -> Self {
        let lines = pattern.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let cols = lines.first().map_or(0, |line| line.chars().count());

        let mut builder = Self::with_dims(lines.len(), cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                builder.invalid_reasons.push(BuilderInvalidReason::RaggedPattern);
                return builder;
            }

            builder.blocked.extend(line.chars()
                .enumerate()
                .filter(|(_, glyph)| *glyph == '#')
                .map(|(col, _)| Location(row, col)));
        }

        builder
    }

    #[inline]
    fn contains(&self, location: Location) -> bool {
        location.0 < self.dims.0 && location.1 < self.dims.1
    }

    /// Set the tower radius of the resulting grid.
    pub fn radius(&mut self, radius: Coord) -> &mut Self {
        self.radius = radius;
        self
    }

    /// Block the cell at `location`.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn block(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.contains(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.blocked.insert(location);
        self
    }

    /// Block every cell in the rectangle spanned by two opposite `corners`, inclusive.
    /// The order in which the corners are given does not matter.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if either corner is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn block_rect(&mut self, corners: UnorderedPair<Location>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let UnorderedPair(a, b) = corners;
        if !self.contains(a) || !self.contains(b) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        for row in a.0.min(b.0)..=a.0.max(b.0) {
            for col in a.1.min(b.1)..=a.1.max(b.1) {
                self.blocked.insert(Location(row, col));
            }
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`CityGrid`].
    ///
    /// Fails with [`GridError::InvalidBuilder`] if the builder is invalid, or [`GridError::InvalidDimension`] if it has no rows or columns.
    pub fn build(&self) -> Result<CityGrid, GridError> {
        if !self.invalid_reasons.is_empty() {
            return Err(GridError::InvalidBuilder(self.invalid_reasons.clone()));
        }

        CityGrid::new(self.dims.0, self.dims.1, self.radius, |location| self.blocked.contains(&location))
    }
}
