use std::fmt::{Display, Formatter};
use std::num::NonZero;
use std::ops::RangeInclusive;

use itertools::Itertools;
use ndarray::{s, Array2};
use strum::VariantArray;
use thiserror::Error;

use crate::builder::BuilderInvalidReason;
use crate::cell::CellState;
use crate::graph::{PathTable, TowerGraph};
use crate::location::{Coord, Dimension, Location};
use crate::optimizer::CoverageOptimizer;

/// Reasons grid construction or mutation may fail.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum GridError {
    /// A grid needs at least one row and one column.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// A tower was requested on a cell which is blocked, already a tower, or off the grid.
    #[error("cannot place a tower at {0}")]
    PlacementRejected(Location),
    /// A fill threshold must be a probability.
    #[error("coverage threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f64),
    /// A [`GridBuilder`](crate::builder::GridBuilder) was misused before building.
    #[error("grid builder is invalid: {0:?}")]
    InvalidBuilder(Vec<BuilderInvalidReason>),
}

/// A rectangular service area of [`CellState`]s sharing a single tower radius.
///
/// Construct one directly with [`CityGrid::new`] and a fill function, or through a [`GridBuilder`](crate::builder::GridBuilder).
/// Then call [`optimize()`](CityGrid::optimize) to place towers and [`shortest_paths()`](CityGrid::shortest_paths) to route between them.
#[derive(Clone, Debug, PartialEq)]
pub struct CityGrid {
    pub(crate) cells: Array2<CellState>,
    // rows, cols
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) radius: Coord,
}

impl CityGrid {
    /// Allocate a `rows` by `cols` grid whose towers reach `radius` cells in every direction.
    ///
    /// `fill` is called once per location in row-major order and returns `true` for cells which start [`Blocked`](CellState::Blocked).
    /// Every other cell starts [`Free`](CellState::Free).
    ///
    /// Returns [`GridError::InvalidDimension`] if either dimension is zero.
    pub fn new<F>(rows: usize, cols: usize, radius: Coord, mut fill: F) -> Result<Self, GridError>
    where
        F: FnMut(Location) -> bool,
    {
        let dims = match (NonZero::new(rows), NonZero::new(cols)) {
            (Some(rows), Some(cols)) => (rows, cols),
            _ => return Err(GridError::InvalidDimension { rows, cols }),
        };

        let cells = Array2::from_shape_fn((rows, cols), |ind| {
            if fill(Location::from(ind)) {
                CellState::Blocked
            } else {
                CellState::default()
            }
        });

        Ok(Self { cells, dims, radius })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.0.get()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.1.get()
    }

    /// The square half-width used both for coverage and for tower adjacency.
    #[inline]
    pub fn radius(&self) -> Coord {
        self.radius
    }

    /// Read-only view of every cell, indexed `[row, col]`.
    pub fn cells(&self) -> &Array2<CellState> {
        &self.cells
    }

    /// The state at `location`, or [`None`] if it lies off the grid.
    pub fn cell(&self, location: Location) -> Option<CellState> {
        self.cells.get(location.as_index()).copied()
    }

    /// Whether a tower may be placed at `location`: it must be on the grid and either free or covered.
    pub fn is_available(&self, location: Location) -> bool {
        self.cell(location).is_some_and(CellState::is_available)
    }

    /// Place a tower at `location` and cover every free cell within [`radius`](Self::radius) of it.
    ///
    /// Cells already covered, blocked, or holding a tower are left alone.
    /// If `location` is not [available](Self::is_available), nothing changes and [`GridError::PlacementRejected`] is returned.
    pub fn place_tower(&mut self, location: Location) -> Result<(), GridError> {
        if !self.is_available(location) {
            return Err(GridError::PlacementRejected(location));
        }

        self.cells[location.as_index()] = CellState::Tower;

        let (rows, cols) = self.neighborhood_bounds(location, self.radius);
        self.cells.slice_mut(s![rows, cols]).map_inplace(|cell| {
            if *cell == CellState::Free {
                *cell = CellState::Covered;
            }
        });

        Ok(())
    }

    /// The inclusive row and column ranges of the square of `radius` around `location`, clipped to the grid.
    ///
    /// `location` must lie on the grid.
    /// All radius-based scans go through here so coverage, scoring, and adjacency agree on the edges.
    pub fn neighborhood_bounds(&self, location: Location, radius: Coord) -> (RangeInclusive<Coord>, RangeInclusive<Coord>) {
        let clip = |centre: Coord, dim: Coord| centre.saturating_sub(radius)..=centre.saturating_add(radius).min(dim - 1);
        (clip(location.0, self.rows()), clip(location.1, self.cols()))
    }

    /// Every location in the clipped square of `radius` around `location`, in row-major order, `location` included.
    pub fn neighborhood(&self, location: Location, radius: Coord) -> impl Iterator<Item = Location> {
        let (rows, cols) = self.neighborhood_bounds(location, radius);
        rows.cartesian_product(cols).map(Location::from)
    }

    /// Every tower other than `location` itself within `radius` of `location`, in row-major order.
    pub fn towers_within(&self, location: Location, radius: Coord) -> Vec<Location> {
        if self.cell(location).is_none() {
            return Vec::new();
        }

        self.neighborhood(location, radius)
            .filter(|other| *other != location && self.cells[other.as_index()] == CellState::Tower)
            .collect_vec()
    }

    /// All tower locations in row-major order.
    pub fn towers(&self) -> Vec<Location> {
        self.cells.indexed_iter()
            .filter(|(_, cell)| **cell == CellState::Tower)
            .map(|(ind, _)| Location::from(ind))
            .collect_vec()
    }

    /// Whether any tower has been placed.
    pub fn has_towers(&self) -> bool {
        self.cells.iter().any(|cell| *cell == CellState::Tower)
    }

    /// How many cells are currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Cell counts for every [`CellState`], in declaration order.
    pub fn census(&self) -> Vec<(CellState, usize)> {
        CellState::VARIANTS.iter()
            .map(|state| (*state, self.count(*state)))
            .collect_vec()
    }

    /// Place towers greedily until no placement covers anything new, deferring to a [`CoverageOptimizer`].
    ///
    /// Returns the placed locations in placement order.
    pub fn optimize(&mut self) -> Vec<Location> {
        CoverageOptimizer::from(self).optimize()
    }

    /// Build the [`TowerGraph`] of the current towers and compute shortest paths between every ordered pair of them.
    pub fn shortest_paths(&self) -> PathTable {
        TowerGraph::from(self).all_shortest_paths()
    }
}

impl Display for CityGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.rows() * (self.cols() + 1));

        for row in self.cells.rows() {
            out.extend(row.iter().map(|cell| cell.glyph()));
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
