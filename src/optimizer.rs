use ndarray::s;

use crate::cell::CellState;
use crate::grid::CityGrid;
use crate::location::Location;

/// Greedy tower placement over a borrowed [`CityGrid`].
///
/// Each step places one tower on the available cell whose square covers the most still-free cells.
/// Once a tower exists, a candidate only scores if some tower already lies within its square, so the tower graph stays connected as it grows.
/// The first tower is exempt from that rule and seeds the network.
pub struct CoverageOptimizer<'a> {
    grid: &'a mut CityGrid,
}

impl<'a> From<&'a mut CityGrid> for CoverageOptimizer<'a> {
    fn from(grid: &'a mut CityGrid) -> Self {
        Self { grid }
    }
}

impl CoverageOptimizer<'_> {
    /// The score a tower at `location` would get against the grid as it stands.
    ///
    /// Zero for locations which cannot take a tower: off the grid, blocked, or already a tower.
    pub fn evaluate(&self, location: Location) -> usize {
        if !self.grid.is_available(location) {
            return 0;
        }

        self.score(location, self.grid.has_towers())
    }

    fn score(&self, location: Location, existing_towers: bool) -> usize {
        // with no towers anywhere, any candidate may seed the network
        let mut tower_count = if existing_towers { 0 } else { 1 };
        let mut free_count = 0;

        let (rows, cols) = self.grid.neighborhood_bounds(location, self.grid.radius);
        for cell in self.grid.cells.slice(s![rows, cols]) {
            match cell {
                CellState::Tower => tower_count += 1,
                CellState::Free => free_count += 1,
                _ => {}
            }
        }

        if tower_count == 0 {
            0
        } else {
            free_count
        }
    }

    fn best_candidate(&self) -> Option<(Location, usize)> {
        let existing_towers = self.grid.has_towers();
        let mut best = None;
        let mut best_score = 0;

        for (ind, cell) in self.grid.cells.indexed_iter() {
            if !cell.is_available() {
                continue;
            }

            let location = Location::from(ind);
            let score = self.score(location, existing_towers);
            // strict comparison: the earliest candidate in row-major order keeps ties
            if score > best_score {
                best = Some(location);
                best_score = score;
            }
        }

        best.map(|location| (location, best_score))
    }

    /// Place a single tower at the best-scoring candidate, if any candidate scores above zero.
    ///
    /// Returns where the tower went.
    pub fn step(&mut self) -> Option<Location> {
        let (location, score) = self.best_candidate()?;
        // candidates are available by construction
        if let Err(err) = self.grid.place_tower(location) {
            debug_assert!(false, "best candidate was unplaceable: {}", err);
            log::warn!("stopping placement early: {}", err);
            return None;
        }
        log::debug!("placed tower at {} covering {} new cells", location, score);

        Some(location)
    }

    /// Run [`step`](Self::step) until no candidate scores above zero.
    ///
    /// Returns the placed locations in placement order; an empty result means the grid was already at a fixed point.
    pub fn optimize(&mut self) -> Vec<Location> {
        let mut placed = Vec::new();
        while let Some(location) = self.step() {
            placed.push(location);
        }

        log::info!(
            "placement finished with {} new towers, {} free cells left uncovered",
            placed.len(),
            self.grid.count(CellState::Free),
        );
        placed
    }
}
