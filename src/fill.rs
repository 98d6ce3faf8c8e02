//! Random fill functions for [`CityGrid::new`](crate::CityGrid::new).
//!
//! Each cell is blocked independently with probability `threshold`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::GridError;
use crate::location::Location;

fn check_threshold(threshold: f64) -> Result<(), GridError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(GridError::InvalidThreshold(threshold))
    }
}

/// Block cells with probability `threshold`, drawing from a borrowed `rng`.
///
/// Returns [`GridError::InvalidThreshold`] unless `threshold` lies in `[0, 1]`.
pub fn uniform<'a, R: Rng>(threshold: f64, rng: &'a mut R) -> Result<impl FnMut(Location) -> bool + 'a, GridError> {
    check_threshold(threshold)?;
    Ok(move |_: Location| rng.gen::<f64>() < threshold)
}

/// Like [`uniform`], but reproducible: the same `seed` always yields the same grid.
pub fn seeded(threshold: f64, seed: u64) -> Result<impl FnMut(Location) -> bool, GridError> {
    check_threshold(threshold)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(move |_: Location| rng.gen::<f64>() < threshold)
}

/// Like [`uniform`], seeded from the operating system.
pub fn entropy(threshold: f64) -> Result<impl FnMut(Location) -> bool, GridError> {
    check_threshold(threshold)?;
    let mut rng = StdRng::from_entropy();
    Ok(move |_: Location| rng.gen::<f64>() < threshold)
}

/// Block cells according to a row-major `blocked` mask over a grid `cols` wide.
///
/// Any nonzero byte blocks its cell; cells past the end of `blocked` stay free.
pub fn mask(cols: usize, blocked: &[u8]) -> impl FnMut(Location) -> bool + '_ {
    move |Location(row, col): Location| blocked.get(row * cols + col).is_some_and(|byte| *byte != 0)
}
