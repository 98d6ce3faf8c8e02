#![warn(missing_docs)]

//! # `towerlink`
//!
//! Places coverage towers on a city grid of blocked and free cells, then routes between them.
//! Begin by building a [`CityGrid`], either directly with [`CityGrid::new`] and a fill function such as those in [`fill`], or with a [`GridBuilder`](builder::GridBuilder).
//! Call [`optimize()`](CityGrid::optimize) to place towers in place, then [`shortest_paths()`](CityGrid::shortest_paths) to obtain a [`PathTable`].
//!
//! # Internals
//! Every tower covers the square of cells within a fixed radius of it, and two towers are linked whenever one lies within the other's square.
//!
//! Placement is greedy. Each step scores every cell a tower could go on by the number of still-free cells in its square and takes the best,
//! keeping the earliest cell in row-major order on ties.
//! A cell scores nothing unless some tower is already in its square, except while the grid has no towers at all;
//! every tower after the first is therefore linked to an earlier one and the towers form a single connected network.
//! Placement stops once no cell scores above zero.
//!
//! Routing builds an undirected [`petgraph`] graph over the towers ([`TowerGraph`]) and runs a breadth-first search for every ordered pair,
//! so a path is shortest in hops, not in distance on the grid.

pub use builder::GridBuilder;
pub use cell::CellState;
pub use graph::{PathTable, TowerGraph};
pub use grid::{CityGrid, GridError};
pub use location::Location;
pub use optimizer::CoverageOptimizer;

pub mod builder;
pub(crate) mod cell;
pub mod fill;
pub(crate) mod graph;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod optimizer;
mod tests;
#[cfg(feature = "wasm")]
mod wasm;
