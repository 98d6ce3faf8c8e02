use js_sys::{Array, Uint32Array};
use wasm_bindgen::prelude::*;

use crate::fill;
use crate::grid::CityGrid;

/// Place towers on a `rows` by `cols` grid and route between every connected pair.
///
/// `blocked` is a row-major mask where any nonzero byte is a blocked cell; missing trailing bytes count as free.
/// Each element of the returned array is a `Uint32Array` of flattened `[row, col, row, col, ...]` coordinates, running from the start tower to the end tower inclusive.
#[wasm_bindgen(js_name = planRoutes)]
pub fn plan_routes(rows: usize, cols: usize, radius: usize, blocked: &[u8]) -> Result<Array, JsError> {
    let mut grid = CityGrid::new(rows, cols, radius, fill::mask(cols, blocked))?;
    grid.optimize();

    let routes = Array::new();
    for route in grid.shortest_paths().flat_routes() {
        routes.push(&Uint32Array::from(route.as_slice()));
    }

    Ok(routes)
}
