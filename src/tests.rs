#[cfg(test)]
mod tests {
    use unordered_pair::UnorderedPair;

    use crate::builder::{BuilderInvalidReason, GridBuilder};
    use crate::cell::CellState;
    use crate::fill;
    use crate::graph::TowerGraph;
    use crate::grid::{CityGrid, GridError};
    use crate::location::Location;
    use crate::optimizer::CoverageOptimizer;

    fn seeded_grids() -> Vec<CityGrid> {
        (0..8)
            .map(|seed| CityGrid::new(12, 15, 2, fill::seeded(0.3, seed).unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn zero_dimensions() {
        assert_eq!(CityGrid::new(0, 5, 1, |_| false), Err(GridError::InvalidDimension { rows: 0, cols: 5 }));
        assert_eq!(CityGrid::new(3, 0, 1, |_| false), Err(GridError::InvalidDimension { rows: 3, cols: 0 }));
    }

    #[test]
    fn fill_called_row_major() {
        let mut seen = Vec::new();
        let grid = CityGrid::new(2, 3, 1, |location| {
            seen.push(location);
            location.col() == 1
        }).unwrap();

        assert_eq!(seen, vec![
            Location(0, 0), Location(0, 1), Location(0, 2),
            Location(1, 0), Location(1, 1), Location(1, 2),
        ]);
        assert_eq!(format!("{}", grid), ".#.
.#.
");
    }

    #[test]
    fn neighborhood_clipping() {
        let grid = GridBuilder::with_dims(5, 5).build().unwrap();

        assert_eq!(grid.neighborhood_bounds(Location(0, 0), 2), (0..=2, 0..=2));
        assert_eq!(grid.neighborhood_bounds(Location(4, 4), 2), (2..=4, 2..=4));
        assert_eq!(grid.neighborhood_bounds(Location(2, 2), 0), (2..=2, 2..=2));
        assert_eq!(grid.neighborhood_bounds(Location(1, 3), 10), (0..=4, 0..=4));
        assert_eq!(grid.neighborhood(Location(0, 4), 1).collect::<Vec<_>>(), vec![
            Location(0, 3), Location(0, 4), Location(1, 3), Location(1, 4),
        ]);
    }

    #[test]
    fn place_tower_covers_only_free_cells() {
        let mut grid = GridBuilder::from_pattern("
            .....
            .#...
            .....
        ").build().unwrap();

        grid.place_tower(Location(0, 0)).unwrap();
        assert_eq!(format!("{}", grid), "T+...
+#...
.....
");

        grid.place_tower(Location(1, 2)).unwrap();
        assert_eq!(format!("{}", grid), "T+++.
+#T+.
.+++.
");
        assert_eq!(grid.towers(), vec![Location(0, 0), Location(1, 2)]);
    }

    #[test]
    fn place_tower_rejections() {
        let mut grid = GridBuilder::from_pattern("
            ...
            .#.
            ...
        ").build().unwrap();
        grid.place_tower(Location(0, 0)).unwrap();
        let before = grid.clone();

        assert_eq!(grid.place_tower(Location(1, 1)), Err(GridError::PlacementRejected(Location(1, 1))));
        assert_eq!(grid.place_tower(Location(0, 0)), Err(GridError::PlacementRejected(Location(0, 0))));
        assert_eq!(grid.place_tower(Location(3, 0)), Err(GridError::PlacementRejected(Location(3, 0))));
        assert_eq!(grid, before);

        // covered cells may still host a tower
        assert_eq!(grid.cell(Location(0, 1)), Some(CellState::Covered));
        assert!(grid.is_available(Location(0, 1)));
        assert_eq!(grid.place_tower(Location(0, 1)), Ok(()));
        assert_eq!(grid.cell(Location(0, 1)), Some(CellState::Tower));
    }

    #[test]
    fn distances() {
        assert_eq!(Location(1, 2).manhattan_distance(Location(4, 0)), 5);
        assert_eq!(Location(4, 0).manhattan_distance(Location(1, 2)), 5);
        assert_eq!(Location(1, 2).chebyshev_distance(Location(4, 0)), 3);
        assert_eq!(Location(3, 3).manhattan_distance(Location(3, 3)), 0);
    }

    #[test]
    fn open_grid_needs_one_tower() {
        let mut grid = GridBuilder::with_dims(5, 5).radius(2).build().unwrap();

        assert_eq!(grid.optimize(), vec![Location(2, 2)]);
        assert_eq!(format!("{}", grid), "+++++
+++++
++T++
+++++
+++++
");
        assert_eq!(grid.census(), vec![
            (CellState::Blocked, 0),
            (CellState::Free, 0),
            (CellState::Tower, 1),
            (CellState::Covered, 24),
        ]);
        assert!(grid.shortest_paths().is_empty());
    }

    #[test]
    fn first_tower_bootstraps_scoring() {
        let mut grid = GridBuilder::with_dims(5, 5).build().unwrap();

        {
            let optimizer = CoverageOptimizer::from(&mut grid);
            assert_eq!(optimizer.evaluate(Location(0, 0)), 4);
            assert_eq!(optimizer.evaluate(Location(2, 2)), 9);
            assert_eq!(optimizer.evaluate(Location(7, 7)), 0);
        }

        grid.place_tower(Location(0, 0)).unwrap();
        let optimizer = CoverageOptimizer::from(&mut grid);
        // no tower within reach
        assert_eq!(optimizer.evaluate(Location(4, 4)), 0);
        assert_eq!(optimizer.evaluate(Location(1, 1)), 5);
    }

    #[test]
    fn corridor_grows_a_chain() {
        let mut grid = GridBuilder::with_dims(1, 7).build().unwrap();

        let placed = grid.optimize();
        assert_eq!(placed, vec![Location(0, 1), Location(0, 2), Location(0, 3), Location(0, 4), Location(0, 5)]);
        assert_eq!(format!("{}", grid), "+TTTTT+
");

        let graph = TowerGraph::from(&grid);
        assert_eq!(graph.links().len(), 4);
        assert_eq!(graph.component_count(), 1);
        assert_eq!(graph.neighbors(Location(0, 3)), vec![Location(0, 2), Location(0, 4)]);
        assert!(graph.neighbors(Location(0, 0)).is_empty());

        let paths = grid.shortest_paths();
        assert_eq!(paths.len(), 20);
        assert_eq!(paths.get(Location(0, 1), Location(0, 5)), Some(&[Location(0, 1), Location(0, 2), Location(0, 3), Location(0, 4)][..]));
        assert_eq!(paths.route(Location(0, 5), Location(0, 2)), Some(vec![Location(0, 5), Location(0, 4), Location(0, 3), Location(0, 2)]));
        assert_eq!(paths.hops(Location(0, 1), Location(0, 5)), Some(4));
        assert_eq!(paths.get(Location(0, 2), Location(0, 3)), Some(&[Location(0, 2)][..]));
        assert_eq!(paths.get(Location(0, 3), Location(0, 3)), None);

        let starts = paths.iter().map(|(start, end, _)| (start, end)).take(3).collect::<Vec<_>>();
        assert_eq!(starts, vec![
            (Location(0, 1), Location(0, 2)),
            (Location(0, 1), Location(0, 3)),
            (Location(0, 1), Location(0, 4)),
        ]);
    }

    #[test]
    fn zero_radius_places_one_tower() {
        let mut grid = GridBuilder::from_pattern("...").radius(0).build().unwrap();

        assert_eq!(grid.optimize(), vec![Location(0, 0)]);
        assert_eq!(format!("{}", grid), "T..
");
    }

    #[test]
    fn fully_blocked_grid() {
        let mut grid = CityGrid::new(4, 4, 1, |_| true).unwrap();

        assert!(grid.optimize().is_empty());
        assert!(grid.towers().is_empty());
        assert!(grid.shortest_paths().is_empty());
        assert_eq!(TowerGraph::from(&grid).component_count(), 0);
    }

    #[test]
    fn wall_separates_regions() {
        let pattern = "
            ...######...
            ...######...
            ...######...
        ";

        // the far region is never in reach of the first tower
        let mut grid = GridBuilder::from_pattern(pattern).build().unwrap();
        assert_eq!(grid.optimize(), vec![Location(1, 1)]);

        let mut grid = GridBuilder::from_pattern(pattern).build().unwrap();
        for tower in [Location(0, 0), Location(1, 1), Location(1, 10), Location(2, 11)] {
            grid.place_tower(tower).unwrap();
        }

        assert_eq!(TowerGraph::from(&grid).component_count(), 2);

        let paths = grid.shortest_paths();
        assert_eq!(paths.len(), 4);
        assert_eq!(paths.get(Location(0, 0), Location(1, 1)), Some(&[Location(0, 0)][..]));
        assert_eq!(paths.get(Location(2, 11), Location(1, 10)), Some(&[Location(2, 11)][..]));
        for (start, end, _) in paths.iter() {
            assert_eq!(start.col() < 3, end.col() < 3);
        }
        assert_eq!(paths.get(Location(0, 0), Location(1, 10)), None);
    }

    #[test]
    fn optimize_is_idempotent() {
        for mut grid in seeded_grids() {
            grid.optimize();
            let settled = grid.clone();

            assert!(grid.optimize().is_empty());
            assert_eq!(grid, settled);
        }
    }

    #[test]
    fn no_free_cell_left_in_reach() {
        for mut grid in seeded_grids() {
            grid.optimize();

            for tower in grid.towers() {
                assert!(grid.neighborhood(tower, grid.radius()).all(|location| grid.cell(location) != Some(CellState::Free)));
            }
        }
    }

    #[test]
    fn every_placement_links_to_an_earlier_tower() {
        for mut grid in seeded_grids() {
            let placed = grid.optimize();

            for (i, tower) in placed.iter().enumerate().skip(1) {
                assert!(placed[..i].iter().any(|earlier| earlier.chebyshev_distance(*tower) <= grid.radius()));
            }
            assert!(TowerGraph::from(&grid).component_count() <= 1);
        }
    }

    #[test]
    fn paths_are_symmetric_and_walkable() {
        for mut grid in seeded_grids() {
            grid.optimize();
            let graph = TowerGraph::from(&grid);
            let towers = graph.towers().len();
            let paths = graph.all_shortest_paths();

            // one connected network, so every ordered pair is routed
            assert_eq!(paths.len(), towers * towers.saturating_sub(1));

            for (start, end, _) in paths.iter() {
                assert_eq!(paths.hops(start, end), paths.hops(end, start));

                let route = paths.route(start, end).unwrap();
                assert_eq!(route.first(), Some(&start));
                assert_eq!(route.last(), Some(&end));
                for pair in route.windows(2) {
                    assert!(pair[0].chebyshev_distance(pair[1]) <= grid.radius());
                }
            }

            for UnorderedPair(a, b) in graph.links() {
                assert_eq!(paths.get(a, b), Some(&[a][..]));
                assert_eq!(paths.get(b, a), Some(&[b][..]));
            }
        }
    }

    #[test]
    fn builder_invalid_states() {
        let mut builder = GridBuilder::with_dims(3, 3);
        builder.block(Location(3, 0)).block(Location(0, 0));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));
        assert_eq!(builder.build(), Err(GridError::InvalidBuilder(vec![BuilderInvalidReason::FeatureOutOfBounds])));

        let ragged = GridBuilder::from_pattern("
            ...
            ..
        ");
        assert_eq!(ragged.is_valid(), Some(&vec![BuilderInvalidReason::RaggedPattern]));

        assert_eq!(GridBuilder::from_pattern("").build(), Err(GridError::InvalidDimension { rows: 0, cols: 0 }));
    }

    #[test]
    fn builder_blocks_rectangles() {
        let grid = GridBuilder::with_dims(4, 5)
            .block_rect(UnorderedPair(Location(2, 3), Location(1, 1)))
            .block(Location(3, 4))
            .build()
            .unwrap();

        assert_eq!(format!("{}", grid), ".....
.###.
.###.
....#
");
        assert_eq!(grid.count(CellState::Blocked), 7);
    }

    #[test]
    fn fill_thresholds() {
        let mut rng = rand::thread_rng();
        assert_eq!(fill::uniform(-0.1, &mut rng).err(), Some(GridError::InvalidThreshold(-0.1)));
        assert!(fill::seeded(1.5, 0).is_err());
        assert!(fill::entropy(f64::NAN).is_err());

        let open = CityGrid::new(6, 6, 1, fill::uniform(0.0, &mut rng).unwrap()).unwrap();
        assert_eq!(open.count(CellState::Blocked), 0);
        let closed = CityGrid::new(6, 6, 1, fill::seeded(1.0, 7).unwrap()).unwrap();
        assert_eq!(closed.count(CellState::Blocked), 36);

        let a = CityGrid::new(9, 9, 1, fill::seeded(0.4, 42).unwrap()).unwrap();
        let b = CityGrid::new(9, 9, 1, fill::seeded(0.4, 42).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cell_state_names() {
        assert_eq!(CellState::Covered.to_string(), "Covered");
        assert!(CellState::Free.is_available());
        assert_eq!(CellState::default(), CellState::Free);
        assert_eq!(CityGrid::new(2, 2, 1, |_| false).unwrap().count(CellState::default()), 4);
        assert!(!CellState::Tower.is_available());
    }

    #[test]
    fn unavailable_cells_score_nothing() {
        let mut grid = GridBuilder::from_pattern("
            ...
            .#.
            ...
        ").build().unwrap();

        {
            let optimizer = CoverageOptimizer::from(&mut grid);
            assert_eq!(optimizer.evaluate(Location(1, 1)), 0);
            assert_eq!(optimizer.evaluate(Location(0, 0)), 3);
        }

        grid.place_tower(Location(0, 0)).unwrap();
        let optimizer = CoverageOptimizer::from(&mut grid);
        assert_eq!(optimizer.evaluate(Location(0, 0)), 0);
        assert_eq!(optimizer.evaluate(Location(0, 1)), 2);
    }

    #[test]
    fn mask_fill_and_flat_routes() {
        // (0, 5) lies past the end of the mask and stays free
        let mut grid = CityGrid::new(1, 6, 1, fill::mask(6, &[0, 0, 0, 0, 2])).unwrap();
        assert_eq!(format!("{}", grid), "....#.
");

        assert_eq!(grid.optimize(), vec![Location(0, 1), Location(0, 2)]);
        assert_eq!(format!("{}", grid), "+TT+#.
");
        assert_eq!(grid.shortest_paths().flat_routes(), vec![vec![0, 1, 0, 2], vec![0, 2, 0, 1]]);

        let grid = CityGrid::new(2, 3, 1, fill::mask(3, &[0, 1, 0, 255])).unwrap();
        assert_eq!(format!("{}", grid), ".#.
#..
");
    }

    #[test]
    fn flat_routes_end_at_end_tower() {
        let mut grid = GridBuilder::with_dims(1, 7).build().unwrap();
        grid.optimize();
        let paths = grid.shortest_paths();
        let flat = paths.flat_routes();

        assert_eq!(flat.len(), paths.len());
        assert_eq!(flat[2], vec![0, 1, 0, 2, 0, 3, 0, 4]);
        for ((start, end, _), route) in paths.iter().zip(flat.iter()) {
            assert_eq!(route[..2], [start.row() as u32, start.col() as u32]);
            assert_eq!(route[route.len() - 2..], [end.row() as u32, end.col() as u32]);
        }
    }
}
