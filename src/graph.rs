use std::collections::{BTreeMap, HashSet, VecDeque};

use itertools::Itertools;
use petgraph::algo::connected_components;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::grid::CityGrid;
use crate::location::Location;

/// The undirected graph of towers on a [`CityGrid`], with an edge between every two towers lying within one radius of each other.
///
/// The graph is a snapshot; building it does not borrow the grid beyond [`From::from`].
pub struct TowerGraph {
    graph: UnGraphMap<Location, ()>,
    towers: Vec<Location>,
}

impl From<&CityGrid> for TowerGraph {
    fn from(grid: &CityGrid) -> Self {
        let towers = grid.towers();
        let mut graph = UnGraphMap::with_capacity(towers.len(), towers.len() * 4);

        for tower in towers.iter() {
            graph.add_node(*tower);
        }

        // adding in row-major order keeps each adjacency list row-major too
        for tower in towers.iter() {
            for neighbor in grid.towers_within(*tower, grid.radius()) {
                graph.add_edge(*tower, neighbor, ());
            }
        }

        Self { graph, towers }
    }
}

impl TowerGraph {
    /// Every tower, in row-major order.
    pub fn towers(&self) -> &[Location] {
        &self.towers
    }

    /// Towers adjacent to `tower`, in row-major order.
    /// Empty if `tower` is not a tower.
    pub fn neighbors(&self, tower: Location) -> Vec<Location> {
        self.graph.neighbors(tower).collect_vec()
    }

    /// Every edge of the graph, once each.
    pub fn links(&self) -> Vec<UnorderedPair<Location>> {
        self.graph.all_edges()
            .map(|(a, b, _)| UnorderedPair::from((a, b)))
            .collect_vec()
    }

    /// Number of connected groups of towers; zero for an empty graph.
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Find a shortest hop-path from `start` to `end` by breadth-first search.
    ///
    /// The returned path begins with `start` and lists every tower passed through on the way, but never `end` itself.
    /// A tower adjacent to `start` is therefore reached by `[start]`.
    /// Returns [`None`] if `end` is unreachable.
    ///
    /// Towers are marked visited when dequeued rather than when queued, so the queue may briefly hold duplicates.
    pub fn shortest_path(&self, start: Location, end: Location) -> Option<Vec<Location>> {
        let mut queue = VecDeque::from([(start, Vec::new())]);
        let mut visited = HashSet::new();

        while let Some((current, path)) = queue.pop_front() {
            if current == end {
                log::trace!("path {} -> {} found after {} hops", start, end, path.len());
                return Some(path);
            }

            if visited.insert(current) {
                for neighbor in self.graph.neighbors(current) {
                    let mut next = Vec::with_capacity(path.len() + 1);
                    next.extend_from_slice(&path);
                    next.push(current);
                    queue.push_back((neighbor, next));
                }
            }
        }

        log::trace!("no path {} -> {}", start, end);
        None
    }

    /// Compute [`shortest_path`](Self::shortest_path) for every ordered pair of distinct towers, keeping the pairs which are connected.
    pub fn all_shortest_paths(&self) -> PathTable {
        let table = self.towers.iter()
            .cartesian_product(self.towers.iter())
            .filter(|(start, end)| start != end)
            .filter_map(|(start, end)| self.shortest_path(*start, *end)
                .map(|path| ((*start, *end), path)))
            .collect::<PathTable>();

        log::info!("routed {} tower pairs across {} towers", table.len(), self.towers.len());
        table
    }
}

/// Shortest paths between ordered pairs of towers, as produced by [`TowerGraph::all_shortest_paths`].
///
/// Each stored path excludes its end tower; see [`route`](Self::route) for the full sequence.
/// Pairs with no connecting path are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathTable {
    // keyed (start, end); Location orders row-major, so iteration follows tower order
    paths: BTreeMap<(Location, Location), Vec<Location>>,
}

impl PathTable {
    /// The stored path from `start` to `end`, excluding `end`.
    pub fn get(&self, start: Location, end: Location) -> Option<&[Location]> {
        self.paths.get(&(start, end)).map(Vec::as_slice)
    }

    /// The full route from `start` to `end`, with `end` appended.
    pub fn route(&self, start: Location, end: Location) -> Option<Vec<Location>> {
        self.get(start, end).map(|path| path.iter().copied().chain([end]).collect_vec())
    }

    /// Every route as flattened `[row, col, row, col, ...]` coordinates, end tower included, in [`iter`](Self::iter) order.
    pub fn flat_routes(&self) -> Vec<Vec<u32>> {
        self.iter()
            .map(|(_, end, path)| path.iter()
                .chain([&end])
                .flat_map(|location| [location.0 as u32, location.1 as u32])
                .collect_vec())
            .collect_vec()
    }

    /// Number of edges crossed going from `start` to `end`.
    pub fn hops(&self, start: Location, end: Location) -> Option<usize> {
        self.get(start, end).map(<[Location]>::len)
    }

    /// Every entry as `(start, end, path)`, ordered by start tower and then end tower.
    pub fn iter(&self) -> impl Iterator<Item = (Location, Location, &[Location])> {
        self.paths.iter().map(|((start, end), path)| (*start, *end, path.as_slice()))
    }

    /// Number of connected ordered pairs.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no pair of towers is connected.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<((Location, Location), Vec<Location>)> for PathTable {
    fn from_iter<T: IntoIterator<Item = ((Location, Location), Vec<Location>)>>(iter: T) -> Self {
        Self { paths: iter.into_iter().collect() }
    }
}
