//! Region-adjacency view of a Flood-It board.
//!
//! An island is a maximal 4-connected group of cells sharing one color. Two
//! distinct islands of the same color are never adjacent, so painting the
//! flood region merges exactly the adjacent islands of the new color, and no
//! others. That makes the puzzle a graph problem: a search state only needs
//! the set of islands already absorbed and the region's current color.

use std::collections::{BTreeSet, VecDeque};

use crate::engine::{Board, Tile};

/// A fixed-capacity set of island ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IslandSet {
    words: Vec<u64>,
}

impl IslandSet {
    /// An empty set able to hold ids `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        IslandSet {
            words: vec![0; capacity.div_ceil(64)],
        }
    }

    /// Inserts `id`, returning whether it was newly added.
    pub fn insert(&mut self, id: usize) -> bool {
        let (word, bit) = (id / 64, 1u64 << (id % 64));
        let added = self.words[word] & bit == 0;
        self.words[word] |= bit;
        added
    }

    pub fn contains(&self, id: usize) -> bool {
        self.words
            .get(id / 64)
            .is_some_and(|word| word & (1u64 << (id % 64)) != 0)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(index, &word)| {
            (0..64)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| index * 64 + bit)
        })
    }
}

/// One island of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Island {
    pub color: Tile,
    pub size: usize,
}

/// A Flood-It search state: which islands the flood region has absorbed, and
/// the color it currently has.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FloodState {
    absorbed: IslandSet,
    color: Tile,
}

impl FloodState {
    pub fn absorbed(&self) -> &IslandSet {
        &self.absorbed
    }

    pub fn color(&self) -> Tile {
        self.color
    }
}

/// The island graph of a board.
#[derive(Clone, Debug)]
pub struct IslandGraph {
    board: Board,
    islands: Vec<Island>,
    adjacency: Vec<Vec<usize>>,
    labels: Vec<Vec<usize>>,
}

impl IslandGraph {
    /// Labels the board's islands in row-major order of their first cell, so
    /// the island holding the top-left corner is always id 0.
    pub fn from_board(board: &Board) -> Self {
        let mut labels = vec![vec![usize::MAX; board.cols()]; board.rows()];
        let mut islands = Vec::new();

        for r in 0..board.rows() {
            for c in 0..board.cols() {
                if labels[r][c] != usize::MAX {
                    continue;
                }
                let id = islands.len();
                let region = board.find_region(r, c);
                for &(rr, cc) in &region {
                    labels[rr][cc] = id;
                }
                islands.push(Island {
                    color: board.get_tile(r, c),
                    size: region.len(),
                });
            }
        }

        let mut neighbours = vec![BTreeSet::new(); islands.len()];
        for r in 0..board.rows() {
            for c in 0..board.cols() {
                let id = labels[r][c];
                for (nr, nc) in board.neighbours(r, c) {
                    let other = labels[nr][nc];
                    if other != id {
                        neighbours[id].insert(other);
                    }
                }
            }
        }

        IslandGraph {
            board: board.clone(),
            islands,
            adjacency: neighbours
                .into_iter()
                .map(|set| set.into_iter().collect())
                .collect(),
            labels,
        }
    }

    /// Number of islands.
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    pub fn island(&self, id: usize) -> &Island {
        &self.islands[id]
    }

    /// Islands adjacent to `id`, ascending.
    pub fn neighbours(&self, id: usize) -> &[usize] {
        &self.adjacency[id]
    }

    /// The untouched board: only the corner island is absorbed.
    pub fn initial_state(&self) -> FloodState {
        let mut absorbed = IslandSet::with_capacity(self.len());
        absorbed.insert(0);
        FloodState {
            absorbed,
            color: self.islands[0].color,
        }
    }

    /// Unabsorbed islands touching the flood region, ascending.
    pub fn frontier(&self, state: &FloodState) -> Vec<usize> {
        let mut frontier = BTreeSet::new();
        for id in state.absorbed.iter() {
            for &other in &self.adjacency[id] {
                if !state.absorbed.contains(other) {
                    frontier.insert(other);
                }
            }
        }
        frontier.into_iter().collect()
    }

    /// Paints the flood region with `color`.
    ///
    /// Returns `None` when `color` is the region's color already, or when no
    /// adjacent island has it: such a paint changes nothing worth searching.
    pub fn paint(&self, state: &FloodState, color: Tile) -> Option<FloodState> {
        if state.color == color {
            return None;
        }
        let mut absorbed = state.absorbed.clone();
        let mut merged = false;
        for id in self.frontier(state) {
            if self.islands[id].color == color {
                absorbed.insert(id);
                merged = true;
            }
        }
        merged.then_some(FloodState { absorbed, color })
    }

    /// Whether the flood region covers the whole board.
    pub fn is_flooded(&self, state: &FloodState) -> bool {
        state.absorbed.len() == self.len()
    }

    /// Hop distance from the flood region to every island (0 for absorbed
    /// ones), or `None` for islands the region can never reach.
    pub fn distances(&self, state: &FloodState) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.len()];
        let mut queue = VecDeque::new();
        for id in state.absorbed.iter() {
            distances[id] = Some(0);
            queue.push_back(id);
        }
        while let Some(id) = queue.pop_front() {
            let next = distances[id].map(|d| d + 1);
            for &other in &self.adjacency[id] {
                if distances[other].is_none() {
                    distances[other] = next;
                    queue.push_back(other);
                }
            }
        }
        distances
    }

    /// Renders `state` back onto the board the graph was built from.
    pub fn board_for(&self, state: &FloodState) -> Board {
        let mut board = self.board.clone();
        for (r, row) in self.labels.iter().enumerate() {
            for (c, &id) in row.iter().enumerate() {
                if state.absorbed.contains(id) {
                    board.set_tile(r, c, state.color);
                }
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn graph(rows: &[&str]) -> (Board, IslandGraph) {
        let board = board_from_str_array(rows).unwrap();
        let graph = IslandGraph::from_board(&board);
        (board, graph)
    }

    #[test]
    fn test_island_set() {
        let mut set = IslandSet::with_capacity(130);
        assert!(set.is_empty());
        assert!(set.insert(0));
        assert!(set.insert(129));
        assert!(!set.insert(129));
        assert!(set.contains(129));
        assert!(!set.contains(64));
        assert!(!set.contains(500));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 129]);
    }

    #[test]
    fn test_islands_and_adjacency() {
        let (_, g) = graph(&["RRG", "BRG", "BBR"]);
        // 0: R corner, 1: G column, 2: B, 3: R bottom-right.
        assert_eq!(g.len(), 4);
        assert_eq!(g.island(0), &Island { color: Tile::Red, size: 3 });
        assert_eq!(g.island(1), &Island { color: Tile::Green, size: 2 });
        assert_eq!(g.island(2), &Island { color: Tile::Blue, size: 3 });
        assert_eq!(g.island(3), &Island { color: Tile::Red, size: 1 });
        assert_eq!(g.neighbours(0), &[1, 2]);
        assert_eq!(g.neighbours(3), &[1, 2]);
    }

    #[test]
    fn test_paint_absorbs_matching_frontier_islands() {
        let (_, g) = graph(&["RGB", "GBB", "BBR"]);
        let start = g.initial_state();
        assert_eq!(g.frontier(&start), vec![1, 3]);

        let green = g.paint(&start, Tile::Green).unwrap();
        assert_eq!(green.color(), Tile::Green);
        assert_eq!(green.absorbed().len(), 3);
        assert!(g.paint(&start, Tile::Red).is_none());
        assert!(g.paint(&start, Tile::Blue).is_none());

        let blue = g.paint(&green, Tile::Blue).unwrap();
        assert!(!g.is_flooded(&blue));
        let red = g.paint(&blue, Tile::Red).unwrap();
        assert!(g.is_flooded(&red));
    }

    #[test]
    fn test_paint_matches_board_paint() {
        let board = Board::new_random_with_seed(6, 6, 4, 11).unwrap();
        let g = IslandGraph::from_board(&board);
        let mut expected = board.clone();
        let mut state = g.initial_state();
        for color in [Tile::Green, Tile::Blue, Tile::Red, Tile::Yellow, Tile::Green] {
            if let Some(next) = g.paint(&state, color) {
                expected.paint(color);
                state = next;
                assert_eq!(g.board_for(&state), expected);
            }
        }
    }

    #[test]
    fn test_distances() {
        let (_, g) = graph(&["RGBY"]);
        let d = g.distances(&g.initial_state());
        assert_eq!(d, vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_single_island_board_is_flooded() {
        let (board, g) = graph(&["RR", "RR"]);
        assert_eq!(g.len(), 1);
        assert!(g.is_flooded(&g.initial_state()));
        assert_eq!(g.board_for(&g.initial_state()), board);
    }
}
