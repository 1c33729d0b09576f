//! Path feasibility search
//!
//! Answers "can a walker still get from A to B?" without building the path.
//! Best-first over walkable neighbours, ordered by `g + f` where `f` is the hex
//! distance to the goal. The closed set only grows and the map is finite, so
//! every search terminates.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;

use crate::board::Hex;
use crate::config::SearchConfig;
use crate::map::GridMap;

/// Frontier entry, created per search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SearchNode {
    hex: Hex,
    /// Cost to get here
    g_cost: u32,
    /// Estimated cost from here to the goal
    f_cost: u32,
}

impl SearchNode {
    fn h(&self) -> u32 {
        self.g_cost.saturating_add(self.f_cost)
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; ties go to the node nearer the goal
        other
            .h()
            .cmp(&self.h())
            .then_with(|| other.f_cost.cmp(&self.f_cost))
            .then_with(|| other.hex.cmp(&self.hex))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of a feasibility search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub reachable: bool,
    /// Number of distinct hexes popped from the frontier
    pub expanded: usize,
}

/// Whether `goal` can be reached from `start`, using the default config
pub fn can_reach(map: &GridMap, start: impl Into<Hex>, goal: impl Into<Hex>) -> bool {
    search(map, start, goal, &SearchConfig::default()).reachable
}

/// Run the feasibility search.
///
/// A zero-length move (`start == goal`) is never feasible. `start` itself does
/// not need to be walkable; every other hex on the route, `goal` included,
/// must be on the map, traversable and unoccupied.
pub fn search(
    map: &GridMap,
    start: impl Into<Hex>,
    goal: impl Into<Hex>,
    config: &SearchConfig,
) -> SearchReport {
    let (start, goal): (Hex, Hex) = (start.into(), goal.into());

    if start == goal {
        tracing::debug!("Search {} -> {}: zero-length move rejected", start, goal);
        return SearchReport { reachable: false, expanded: 0 };
    }

    let mut open = BinaryHeap::new();
    let mut closed: FxHashSet<Hex> = FxHashSet::default();
    let mut reachable = false;

    open.push(SearchNode {
        hex: start,
        g_cost: 0,
        f_cost: heuristic(start, goal),
    });

    while let Some(current) = open.pop() {
        if !closed.insert(current.hex) {
            continue;
        }
        if current.hex == goal {
            reachable = true;
            break;
        }

        for neighbor in map.walkable_neighbors_of(current.hex) {
            if closed.contains(&neighbor) {
                continue;
            }
            open.push(SearchNode {
                hex: neighbor,
                g_cost: current.g_cost.saturating_add(config.step_cost),
                f_cost: heuristic(neighbor, goal),
            });
        }
    }

    let report = SearchReport {
        reachable,
        expanded: closed.len(),
    };
    tracing::debug!(
        "Search {} -> {}: reachable={} expanded={} step_cost={}",
        start,
        goal,
        report.reachable,
        report.expanded,
        config.step_cost
    );
    report
}

fn heuristic(from: Hex, goal: Hex) -> u32 {
    from.distance_to(goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Cell;

    fn open_map() -> GridMap {
        GridMap::filled(10, 10, Cell::open())
    }

    #[test]
    fn test_node_ordering_is_min_heap() {
        let mut heap = BinaryHeap::new();
        heap.push(SearchNode { hex: Hex::new(0, 0), g_cost: 3, f_cost: 4 });
        heap.push(SearchNode { hex: Hex::new(1, 0), g_cost: 1, f_cost: 2 });
        heap.push(SearchNode { hex: Hex::new(2, 0), g_cost: 2, f_cost: 1 });
        // h = 3 for both of the last two; lower f wins
        assert_eq!(heap.pop().unwrap().hex, Hex::new(2, 0));
        assert_eq!(heap.pop().unwrap().hex, Hex::new(1, 0));
        assert_eq!(heap.pop().unwrap().hex, Hex::new(0, 0));
    }

    #[test]
    fn test_open_map_reachable() {
        let map = open_map();
        assert!(can_reach(&map, (0, 0), (3, 0)));
        assert!(map.can_reach((-9, 9), (9, -9)));
    }

    #[test]
    fn test_self_move_infeasible() {
        let map = open_map();
        assert!(!can_reach(&map, (0, 0), (0, 0)));
        assert!(!can_reach(&map, (4, -2), (4, -2)));
        let report = search(&map, (1, 1), (1, 1), &SearchConfig::greedy());
        assert_eq!(report, SearchReport { reachable: false, expanded: 0 });
    }

    #[test]
    fn test_wall_blocks_path() {
        let mut map = open_map();
        for r in -9..=9 {
            map.set_occupied((2, r), true);
        }
        assert!(!can_reach(&map, (0, 0), (3, 0)));
        assert!(!search(&map, (0, 0), (3, 0), &SearchConfig::greedy()).reachable);
        // the near side is still connected
        assert!(can_reach(&map, (0, 0), (1, 5)));
    }

    #[test]
    fn test_non_traversable_wall_blocks_path() {
        let mut map = open_map();
        for r in -9..=9 {
            map.set_traversable((2, r), false);
        }
        assert!(!can_reach(&map, (0, 0), (3, 0)));

        map.set_traversable((2, 7), true);
        assert!(can_reach(&map, (0, 0), (3, 0)));
    }

    #[test]
    fn test_default_map_is_not_walkable() {
        let map = GridMap::new(10, 10);
        assert!(!can_reach(&map, (0, 0), (1, 0)));
    }

    #[test]
    fn test_goal_outside_map_unreachable() {
        let map = open_map();
        assert!(!can_reach(&map, (0, 0), (10, 0)));
        assert!(!can_reach(&map, (0, 0), (30, -4)));
    }

    #[test]
    fn test_goal_occupied_unreachable() {
        let mut map = open_map();
        map.set_occupied((3, 0), true);
        assert!(!can_reach(&map, (0, 0), (3, 0)));
    }

    #[test]
    fn test_start_need_not_be_walkable() {
        let mut map = open_map();
        map.set_occupied((0, 0), true);
        assert!(can_reach(&map, (0, 0), (3, 0)));
    }

    #[test]
    fn test_enclosed_goal() {
        let mut map = open_map();
        let goal = Hex::new(4, -1);
        for n in goal.neighbors() {
            map.set_occupied(n, true);
        }
        let report = search(&map, (0, 0), goal, &SearchConfig::default());
        assert!(!report.reachable);
        // exhausted the reachable region: every free cell outside the ring
        assert_eq!(report.expanded, map.len() - 7);
    }

    #[test]
    fn test_step_cost_does_not_change_reachability() {
        let mut map = open_map();
        for r in -9..=5 {
            map.set_occupied((2, r), true);
        }
        for step_cost in [0, 1, 5] {
            let config = SearchConfig::default().with_step_cost(step_cost);
            assert!(search(&map, (0, 0), (3, 0), &config).reachable);
        }
    }

    #[test]
    fn test_greedy_expands_straight_line_only() {
        let map = open_map();
        let greedy = search(&map, (0, 0), (5, 0), &SearchConfig::greedy());
        let a_star = search(&map, (0, 0), (5, 0), &SearchConfig::a_star());
        assert!(greedy.reachable && a_star.reachable);
        assert_eq!(greedy.expanded, 6);
        assert_eq!(a_star.expanded, 6);
    }
}
