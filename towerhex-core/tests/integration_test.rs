//! Integration tests for the TowerHex core
//!
//! Exercises the map and the feasibility search together on seeded random layouts.

use std::collections::{HashSet, VecDeque};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use towerhex_core::{
    search, Cell, GridMap, Hex, MapConfig, PlacementError, SearchConfig,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// 10 x 10 map with every cell walkable and buildable
fn open_map() -> GridMap {
    GridMap::from_config(&MapConfig::default().with_default_cell(Cell::open()))
}

/// Occupy roughly `density` of the cells at random
fn scatter_towers(map: &mut GridMap, rng: &mut ChaCha8Rng, density: f64) {
    let coords: Vec<Hex> = map.coords().collect();
    for hex in coords {
        if rng.gen_bool(density) {
            map.set_occupied(hex, true);
        }
    }
}

fn random_cell(map: &GridMap, rng: &mut ChaCha8Rng) -> Hex {
    let q = rng.gen_range(-map.x_range() + 1..map.x_range());
    let r = rng.gen_range(-map.y_range() + 1..map.y_range());
    Hex::new(q, r)
}

/// Breadth-first flood fill over walkable cells
fn flood_reachable(map: &GridMap, start: Hex, goal: Hex) -> bool {
    if start == goal {
        return false;
    }
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(hex) = queue.pop_front() {
        for n in hex.neighbors() {
            if map.is_traversable(n) && seen.insert(n) {
                if n == goal {
                    return true;
                }
                queue.push_back(n);
            }
        }
    }
    false
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_open_map_corridor() {
    let map = open_map();
    assert!(map.can_reach((0, 0), (3, 0)));
}

#[test]
fn test_vertical_band_blocks_corridor() {
    let mut map = open_map();
    for r in -9..=9 {
        assert!(map.set_occupied((2, r), true));
    }
    assert!(!map.can_reach((0, 0), (3, 0)));
}

#[test]
fn test_buildable_outside_range_is_false() {
    let mut map = open_map();
    assert!(!map.is_buildable((10, 0)));
    assert!(!map.is_buildable((0, -10)));
    assert!(!map.is_buildable((50, 50)));
    map.set_buildable((10, 0), true);
    assert!(!map.is_buildable((10, 0)));
}

#[test]
fn test_boundary_ring_is_off_map() {
    let map = open_map();
    for i in -10..=10 {
        assert!(!map.is_in_bounds((10, i)));
        assert!(!map.is_in_bounds((-10, i)));
        assert!(!map.is_in_bounds((i, 10)));
        assert!(!map.is_in_bounds((i, -10)));
    }
    assert!(!map.can_reach((9, 0), (10, 0)));
}

// ============================================================================
// RANDOMISED CROSS-CHECKS
// ============================================================================

#[test]
fn test_search_matches_flood_fill() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for round in 0..40 {
        let mut map = open_map();
        scatter_towers(&mut map, &mut rng, 0.35);

        for _ in 0..10 {
            let start = random_cell(&map, &mut rng);
            let goal = random_cell(&map, &mut rng);
            let expected = flood_reachable(&map, start, goal);

            let a_star = search(&map, start, goal, &SearchConfig::a_star());
            let greedy = search(&map, start, goal, &SearchConfig::greedy());
            assert_eq!(a_star.reachable, expected, "round {} {} -> {}", round, start, goal);
            assert_eq!(greedy.reachable, expected, "round {} {} -> {}", round, start, goal);
            assert!(a_star.expanded <= map.len() + 1);
        }
    }
}

#[test]
fn test_placement_never_disconnects() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut map = open_map();
    let start = Hex::new(-9, 0);
    let goal = Hex::new(9, 0);

    let mut placed = 0;
    let mut rejected = 0;
    for _ in 0..400 {
        let hex = random_cell(&map, &mut rng);
        match map.place_tower(hex, start, goal) {
            Ok(()) => placed += 1,
            Err(PlacementError::BlocksPath { .. }) => {
                rejected += 1;
                assert!(!map.is_occupied(hex));
            }
            Err(PlacementError::NotBuildable(h)) => assert!(map.is_occupied(h)),
            Err(e) => panic!("unexpected placement error: {}", e),
        }
        assert!(map.can_reach(start, goal));
    }

    assert!(placed > 0);
    assert!(rejected > 0);
    assert!(!map.is_occupied(start) && !map.is_occupied(goal));
}
