//! Reach command - check whether a path survives a set of towers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_map(), place_random_towers(), report_results()
//! - Level 3: single placement attempts
//! - Level 4: rng and formatting utilities

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use towerhex_core::{search, Cell, GridMap, Hex, MapConfig, SearchConfig, SearchReport};

use crate::parse_hex;

/// Give up on random placement after this many attempts per tower
const ATTEMPTS_PER_TOWER: usize = 10;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReachArgs {
    /// Start cell as Q,R
    #[arg(long, value_parser = parse_hex, allow_hyphen_values = true)]
    pub from: Hex,

    /// Goal cell as Q,R
    #[arg(long, value_parser = parse_hex, allow_hyphen_values = true)]
    pub to: Hex,

    /// Tower cell as Q,R (repeatable). Placed unconditionally.
    #[arg(long = "tower", value_parser = parse_hex, allow_hyphen_values = true)]
    pub towers: Vec<Hex>,

    /// Extra towers scattered at random, skipping any that would cut the path
    #[arg(long, default_value = "0")]
    pub random_towers: usize,

    /// Order the frontier by distance to goal only (no per-hop cost)
    #[arg(long)]
    pub greedy: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// What happened on the map before the search ran
#[derive(Clone, Debug, Default)]
struct Placements {
    explicit: Vec<Hex>,
    random: Vec<Hex>,
    ignored: Vec<Hex>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run reach command
///
/// 1. Build an open map with the configured dimensions
/// 2. Place the requested towers
/// 3. Run the feasibility search
/// 4. Report
pub fn run(args: ReachArgs, config: &MapConfig, seed: Option<u64>) -> Result<()> {
    let mut map = build_map(config);

    tracing::info!(
        "Checking {} -> {} on a {}x{} map",
        args.from,
        args.to,
        config.x_range,
        config.y_range
    );

    let mut placements = place_explicit_towers(&mut map, &args.towers);
    if args.random_towers > 0 {
        let mut rng = create_rng(seed);
        placements.random =
            place_random_towers(&mut map, args.from, args.to, args.random_towers, &mut rng);
    }

    let search_config = if args.greedy {
        SearchConfig::greedy()
    } else {
        SearchConfig::a_star()
    };
    let report = search(&map, args.from, args.to, &search_config);

    report_results(&args, &placements, &report);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Every cell starts as open ground; the config supplies the dimensions
fn build_map(config: &MapConfig) -> GridMap {
    GridMap::filled(config.x_range, config.y_range, Cell::open())
}

fn place_explicit_towers(map: &mut GridMap, towers: &[Hex]) -> Placements {
    let mut placements = Placements::default();
    for &hex in towers {
        if map.set_occupied(hex, true) {
            placements.explicit.push(hex);
        } else {
            tracing::warn!("Tower {} is outside the map, ignoring", hex);
            placements.ignored.push(hex);
        }
    }
    placements
}

/// Scatter up to `count` towers without disconnecting `start` from `goal`
fn place_random_towers(
    map: &mut GridMap,
    start: Hex,
    goal: Hex,
    count: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Hex> {
    let mut placed = Vec::with_capacity(count);
    if map.is_empty() {
        tracing::warn!("Map has no cells, skipping random towers");
        return placed;
    }

    for _ in 0..count * ATTEMPTS_PER_TOWER {
        if placed.len() == count {
            break;
        }
        let hex = random_cell(map, rng);
        match map.place_tower(hex, start, goal) {
            Ok(()) => placed.push(hex),
            Err(e) => tracing::debug!("Skipped random tower: {}", e),
        }
    }

    if placed.len() < count {
        tracing::warn!("Only placed {} of {} random towers", placed.len(), count);
    }
    placed
}

fn report_results(args: &ReachArgs, placements: &Placements, report: &SearchReport) {
    if args.json {
        print_json_results(args, placements, report);
    } else {
        print_text_results(args, placements, report);
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn random_cell(map: &GridMap, rng: &mut ChaCha8Rng) -> Hex {
    let q = rng.gen_range(-map.x_range() + 1..map.x_range());
    let r = rng.gen_range(-map.y_range() + 1..map.y_range());
    Hex::new(q, r)
}

/// Create RNG from optional seed
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Print results as JSON
fn print_json_results(args: &ReachArgs, placements: &Placements, report: &SearchReport) {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        from: Hex,
        to: Hex,
        reachable: bool,
        expanded: usize,
        greedy: bool,
        towers: Vec<Hex>,
        random_towers: Vec<Hex>,
        ignored_towers: Vec<Hex>,
    }

    let output = JsonOutput {
        from: args.from,
        to: args.to,
        reachable: report.reachable,
        expanded: report.expanded,
        greedy: args.greedy,
        towers: placements.explicit.clone(),
        random_towers: placements.random.clone(),
        ignored_towers: placements.ignored.clone(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(args: &ReachArgs, placements: &Placements, report: &SearchReport) {
    println!("\n=== Reach ===");
    println!("From:          {}", args.from);
    println!("To:            {}", args.to);
    println!("Towers:        {}", placements.explicit.len());
    println!("Random towers: {}", placements.random.len());
    if !placements.ignored.is_empty() {
        println!("Ignored:       {}", placements.ignored.len());
    }
    println!("Expanded:      {}", report.expanded);
    println!(
        "Reachable:     {}",
        if report.reachable { "yes" } else { "no" }
    );
}
