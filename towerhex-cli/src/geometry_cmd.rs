//! Line and range commands - print hex geometry for inspection

use anyhow::{bail, Result};
use clap::Args;

use towerhex_core::{hexes_in_intersection, hexes_in_range, Hex};

use crate::parse_hex;

#[derive(Args)]
pub struct LineArgs {
    /// First endpoint as Q,R
    #[arg(long, value_parser = parse_hex, allow_hyphen_values = true)]
    pub from: Hex,

    /// Second endpoint as Q,R
    #[arg(long, value_parser = parse_hex, allow_hyphen_values = true)]
    pub to: Hex,
}

#[derive(Args)]
pub struct RangeArgs {
    /// Disk centre as Q,R
    #[arg(long, value_parser = parse_hex, allow_hyphen_values = true)]
    pub center: Hex,

    /// Disk radius
    #[arg(long)]
    pub radius: u32,

    /// Centre of a second disk to intersect with
    #[arg(long, value_parser = parse_hex, allow_hyphen_values = true, requires = "other_radius")]
    pub other: Option<Hex>,

    /// Radius of the second disk
    #[arg(long)]
    pub other_radius: Option<u32>,
}

/// Print the hexes on the line between two cells
pub fn run_line(args: LineArgs) -> Result<()> {
    let line = args.from.line_to(args.to);
    tracing::debug!("Line {} -> {}: {} hexes", args.from, args.to, line.len());
    print_hexes(&line);
    Ok(())
}

/// Print a disk, or the overlap of two disks
pub fn run_range(args: RangeArgs) -> Result<()> {
    let hexes = select_hexes(&args)?;
    tracing::debug!("Range around {}: {} hexes", args.center, hexes.len());
    print_hexes(&hexes);
    Ok(())
}

fn select_hexes(args: &RangeArgs) -> Result<Vec<Hex>> {
    match (args.other, args.other_radius) {
        (None, None) => Ok(hexes_in_range(args.center, args.radius)),
        (Some(other), Some(other_radius)) => Ok(hexes_in_intersection(
            args.center,
            args.radius,
            other,
            other_radius,
        )),
        _ => bail!("--other and --other-radius must be given together"),
    }
}

fn print_hexes(hexes: &[Hex]) {
    for hex in hexes {
        println!("{}", hex);
    }
}
