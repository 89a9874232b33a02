//! Line-oriented map reader.
//!
//! # Format
//!
//! The first whitespace-separated token on a line is the city name; every
//! following token is a `direction=Target` pair:
//!
//! ```text
//! Foo north=Bar west=Baz south=Qu-ux
//! Bar south=Foo west=Bee
//! ```
//!
//! - Directions are the lowercase tokens `north`, `south`, `east`, `west`.
//!   Pairs with an unknown direction, a missing `=`, or an empty target are
//!   ignored; the rest of the line still counts.
//! - If a line names the same direction twice, the first pair wins.
//! - A line with no extractable name (blank or whitespace-only) is skipped
//!   with a warning, never an error.
//! - A target that never gets a line of its own still becomes a city; it
//!   simply has no links beyond the ones pointing at it.
//!
//! Every accepted pair installs the edge symmetrically, so the example above
//! also gives `Bar` a `south=Foo` link before its own line is even read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use xeno_core::Direction;
use xeno_world::WorldMap;

use crate::{StreamError, StreamResult};

// ── Line parsing ──────────────────────────────────────────────────────────────

/// One parsed map line, borrowing from the input.
pub(crate) struct CityLine<'a> {
    pub name:  &'a str,
    pub links: Vec<(Direction, &'a str)>,
}

/// Parse a single map line.  Returns `None` when no name can be extracted.
pub(crate) fn parse_city_line(line: &str) -> Option<CityLine<'_>> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;

    let mut links: Vec<(Direction, &str)> = Vec::new();
    for token in tokens {
        let Some((dir, target)) = token.split_once('=') else {
            continue;
        };
        let Ok(dir) = dir.parse::<Direction>() else {
            continue;
        };
        if target.is_empty() || links.iter().any(|&(d, _)| d == dir) {
            continue;
        }
        links.push((dir, target));
    }

    Some(CityLine { name, links })
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Build a [`WorldMap`] from any line source.
///
/// Useful for testing (pass a `std::io::Cursor`) as well as file input.
pub fn read_map<R: BufRead>(reader: R) -> StreamResult<WorldMap> {
    let mut world = WorldMap::new();

    for line in reader.lines() {
        let line = line.map_err(StreamError::Read)?;
        let Some(parsed) = parse_city_line(&line) else {
            warn!("Invalid city input line: {line:?}");
            continue;
        };

        // The named city exists even if it declares no links.
        world.get_or_insert(parsed.name);
        for (dir, target) in parsed.links {
            world.link(parsed.name, dir, target);
        }
    }

    info!("Map initialized with {} cities", world.len());
    Ok(world)
}

/// Build a [`WorldMap`] from the map file at `path`.
pub fn load_map(path: &Path) -> StreamResult<WorldMap> {
    let file = File::open(path).map_err(StreamError::Read)?;
    read_map(BufReader::new(file))
}
