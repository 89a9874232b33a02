//! Line-oriented map writer.
//!
//! Serializes each surviving city as `Name dir=Target ...`, links in
//! canonical north/south/east/west order, one trailing newline per line.
//! The order of cities across lines follows table iteration and is
//! unspecified.  An empty world produces valid, empty output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use xeno_world::WorldMap;

use crate::{StreamError, StreamResult};

/// Write the current map layout to any byte sink.
pub fn write_map<W: Write>(world: &WorldMap, mut writer: W) -> StreamResult<()> {
    if world.is_empty() {
        info!("All cities were destroyed by mad aliens");
    }

    for city in world.cities() {
        write!(writer, "{}", city.name()).map_err(StreamError::Write)?;
        for (dir, neighbor) in city.neighbor_links() {
            write!(writer, " {dir}={}", neighbor.name()).map_err(StreamError::Write)?;
        }
        writeln!(writer).map_err(StreamError::Write)?;
    }

    writer.flush().map_err(StreamError::Write)
}

/// Write the current map layout to a file at `path`, creating or truncating
/// it.
pub fn save_map(world: &WorldMap, path: &Path) -> StreamResult<()> {
    let file = File::create(path).map_err(StreamError::Write)?;
    write_map(world, BufWriter::new(file))
}
