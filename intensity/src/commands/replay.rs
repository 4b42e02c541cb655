//! Replaying a script of updates against an empty map.

use crate::{CliError, OutputConfig};
use intensity_core::{IntensityMap, Op};
use std::io::{Read, Write};
use tracing::{Level, event};

/// Parse a JSON array of updates
pub fn read_script(reader: impl Read) -> Result<Vec<Op>, CliError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Apply `ops` in order to a fresh map, writing rendered states to `out`
///
/// With `every_step` set, one state is written after each update; otherwise
/// only the final state is written. An empty script writes the empty state.
pub fn replay<W: Write + ?Sized>(
    ops: impl IntoIterator<Item = Op>,
    settings: &OutputConfig,
    out: &mut W,
) -> anyhow::Result<IntensityMap> {
    let mut map = IntensityMap::default();
    let mut applied = 0usize;

    for op in ops {
        map.apply(op);
        applied += 1;
        event!(Level::DEBUG, %op, breakpoints = map.len(), "applied update");

        if settings.every_step {
            writeln!(out, "{}", settings.format.render(&map)?)?;
        }
    }

    if !settings.every_step || applied == 0 {
        writeln!(out, "{}", settings.format.render(&map)?)?;
    }

    event!(Level::INFO, applied, breakpoints = map.len(), "replay complete");
    Ok(map)
}
