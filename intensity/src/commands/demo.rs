//! The reference sequence of updates.

use super::replay::replay;
use crate::OutputConfig;
use intensity_core::{IntensityMap, Op};
use std::io::Write;

const fn add(from: i64, to: i64, amount: i64) -> Op {
    Op::Add { from, to, amount }
}

/// Each session starts from an empty map
pub const SESSIONS: &[&[Op]] = &[
    &[add(10, 30, 1), add(20, 40, 1), add(10, 40, -2)],
    &[
        add(10, 30, 1),
        add(20, 40, 1),
        add(10, 40, -1),
        add(10, 40, -1),
    ],
];

/// Write the empty state, then the states produced by each session
pub fn run<W: Write + ?Sized>(settings: &OutputConfig, out: &mut W) -> anyhow::Result<()> {
    for session in SESSIONS {
        writeln!(out, "{}", settings.format.render(&IntensityMap::default())?)?;
        replay(session.iter().copied(), settings, out)?;
    }
    Ok(())
}
