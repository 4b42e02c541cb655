// Canonicalization passes. Trimming only applies to the front of the map,
// duplicate collapsing applies everywhere.

use std::collections::BTreeMap;

/// Removes the run of zero-valued breakpoints at the front of the map.
///
/// The scan stops permanently at the first nonzero value, so zeros that
/// follow a nonzero breakpoint are left in place.
pub(super) fn trim_leading_zeros(points: &mut BTreeMap<i64, i64>) {
    while let Some(entry) = points.first_entry() {
        if *entry.get() != 0 {
            break;
        }
        entry.remove();
    }
}

/// Removes every breakpoint whose value equals that of the retained breakpoint before it.
pub(super) fn collapse_duplicates(points: &mut BTreeMap<i64, i64>) {
    let mut last = None;
    points.retain(|_, value| {
        let keep = last != Some(*value);
        last = Some(*value);
        keep
    });
}
