mod merge;

use crate::Op;
use std::{collections::BTreeMap, fmt};
use tracing::{Level, event};

/// A piecewise-constant, integer-valued function over the integer line
///
/// The function is stored as a sorted set of breakpoints: the value stored at
/// a key holds from that key up to (but excluding) the next key, the last
/// value extends to positive infinity, and everything before the first key
/// is 0. A map is always kept in canonical form:
/// - no two consecutive breakpoints carry the same value
/// - the first breakpoint (if any) carries a nonzero value
///
/// Consequently, an empty map is the constant-zero function, and two maps are
/// equal if and only if they describe the same function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "IntensityMapDto", into = "IntensityMapDto")
)]
pub struct IntensityMap(BTreeMap<i64, i64>);

impl IntensityMap {
    /// Creates a map from its ascending breakpoints, validating canonical form
    pub fn new(breakpoints: Vec<(i64, i64)>) -> Result<Self, IntensityMapError> {
        Self::try_from(IntensityMapDto(breakpoints))
    }

    /// Adds `amount` to every point in `[from, to)`
    ///
    /// An empty or reversed range (`from >= to`) leaves the map untouched.
    /// Values wrap on overflow.
    pub fn add(&mut self, from: i64, to: i64, amount: i64) {
        self.update(from, to, |value| value.wrapping_add(amount));
    }

    /// Sets every point in `[from, to)` to `amount`
    ///
    /// An empty or reversed range (`from >= to`) leaves the map untouched.
    pub fn set(&mut self, from: i64, to: i64, amount: i64) {
        self.update(from, to, |_| amount);
    }

    /// Applies a single recorded update
    pub fn apply(&mut self, op: Op) {
        match op {
            Op::Add { from, to, amount } => self.add(from, to, amount),
            Op::Set { from, to, amount } => self.set(from, to, amount),
        }
    }

    /// The value of the function at `point`
    pub fn value_at(&self, point: i64) -> i64 {
        self.0
            .range(..=point)
            .next_back()
            .map_or(0, |(_, &value)| value)
    }

    /// Snapshot of the breakpoints as ascending `(key, value)` pairs
    pub fn dump(&self) -> Vec<(i64, i64)> {
        self.breakpoints().collect()
    }

    /// Iterate over the breakpoints in ascending key order
    pub fn breakpoints(&self) -> impl ExactSizeIterator<Item = (i64, i64)> + '_ {
        self.0.iter().map(|(&key, &value)| (key, value))
    }

    /// The number of breakpoints
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the function is zero everywhere
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn update(&mut self, from: i64, to: i64, rule: impl Fn(i64) -> i64) {
        if from >= to {
            event!(Level::TRACE, from, to, "ignoring empty range");
            return;
        }

        // Both edges must exist before the scan so that `from` is included
        // and `to` keeps the value it had before this call.
        self.materialize(from);
        self.materialize(to);

        for (_, value) in self.0.range_mut(from..to) {
            *value = rule(*value);
        }
        event!(Level::TRACE, from, to, "applied range update");

        self.canonicalize();
    }

    /// Ensures `point` is a breakpoint, inheriting the value already in effect there
    fn materialize(&mut self, point: i64) {
        let value = self.value_at(point);
        self.0.entry(point).or_insert(value);
    }

    fn canonicalize(&mut self) {
        let before = self.0.len();
        merge::trim_leading_zeros(&mut self.0);
        merge::collapse_duplicates(&mut self.0);

        let removed = before - self.0.len();
        if removed > 0 {
            event!(
                Level::DEBUG,
                removed,
                remaining = self.0.len(),
                "collapsed redundant breakpoints"
            );
        }
    }
}

impl fmt::Display for IntensityMap {
    /// Renders the breakpoints as `[[k1,v1],[k2,v2],...]`, or `[]` when empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (key, value)) in self.breakpoints().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "[{key},{value}]")?;
        }
        f.write_str("]")
    }
}

impl Extend<Op> for IntensityMap {
    fn extend<I: IntoIterator<Item = Op>>(&mut self, iter: I) {
        for op in iter {
            self.apply(op);
        }
    }
}

impl FromIterator<Op> for IntensityMap {
    /// Replays the updates, in order, starting from the zero function
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug)]
pub struct IntensityMapDto(pub Vec<(i64, i64)>);

impl From<IntensityMap> for IntensityMapDto {
    fn from(value: IntensityMap) -> Self {
        Self(value.0.into_iter().collect())
    }
}

impl TryFrom<IntensityMapDto> for IntensityMap {
    type Error = IntensityMapError;

    /// Attempts to create a map from a DTO, validating canonical form
    ///
    /// # Validation
    ///
    /// This function validates that:
    /// 1. Keys are strictly ascending
    /// 2. No two consecutive breakpoints share a value
    /// 3. The first breakpoint has a nonzero value
    ///
    /// # Errors
    ///
    /// Returns `IntensityMapError` naming the first offending key.
    fn try_from(value: IntensityMapDto) -> Result<Self, Self::Error> {
        let mut prev: Option<(i64, i64)> = None;

        for &(key, val) in value.0.iter() {
            match prev {
                None if val == 0 => return Err(IntensityMapError::LeadingZero(key)),
                Some((prev_key, _)) if key <= prev_key => {
                    return Err(IntensityMapError::Unordered(key));
                }
                Some((_, prev_val)) if val == prev_val => {
                    return Err(IntensityMapError::Redundant(key));
                }
                _ => {}
            }
            prev = Some((key, val));
        }

        Ok(Self(value.0.into_iter().collect()))
    }
}

/// Errors that can occur when building an IntensityMap from raw breakpoints
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum IntensityMapError {
    /// Error when a key does not strictly exceed the key before it
    #[error("Breakpoint {0} is not strictly greater than its predecessor")]
    Unordered(i64),
    /// Error when a breakpoint repeats the value of the one before it
    #[error("Breakpoint {0} repeats the value of its predecessor")]
    Redundant(i64),
    /// Error when the first breakpoint carries the value 0
    #[error("Leading breakpoint {0} has value 0")]
    LeadingZero(i64),
}
