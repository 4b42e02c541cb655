use std::fmt;

/// A single recorded range update
///
/// Sequences of ops can be replayed against an [`IntensityMap`](crate::IntensityMap)
/// via [`IntensityMap::apply`](crate::IntensityMap::apply), `Extend` or `FromIterator`.
/// When serialized, the variant is given by an `op` tag:
///
/// ```json
/// {"op": "add", "from": 10, "to": 30, "amount": 1}
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "op", rename_all = "snake_case")
)]
pub enum Op {
    /// Add `amount` to every point in `[from, to)`
    Add {
        /// The first point updated
        from: i64,
        /// The first point past the update
        to: i64,
        /// The delta to apply
        amount: i64,
    },
    /// Set every point in `[from, to)` to `amount`
    Set {
        /// The first point updated
        from: i64,
        /// The first point past the update
        to: i64,
        /// The new value
        amount: i64,
    },
}

impl Op {
    /// The half-open range `(from, to)` this op covers
    pub fn range(&self) -> (i64, i64) {
        match *self {
            Op::Add { from, to, .. } | Op::Set { from, to, .. } => (from, to),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Add { from, to, amount } => write!(f, "add({from}, {to}, {amount})"),
            Op::Set { from, to, amount } => write!(f, "set({from}, {to}, {amount})"),
        }
    }
}
