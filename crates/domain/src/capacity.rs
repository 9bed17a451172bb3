// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity arithmetic for a single ledger dimension.
//!
//! A dimension is one independently tracked counter (event total, one
//! housing type, or one room type). All mutations clamp: a decrement
//! floors at zero and an increment ceils at the configured capacity, so
//! out-of-order or duplicated lifecycle events can drift a counter but
//! never push it outside `0..=capacity`.

use serde::{Deserialize, Serialize};

/// A configured capacity ceiling.
///
/// A missing ceiling means "no limit", which is distinct from a ceiling
/// of zero. Modeled as a sum type so the two can never be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capacity {
    /// No configured limit; checks always pass and nothing is tracked.
    Unlimited,
    /// A hard ceiling.
    Bounded(u32),
}

impl Capacity {
    /// Builds a `Capacity` from a nullable database column.
    #[must_use]
    pub const fn from_column(value: Option<u32>) -> Self {
        match value {
            Some(n) => Self::Bounded(n),
            None => Self::Unlimited,
        }
    }

    /// Converts back to the nullable column representation.
    #[must_use]
    pub const fn to_column(self) -> Option<u32> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::Unlimited => None,
        }
    }

    /// Whether this dimension has a configured ceiling.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        matches!(self, Self::Bounded(_))
    }
}

/// The outcome of a capacity check for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityCheck {
    /// The party fits.
    Ok,
    /// The dimension is fully consumed.
    NoSpots,
    /// Some spots remain, but fewer than the party size.
    InsufficientSpots {
        /// Spots still available in this dimension.
        remaining: u32,
    },
}

impl CapacityCheck {
    /// Whether the check passed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// One ledger counter alongside its configured ceiling.
///
/// For an `Unlimited` capacity the `remaining` value carries no meaning
/// and is kept at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityDimension {
    /// The configured ceiling.
    pub capacity: Capacity,
    /// Spots still available. Meaningful only when bounded.
    pub remaining: u32,
}

impl CapacityDimension {
    /// An untracked (unlimited) dimension.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            capacity: Capacity::Unlimited,
            remaining: 0,
        }
    }

    /// A bounded dimension with an explicit remaining count.
    #[must_use]
    pub const fn bounded(capacity: u32, remaining: u32) -> Self {
        Self {
            capacity: Capacity::Bounded(capacity),
            remaining,
        }
    }

    /// Checks whether a party of `party_size` fits in this dimension.
    #[must_use]
    pub const fn check(&self, party_size: u32) -> CapacityCheck {
        match self.capacity {
            Capacity::Unlimited => CapacityCheck::Ok,
            Capacity::Bounded(_) => {
                if self.remaining == 0 {
                    CapacityCheck::NoSpots
                } else if self.remaining < party_size {
                    CapacityCheck::InsufficientSpots {
                        remaining: self.remaining,
                    }
                } else {
                    CapacityCheck::Ok
                }
            }
        }
    }

    /// Returns this dimension after consuming `count` spots, floored at
    /// zero.
    #[must_use]
    pub const fn decremented(&self, count: u32) -> Self {
        match self.capacity {
            Capacity::Unlimited => *self,
            Capacity::Bounded(_) => Self {
                capacity: self.capacity,
                remaining: self.remaining.saturating_sub(count),
            },
        }
    }

    /// Returns this dimension after releasing `count` spots, ceiled at
    /// the configured capacity.
    #[must_use]
    pub const fn incremented(&self, count: u32) -> Self {
        match self.capacity {
            Capacity::Unlimited => *self,
            Capacity::Bounded(cap) => {
                let raised: u32 = self.remaining.saturating_add(count);
                Self {
                    capacity: self.capacity,
                    remaining: if raised > cap { cap } else { raised },
                }
            }
        }
    }

    /// Returns this dimension recomputed from a ground-truth actual
    /// count: `remaining = max(0, capacity - actual)`.
    #[must_use]
    pub const fn reconciled(&self, actual: u32) -> Self {
        match self.capacity {
            Capacity::Unlimited => Self::unlimited(),
            Capacity::Bounded(cap) => Self {
                capacity: self.capacity,
                remaining: cap.saturating_sub(actual),
            },
        }
    }
}
