//! Strongly typed zone identifiers and origin/destination pairs.
//!
//! `ZoneId` is `Copy + Ord + Hash` so it can key both hash maps and the
//! ordered maps used wherever iteration order must be deterministic.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;
            fn from_str(s: &str) -> Result<$name, Self::Err> {
                s.trim().parse::<$inner>().map($name)
            }
        }
    };
}

typed_id! {
    /// A traffic analysis zone, as numbered in the demand matrix.
    pub struct ZoneId(u32);
}

// ── ODPair ────────────────────────────────────────────────────────────────────

/// An (origin, destination) zone pair.  Immutable, value-equal, hashable.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ODPair {
    pub origin:      ZoneId,
    pub destination: ZoneId,
}

impl ODPair {
    #[inline]
    pub fn new(origin: ZoneId, destination: ZoneId) -> Self {
        Self { origin, destination }
    }

    /// `true` for intra-zonal pairs.
    #[inline]
    pub fn is_intrazonal(&self) -> bool {
        self.origin == self.destination
    }
}

impl fmt::Display for ODPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}

impl From<(ZoneId, ZoneId)> for ODPair {
    fn from((origin, destination): (ZoneId, ZoneId)) -> Self {
        Self { origin, destination }
    }
}
