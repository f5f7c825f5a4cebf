//! Axial hex coordinates.
//!
//! Coordinates use the axial `(q, r)` system. The implicit third cube axis
//! is `s = -q - r`, which makes distance a simple half-sum of deltas.

use serde::{Deserialize, Serialize};

/// Axial offsets of the six neighbouring hexes.
const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// A hex on the battle map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoordinate {
    pub q: i32,
    pub r: i32,
}

impl HexCoordinate {
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Number of hex steps between two coordinates, ignoring terrain.
    ///
    /// ```
    /// use hex_tactics::core::HexCoordinate;
    ///
    /// let origin = HexCoordinate::new(0, 0);
    /// assert_eq!(origin.distance_to(HexCoordinate::new(2, -1)), 2);
    /// assert_eq!(origin.distance_to(origin), 0);
    /// ```
    #[must_use]
    pub fn distance_to(self, other: HexCoordinate) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        let ds = -(dq + dr);
        ((dq.abs() + dr.abs() + ds.abs()) / 2) as u32
    }

    /// The six adjacent coordinates, in a fixed order.
    #[must_use]
    pub fn neighbors(self) -> [HexCoordinate; 6] {
        NEIGHBOR_OFFSETS.map(|(dq, dr)| HexCoordinate::new(self.q + dq, self.r + dr))
    }
}

impl std::fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
