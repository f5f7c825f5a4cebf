//! Mission map: terrain plus squaddie placement on an axial hex grid.
//!
//! The map covers `q` in `0..width` and `r` in `0..height`. Each squaddie
//! occupies one tile and each tile holds at most one squaddie.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{BattleSquaddieId, HexCoordinate};

/// Placement and parsing failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("{0} is off the map")]
    OffMap(HexCoordinate),

    #[error("{0} is not passable")]
    Impassable(HexCoordinate),

    #[error("{coordinate} is already occupied by {occupant}")]
    Occupied {
        coordinate: HexCoordinate,
        occupant: BattleSquaddieId,
    },

    #[error("{0} is already on the map")]
    AlreadyPlaced(BattleSquaddieId),

    #[error("{0} is not on the map")]
    NotOnMap(BattleSquaddieId),

    #[error("no path from {from} to {to}")]
    Unreachable { from: HexCoordinate, to: HexCoordinate },

    #[error("unknown terrain symbol {symbol:?} at row {row}")]
    UnknownTerrain { symbol: char, row: usize },

    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("a map needs at least one tile")]
    Empty,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Open,
    Wall,
}

impl Terrain {
    #[must_use]
    pub fn is_passable(self) -> bool {
        matches!(self, Terrain::Open)
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Terrain::Open),
            'x' => Some(Terrain::Wall),
            _ => None,
        }
    }
}

/// The battlefield.
///
/// ## Example
///
/// ```
/// use hex_tactics::core::{BattleSquaddieId, HexCoordinate};
/// use hex_tactics::map::MissionMap;
///
/// let mut map = MissionMap::from_rows(&[
///     ". . x",
///     ". . .",
/// ]).unwrap();
///
/// map.add_squaddie(BattleSquaddieId::new(1), HexCoordinate::new(0, 0)).unwrap();
/// assert_eq!(map.get_squaddie_at(HexCoordinate::new(0, 0)), Some(BattleSquaddieId::new(1)));
/// assert!(!map.is_passable(HexCoordinate::new(2, 0)));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MissionMap {
    width: u32,
    height: u32,

    /// Row-major: index `r * width + q`.
    terrain: Vec<Terrain>,

    positions: FxHashMap<BattleSquaddieId, HexCoordinate>,
    occupants: FxHashMap<HexCoordinate, BattleSquaddieId>,
}

impl MissionMap {
    /// Create an open map.
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "A map needs at least one tile");
        Self {
            width,
            height,
            terrain: vec![Terrain::Open; (width * height) as usize],
            positions: FxHashMap::default(),
            occupants: FxHashMap::default(),
        }
    }

    /// Parse a map from rows of terrain symbols.
    ///
    /// Each row is one `r`; whitespace is ignored. `.` is open ground and
    /// `x` is a wall.
    pub fn from_rows(rows: &[&str]) -> Result<Self, MapError> {
        let mut terrain = Vec::new();
        let mut width = None;

        for (row, line) in rows.iter().enumerate() {
            let mut found = 0;
            for symbol in line.chars().filter(|c| !c.is_whitespace()) {
                let tile =
                    Terrain::from_symbol(symbol).ok_or(MapError::UnknownTerrain { symbol, row })?;
                terrain.push(tile);
                found += 1;
            }

            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(MapError::RaggedRow { row, found, expected });
            }
        }

        let width = width.unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            terrain,
            positions: FxHashMap::default(),
            occupants: FxHashMap::default(),
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn is_on_map(&self, coordinate: HexCoordinate) -> bool {
        coordinate.q >= 0
            && coordinate.r >= 0
            && (coordinate.q as u32) < self.width
            && (coordinate.r as u32) < self.height
    }

    /// Terrain at `coordinate`, or `None` off the map.
    #[must_use]
    pub fn terrain_at(&self, coordinate: HexCoordinate) -> Option<Terrain> {
        if !self.is_on_map(coordinate) {
            return None;
        }
        let index = coordinate.r as usize * self.width as usize + coordinate.q as usize;
        self.terrain.get(index).copied()
    }

    /// Set the terrain of one tile.
    pub fn set_terrain(
        &mut self,
        coordinate: HexCoordinate,
        terrain: Terrain,
    ) -> Result<(), MapError> {
        if !self.is_on_map(coordinate) {
            return Err(MapError::OffMap(coordinate));
        }
        let index = coordinate.r as usize * self.width as usize + coordinate.q as usize;
        self.terrain[index] = terrain;
        Ok(())
    }

    #[must_use]
    pub fn is_passable(&self, coordinate: HexCoordinate) -> bool {
        self.terrain_at(coordinate).is_some_and(Terrain::is_passable)
    }

    /// Place a squaddie that is not yet on the map.
    pub fn add_squaddie(
        &mut self,
        id: BattleSquaddieId,
        coordinate: HexCoordinate,
    ) -> Result<(), MapError> {
        if self.positions.contains_key(&id) {
            return Err(MapError::AlreadyPlaced(id));
        }
        self.check_can_stand(id, coordinate)?;

        self.positions.insert(id, coordinate);
        self.occupants.insert(coordinate, id);
        Ok(())
    }

    /// Move a placed squaddie to a new tile.
    pub fn update_battle_squaddie_coordinate(
        &mut self,
        id: BattleSquaddieId,
        coordinate: HexCoordinate,
    ) -> Result<(), MapError> {
        let current = self.positions.get(&id).copied().ok_or(MapError::NotOnMap(id))?;
        if current == coordinate {
            return Ok(());
        }
        self.check_can_stand(id, coordinate)?;

        self.occupants.remove(&current);
        self.occupants.insert(coordinate, id);
        self.positions.insert(id, coordinate);
        Ok(())
    }

    /// Take a squaddie off the map, returning where it stood.
    pub fn remove_squaddie(&mut self, id: BattleSquaddieId) -> Option<HexCoordinate> {
        let coordinate = self.positions.remove(&id)?;
        self.occupants.remove(&coordinate);
        Some(coordinate)
    }

    #[must_use]
    pub fn get_by_battle_squaddie_id(&self, id: BattleSquaddieId) -> Option<HexCoordinate> {
        self.positions.get(&id).copied()
    }

    #[must_use]
    pub fn get_squaddie_at(&self, coordinate: HexCoordinate) -> Option<BattleSquaddieId> {
        self.occupants.get(&coordinate).copied()
    }

    /// Iterate every on-map coordinate, row by row.
    pub fn coordinates(&self) -> impl Iterator<Item = HexCoordinate> + '_ {
        (0..self.height as i32)
            .flat_map(move |r| (0..self.width as i32).map(move |q| HexCoordinate::new(q, r)))
    }

    /// Every tile reachable from `start` in at most `max_steps` steps, with
    /// the length of the shortest path to it.
    ///
    /// Walls and occupied tiles block movement. `start` itself is included
    /// with length 0.
    #[must_use]
    pub fn reachable_coordinates(
        &self,
        start: HexCoordinate,
        max_steps: u32,
    ) -> FxHashMap<HexCoordinate, u32> {
        let mut reached = FxHashMap::default();
        if !self.is_on_map(start) {
            return reached;
        }

        reached.insert(start, 0);
        let mut frontier = VecDeque::from([start]);

        while let Some(current) = frontier.pop_front() {
            let steps = reached[&current];
            if steps == max_steps {
                continue;
            }
            for neighbor in current.neighbors() {
                if reached.contains_key(&neighbor)
                    || !self.is_passable(neighbor)
                    || self.occupants.contains_key(&neighbor)
                {
                    continue;
                }
                reached.insert(neighbor, steps + 1);
                frontier.push_back(neighbor);
            }
        }

        reached
    }

    /// Length of the shortest unobstructed path, or `None` if there is none.
    #[must_use]
    pub fn path_length(&self, start: HexCoordinate, end: HexCoordinate) -> Option<u32> {
        self.reachable_coordinates(start, self.width * self.height)
            .get(&end)
            .copied()
    }

    fn check_can_stand(
        &self,
        id: BattleSquaddieId,
        coordinate: HexCoordinate,
    ) -> Result<(), MapError> {
        if !self.is_on_map(coordinate) {
            return Err(MapError::OffMap(coordinate));
        }
        if !self.is_passable(coordinate) {
            return Err(MapError::Impassable(coordinate));
        }
        match self.occupants.get(&coordinate) {
            Some(&occupant) if occupant != id => Err(MapError::Occupied { coordinate, occupant }),
            _ => Ok(()),
        }
    }
}
