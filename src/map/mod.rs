//! The battlefield: hex terrain and where each squaddie stands.

mod mission_map;

pub use mission_map::{MapError, MissionMap, Terrain};
