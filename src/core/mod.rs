//! Core battle types: ids, affiliations, hex coordinates, RNG, configuration
//! and the shared [`BattleContext`].
//!
//! Everything else in the crate builds on these. Components and message
//! listeners receive the context by `&mut` rather than reaching for globals.

pub mod affiliation;
pub mod config;
pub mod context;
pub mod hex;
pub mod ids;
pub mod rng;

pub use affiliation::SquaddieAffiliation;
pub use config::BattleConfig;
pub use context::BattleContext;
pub use hex::HexCoordinate;
pub use ids::{ActionTemplateId, BattleSquaddieId, SquaddieTemplateId};
pub use rng::{GameRng, GameRngState};
