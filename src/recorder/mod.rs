//! Battle action records and the recorder that sequences their animation.
//!
//! Every committed action becomes an immutable [`BattleAction`]. The
//! [`BattleActionRecorder`] plays them back one at a time and keeps the
//! battle history.

mod battle_action;
mod action_recorder;

pub use battle_action::{
    BattleAction, BattleActionActor, BattleActionEffect, DegreeOfSuccess, SquaddieEffectResult,
};
pub use action_recorder::BattleActionRecorder;
