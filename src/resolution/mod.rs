//! Turning committed decisions into battle actions.
//!
//! [`resolver`] rolls and applies effects. [`BattleActionService`] listens
//! on the message board for commit messages, resolves them, and feeds the
//! results into the recorder.

pub mod resolver;
mod service;

pub use resolver::{movement_action_point_cost, roll_degree_of_success};
pub use service::BattleActionService;
