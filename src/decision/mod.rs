//! The decision step: what the acting squaddie intends to do next.
//!
//! Components fill it in stage by stage (actor, then action, then target)
//! and the action service consumes it when the decision is committed.

mod step;

pub use step::{ActionKind, BattleActionDecisionStep, DecisionStepError, DecisionTarget};
