//! Targeting rules: can this squaddie use this action on that coordinate?
//!
//! Components ask a [`TargetingValidator`] before they touch the decision
//! step. The default [`RangeAndAffiliationValidator`] checks range, target
//! relation, that the target is alive, and that the actor can pay.

mod validator;

pub use validator::{
    RangeAndAffiliationValidator, TargetingIssue, TargetingQuery, TargetingValidator,
};
