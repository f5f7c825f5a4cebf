//! Decision step ordering tests.

use hex_tactics::core::{ActionTemplateId, BattleSquaddieId, HexCoordinate};
use hex_tactics::decision::{ActionKind, BattleActionDecisionStep, DecisionStepError};
use proptest::prelude::*;

fn action_kind() -> impl Strategy<Value = ActionKind> {
    prop_oneof![
        (1u16..20).prop_map(|id| ActionKind::ActionTemplate(ActionTemplateId::new(id))),
        Just(ActionKind::Movement),
        Just(ActionKind::EndTurn),
    ]
}

fn coordinate() -> impl Strategy<Value = HexCoordinate> {
    (-10i32..10, -10i32..10).prop_map(|(q, r)| HexCoordinate::new(q, r))
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_action_before_actor_is_rejected() {
    let mut step = BattleActionDecisionStep::new();
    assert_eq!(step.add_action(ActionKind::Movement), Err(DecisionStepError::ActorNotSet));
    assert_eq!(step, BattleActionDecisionStep::new());
}

#[test]
fn test_target_before_action_is_rejected() {
    let mut step = BattleActionDecisionStep::new();
    let target = HexCoordinate::new(1, 1);
    assert_eq!(step.set_considered_target(target), Err(DecisionStepError::ActorNotSet));

    step.set_actor(BattleSquaddieId::new(4)).unwrap();
    assert_eq!(step.set_considered_target(target), Err(DecisionStepError::ActionNotSet));
    assert_eq!(step.set_confirmed_target(target), Err(DecisionStepError::ActionNotSet));
    assert!(!step.is_target_considered());
}

#[test]
fn test_second_actor_needs_reset() {
    let mut step = BattleActionDecisionStep::new();
    step.set_actor(BattleSquaddieId::new(1)).unwrap();

    let error = step.set_actor(BattleSquaddieId::new(2)).unwrap_err();
    assert_eq!(error, DecisionStepError::ActorAlreadySet(BattleSquaddieId::new(1)));
    assert!(error.to_string().contains("reset the decision step"));

    step.reset();
    step.set_actor(BattleSquaddieId::new(2)).unwrap();
    assert_eq!(step.actor(), Some(BattleSquaddieId::new(2)));
}

#[test]
fn test_confirm_then_reconsider() {
    let mut step = BattleActionDecisionStep::new();
    step.set_actor(BattleSquaddieId::new(1)).unwrap();
    step.add_action(ActionKind::ActionTemplate(ActionTemplateId::new(1))).unwrap();
    step.set_confirmed_target(HexCoordinate::new(2, 0)).unwrap();
    assert!(step.is_target_confirmed());

    step.set_considered_target(HexCoordinate::new(3, 0)).unwrap();
    assert!(!step.is_target_confirmed());
    assert_eq!(step.considered_target(), Some(HexCoordinate::new(3, 0)));
}

#[test]
fn test_remove_target_keeps_action() {
    let mut step = BattleActionDecisionStep::new();
    step.set_actor(BattleSquaddieId::new(1)).unwrap();
    step.add_action(ActionKind::Movement).unwrap();
    step.set_considered_target(HexCoordinate::new(0, 2)).unwrap();

    step.remove_target();

    assert!(step.is_action_set());
    assert!(!step.is_target_considered());
    assert_eq!(step.target(), None);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn test_predicates_track_stages(
        actor in 1u32..100,
        action in action_kind(),
        target in coordinate(),
        stages in 0usize..=4,
    ) {
        let mut step = BattleActionDecisionStep::new();
        if stages >= 1 {
            step.set_actor(BattleSquaddieId::new(actor)).unwrap();
        }
        if stages >= 2 {
            step.add_action(action).unwrap();
        }
        if stages >= 3 {
            step.set_considered_target(target).unwrap();
        }
        if stages >= 4 {
            step.set_confirmed_target(target).unwrap();
        }

        prop_assert_eq!(step.is_actor_set(), stages >= 1);
        prop_assert_eq!(step.is_action_set(), stages >= 2);
        prop_assert_eq!(step.is_target_considered(), stages >= 3);
        prop_assert_eq!(step.is_target_confirmed(), stages >= 4);
        if stages >= 4 {
            prop_assert_eq!(step.confirmed_target(), step.considered_target());
        }
    }

    #[test]
    fn test_reset_matches_new(actor in 1u32..100, action in action_kind(), target in coordinate()) {
        let mut step = BattleActionDecisionStep::new();
        step.set_actor(BattleSquaddieId::new(actor)).unwrap();
        step.add_action(action).unwrap();
        step.set_confirmed_target(target).unwrap();

        step.reset();
        prop_assert_eq!(step, BattleActionDecisionStep::new());
    }

    #[test]
    fn test_rejected_setter_changes_nothing(
        actor in 1u32..100,
        first in action_kind(),
        second in action_kind(),
    ) {
        let mut step = BattleActionDecisionStep::new();
        step.set_actor(BattleSquaddieId::new(actor)).unwrap();
        step.add_action(first).unwrap();
        let before = step.clone();

        prop_assert_eq!(step.add_action(second), Err(DecisionStepError::ActionAlreadySet(first)));
        prop_assert_eq!(step, before);
    }
}
