//! The battle action recorder.
//!
//! Committed actions wait in a FIFO until the single animation slot is free.
//! When an animation finishes, the action moves to the already-animated list
//! for the current squaddie turn and the next ready action takes the slot.
//!
//! ```text
//! add ──► ready_to_animate ──► animating ──► already_animated_this_turn
//!   │                                               │
//!   └──────────────► history                        └─ cleared when the turn ends
//! ```
//!
//! History is append-only. It grows for the whole battle unless a limit is
//! configured, in which case the oldest entries are evicted first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::battle_action::BattleAction;
use crate::core::BattleSquaddieId;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BattleActionRecorder {
    ready_to_animate: VecDeque<BattleAction>,

    /// At most one action animates at a time.
    animating: Option<BattleAction>,

    already_animated_this_turn: Vec<BattleAction>,

    /// Persistent vector so snapshots share structure with the live recorder.
    history: im::Vector<BattleAction>,

    history_limit: Option<usize>,
}

impl BattleActionRecorder {
    /// Create a recorder with unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that keeps at most `limit` history entries.
    #[must_use]
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            history_limit: limit,
            ..Self::default()
        }
    }

    /// Queue a committed action for animation and append it to history.
    ///
    /// If nothing is animating, the action at the front of the queue starts
    /// animating immediately.
    pub fn add_ready_to_animate_battle_action(&mut self, action: BattleAction) {
        debug!(actor = %action.actor_id(), action = ?action.action, "Battle action recorded");

        self.history.push_back(action.clone());
        if let Some(limit) = self.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }

        self.ready_to_animate.push_back(action);
        if self.animating.is_none() {
            self.promote_next();
        }
    }

    /// The action currently animating.
    #[must_use]
    pub fn peek_at_animation_queue(&self) -> Option<&BattleAction> {
        self.animating.as_ref()
    }

    /// The action that finished animating most recently this turn.
    #[must_use]
    pub fn peek_at_already_animated_queue(&self) -> Option<&BattleAction> {
        self.already_animated_this_turn.last()
    }

    /// Actions waiting for the animation slot, oldest first.
    pub fn ready_to_animate(&self) -> impl Iterator<Item = &BattleAction> {
        self.ready_to_animate.iter()
    }

    /// Finish the current animation and start the next.
    ///
    /// Moves the animating action to the already-animated list, then
    /// promotes the next ready action. With nothing animating this only
    /// promotes. Returns the action that finished, if any.
    pub fn battle_action_finishes_animation(&mut self) -> Option<&BattleAction> {
        let finished = self.animating.take();
        self.promote_next();

        let finished = finished?;
        trace!(actor = %finished.actor_id(), "Battle action finished animating");
        self.already_animated_this_turn.push(finished);
        self.already_animated_this_turn.last()
    }

    /// Nothing is animating and nothing is waiting.
    #[must_use]
    pub fn is_animation_queue_empty(&self) -> bool {
        self.animating.is_none() && self.ready_to_animate.is_empty()
    }

    /// Every action animated during the squaddie turn in progress, in order.
    #[must_use]
    pub fn already_animated_this_turn(&self) -> &[BattleAction] {
        &self.already_animated_this_turn
    }

    /// The squaddie whose turn is in flight: it has actions animating,
    /// waiting, or already shown this turn.
    #[must_use]
    pub fn squaddie_with_turn_in_progress(&self) -> Option<BattleSquaddieId> {
        self.animating
            .as_ref()
            .or_else(|| self.ready_to_animate.back())
            .or_else(|| self.already_animated_this_turn.last())
            .map(BattleAction::actor_id)
    }

    /// Close the current squaddie turn.
    pub fn squaddie_turn_ends(&mut self) {
        self.already_animated_this_turn.clear();
    }

    /// Every recorded action, oldest first.
    #[must_use]
    pub fn history(&self) -> &im::Vector<BattleAction> {
        &self.history
    }

    #[must_use]
    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }

    /// Restore history, e.g. from a snapshot. Queues are left untouched.
    pub fn restore_history(&mut self, history: im::Vector<BattleAction>) {
        self.history = history;
    }

    fn promote_next(&mut self) {
        if self.animating.is_none() {
            self.animating = self.ready_to_animate.pop_front();
        }
    }
}
