//! Shared battle state handed to every component and message listener.
//!
//! There is exactly one writer per tick: the orchestrator passes the context
//! by `&mut` to the active component, and the component passes it on to the
//! message board while it dispatches.

use std::rc::Rc;

use tracing::warn;

use super::{BattleConfig, GameRng};
use crate::decision::BattleActionDecisionStep;
use crate::error::BattleError;
use crate::map::MissionMap;
use crate::message::{Message, MessageBoard};
use crate::phase::BattlePhaseState;
use crate::recorder::BattleActionRecorder;
use crate::resolution::BattleActionService;
use crate::squaddie::ObjectRepository;
use crate::targeting::{RangeAndAffiliationValidator, TargetingValidator};

/// Everything a battle needs while it runs.
pub struct BattleContext {
    pub config: BattleConfig,
    pub repository: ObjectRepository,
    pub map: MissionMap,
    pub phase: BattlePhaseState,
    pub decision_step: BattleActionDecisionStep,
    pub recorder: BattleActionRecorder,
    pub message_board: Rc<MessageBoard<BattleContext>>,
    pub validator: Box<dyn TargetingValidator>,
    pub rng: GameRng,

    /// First error raised by a listener during the current dispatch.
    listener_error: Option<BattleError>,
}

impl BattleContext {
    /// Create a context and register the [`BattleActionService`] on its board.
    ///
    /// The first affiliation in the configured rotation owns the opening phase.
    /// Fails with [`BattleError::EmptyRotation`] if the rotation is empty.
    pub fn new(
        config: BattleConfig,
        repository: ObjectRepository,
        map: MissionMap,
    ) -> Result<Self, BattleError> {
        let opening = config
            .affiliation_rotation
            .first()
            .copied()
            .ok_or(BattleError::EmptyRotation)?;
        let phase = BattlePhaseState::new(opening);
        let recorder = BattleActionRecorder::with_history_limit(config.history_limit);
        let rng = GameRng::new(config.seed);
        let message_board = Rc::new(MessageBoard::new());
        BattleActionService::register(&message_board);

        Ok(Self {
            config,
            repository,
            map,
            phase,
            decision_step: BattleActionDecisionStep::new(),
            recorder,
            message_board,
            validator: Box::new(RangeAndAffiliationValidator),
            rng,
            listener_error: None,
        })
    }

    /// Replace the targeting validator.
    #[must_use]
    pub fn with_validator(mut self, validator: impl TargetingValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Publish a message to every listener registered for its type.
    ///
    /// Returns the first error a listener reported while handling it. An
    /// error parked by an enclosing dispatch stays with that dispatch.
    pub fn send_message(&mut self, message: Message) -> Result<(), BattleError> {
        let enclosing = self.listener_error.take();
        let board = Rc::clone(&self.message_board);
        board.send_message(&message, self);
        let reported = std::mem::replace(&mut self.listener_error, enclosing);
        match reported {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Record a failure from inside a listener.
    ///
    /// Listeners cannot return errors through the board, so they park them
    /// here and [`send_message`](Self::send_message) hands the first one back.
    pub fn report_listener_error(&mut self, error: BattleError) {
        if self.listener_error.is_some() {
            warn!(%error, "Dropping listener error; an earlier one is pending");
            return;
        }
        self.listener_error = Some(error);
    }
}

impl std::fmt::Debug for BattleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleContext")
            .field("phase", &self.phase)
            .field("decision_step", &self.decision_step)
            .field("recorder", &self.recorder)
            .finish_non_exhaustive()
    }
}
