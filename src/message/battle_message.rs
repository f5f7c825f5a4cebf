//! Battle messages.
//!
//! Each message carries the minimum payload its listeners need. Anything
//! else (the chosen action, the confirmed target) is read from the decision
//! step in the battle context.

use serde::{Deserialize, Serialize};

use crate::core::{ActionTemplateId, BattleSquaddieId, HexCoordinate, SquaddieAffiliation};

/// Message type identifier; listeners register per type.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    PlayerSelectsAndLocksSquaddie,
    PlayerSelectsActionThatRequiresATarget,
    PlayerSelectsTargetCoordinate,
    PlayerConfirmsAction,
    PlayerCancelsTargetSelection,
    PlayerCancelsTargetConfirmation,
    PlayerEndsTurn,
    MoveSquaddieToCoordinate,
    BattleActionFinishesAnimation,
    PlayerSelectionIsInvalid,
    PlayerCancelsSquaddieSelection,
    BattlePhaseStarts,
    SquaddieTurnEnds,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// The squaddie is committed to acting; it cannot be swapped out.
    PlayerSelectsAndLocksSquaddie { battle_squaddie_id: BattleSquaddieId },

    PlayerSelectsActionThatRequiresATarget {
        battle_squaddie_id: BattleSquaddieId,
        action_template_id: ActionTemplateId,
    },

    PlayerSelectsTargetCoordinate {
        battle_squaddie_id: BattleSquaddieId,
        target_coordinate: HexCoordinate,
    },

    /// Commit the decision step. Sent by the computer as well as the player.
    PlayerConfirmsAction { battle_squaddie_id: BattleSquaddieId },

    PlayerCancelsTargetSelection { battle_squaddie_id: BattleSquaddieId },

    PlayerCancelsTargetConfirmation { battle_squaddie_id: BattleSquaddieId },

    PlayerEndsTurn { battle_squaddie_id: BattleSquaddieId },

    MoveSquaddieToCoordinate {
        battle_squaddie_id: BattleSquaddieId,
        target_coordinate: HexCoordinate,
    },

    BattleActionFinishesAnimation,

    /// The last input was rejected; `reason` is shown to the player.
    PlayerSelectionIsInvalid { reason: String },

    PlayerCancelsSquaddieSelection { battle_squaddie_id: BattleSquaddieId },

    BattlePhaseStarts {
        affiliation: SquaddieAffiliation,
        turn_count: u32,
    },

    SquaddieTurnEnds { battle_squaddie_id: BattleSquaddieId },
}

impl Message {
    #[must_use]
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::PlayerSelectsAndLocksSquaddie { .. } => {
                MessageType::PlayerSelectsAndLocksSquaddie
            }
            Message::PlayerSelectsActionThatRequiresATarget { .. } => {
                MessageType::PlayerSelectsActionThatRequiresATarget
            }
            Message::PlayerSelectsTargetCoordinate { .. } => {
                MessageType::PlayerSelectsTargetCoordinate
            }
            Message::PlayerConfirmsAction { .. } => MessageType::PlayerConfirmsAction,
            Message::PlayerCancelsTargetSelection { .. } => {
                MessageType::PlayerCancelsTargetSelection
            }
            Message::PlayerCancelsTargetConfirmation { .. } => {
                MessageType::PlayerCancelsTargetConfirmation
            }
            Message::PlayerEndsTurn { .. } => MessageType::PlayerEndsTurn,
            Message::MoveSquaddieToCoordinate { .. } => MessageType::MoveSquaddieToCoordinate,
            Message::BattleActionFinishesAnimation => MessageType::BattleActionFinishesAnimation,
            Message::PlayerSelectionIsInvalid { .. } => MessageType::PlayerSelectionIsInvalid,
            Message::PlayerCancelsSquaddieSelection { .. } => {
                MessageType::PlayerCancelsSquaddieSelection
            }
            Message::BattlePhaseStarts { .. } => MessageType::BattlePhaseStarts,
            Message::SquaddieTurnEnds { .. } => MessageType::SquaddieTurnEnds,
        }
    }

    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        Message::PlayerSelectionIsInvalid { reason: reason.into() }
    }
}
