//! Input events delivered to the active component.
//!
//! Pixel-to-hex resolution happens outside the crate; a mouse event arrives
//! already resolved to a map coordinate or a HUD button.

use serde::{Deserialize, Serialize};

use crate::core::{ActionTemplateId, HexCoordinate};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseEventType {
    Press,
    Release,
    Move,
    /// Periodic report of where the cursor rests.
    Location,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HudButton {
    Action(ActionTemplateId),
    EndTurn,
    Confirm,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseTarget {
    Map(HexCoordinate),
    Button(HudButton),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub event_type: MouseEventType,
    pub target: MouseTarget,
}

impl MouseEvent {
    #[must_use]
    pub fn new(event_type: MouseEventType, target: MouseTarget) -> Self {
        Self { event_type, target }
    }

    /// A press on a map tile.
    #[must_use]
    pub fn press_map(coordinate: HexCoordinate) -> Self {
        Self::new(MouseEventType::Press, MouseTarget::Map(coordinate))
    }

    /// A press on a HUD button.
    #[must_use]
    pub fn press_button(button: HudButton) -> Self {
        Self::new(MouseEventType::Press, MouseTarget::Button(button))
    }

    #[must_use]
    pub fn is_press(&self) -> bool {
        self.event_type == MouseEventType::Press
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEventType {
    Pressed,
}

/// Keyboard actions, already mapped from physical keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerInputAction {
    Accept,
    Cancel,
    EndTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub event_type: KeyEventType,
    pub action: PlayerInputAction,
}

impl KeyEvent {
    #[must_use]
    pub fn pressed(action: PlayerInputAction) -> Self {
        Self {
            event_type: KeyEventType::Pressed,
            action,
        }
    }
}
