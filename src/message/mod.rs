//! Typed publish/subscribe between components, services and the HUD.
//!
//! Components announce what the player (or the computer) decided by sending
//! a [`Message`]. Listeners registered on the [`MessageBoard`] for that
//! message's [`MessageType`] react synchronously.

mod board;
mod battle_message;

pub use board::{ListenerHandle, ListenerId, MessageBoard, MessageListener};
pub use battle_message::{Message, MessageType};
