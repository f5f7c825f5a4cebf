//! The message board.
//!
//! Listeners register for one [`MessageType`] at a time; the same listener
//! may register for several. [`MessageBoard::send_message`] delivers
//! synchronously, in registration order, to every listener registered for
//! the message's type. Sending with no listeners does nothing.
//!
//! ## Dispatch rules
//!
//! - The listener list is copied before delivery starts, so listeners may
//!   add or remove registrations while handling a message. Changes apply to
//!   the next send.
//! - A listener may send further messages; those are delivered depth-first
//!   before the outer delivery continues.
//! - A listener that is still handling a message is skipped if a nested send
//!   reaches it again.
//!
//! The board is generic over the context type passed to listeners so it has
//! no dependency on the rest of the battle.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use hex_tactics::message::{Message, MessageBoard, MessageType};
//!
//! let board: MessageBoard<Vec<String>> = MessageBoard::new();
//! board.add_listener(
//!     Rc::new(RefCell::new(|message: &Message, log: &mut Vec<String>| {
//!         log.push(message.message_type().to_string());
//!     })),
//!     MessageType::BattleActionFinishesAnimation,
//! );
//!
//! let mut log = Vec::new();
//! board.send_message(&Message::BattleActionFinishesAnimation, &mut log);
//! assert_eq!(log, vec!["BATTLE_ACTION_FINISHES_ANIMATION"]);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::battle_message::{Message, MessageType};

/// Something that reacts to messages.
pub trait MessageListener<C> {
    fn receive_message(&mut self, message: &Message, context: &mut C);
}

impl<C, F> MessageListener<C> for F
where
    F: FnMut(&Message, &mut C),
{
    fn receive_message(&mut self, message: &Message, context: &mut C) {
        self(message, context)
    }
}

/// Shared handle to a registered listener.
pub type ListenerHandle<C> = Rc<RefCell<dyn MessageListener<C>>>;

/// Identifies one listener across all of its registrations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

pub struct MessageBoard<C> {
    /// Registrations by message type, in registration order.
    listeners: RefCell<FxHashMap<MessageType, Vec<(ListenerId, ListenerHandle<C>)>>>,

    next_id: Cell<u32>,
}

impl<C> Default for MessageBoard<C> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(FxHashMap::default()),
            next_id: Cell::new(0),
        }
    }
}

impl<C> MessageBoard<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `message_type`.
    ///
    /// Registering a listener that is already on the board (for any type)
    /// reuses its id. Registering it twice for the same type has no effect.
    pub fn add_listener(
        &self,
        listener: ListenerHandle<C>,
        message_type: MessageType,
    ) -> ListenerId {
        let mut listeners = self.listeners.borrow_mut();

        let existing = listeners
            .values()
            .flatten()
            .find(|(_, handle)| Rc::ptr_eq(handle, &listener))
            .map(|(id, _)| *id);
        let id = existing.unwrap_or_else(|| {
            let id = ListenerId(self.next_id.get());
            self.next_id.set(id.0 + 1);
            id
        });

        let registered = listeners.entry(message_type).or_default();
        if !registered.iter().any(|(registered_id, _)| *registered_id == id) {
            registered.push((id, listener));
        }
        id
    }

    /// Remove every registration of a listener. Returns false if it had none.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let mut removed = false;

        for registered in listeners.values_mut() {
            let before = registered.len();
            registered.retain(|(registered_id, _)| *registered_id != id);
            removed |= registered.len() != before;
        }
        listeners.retain(|_, registered| !registered.is_empty());
        removed
    }

    /// Number of listeners registered for `message_type`.
    #[must_use]
    pub fn listener_count(&self, message_type: MessageType) -> usize {
        self.listeners
            .borrow()
            .get(&message_type)
            .map_or(0, Vec::len)
    }

    /// Deliver `message` to every listener registered for its type.
    pub fn send_message(&self, message: &Message, context: &mut C) {
        let message_type = message.message_type();
        let snapshot: Vec<(ListenerId, ListenerHandle<C>)> = self
            .listeners
            .borrow()
            .get(&message_type)
            .cloned()
            .unwrap_or_default();

        trace!(%message_type, listeners = snapshot.len(), "Sending message");

        for (id, listener) in snapshot {
            match listener.try_borrow_mut() {
                Ok(mut listener) => listener.receive_message(message, context),
                Err(_) => warn!(
                    listener = %id,
                    %message_type,
                    "Skipping listener already handling a message"
                ),
            }
        }
    }
}

impl<C> std::fmt::Debug for MessageBoard<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.borrow();
        let mut counts: Vec<_> = listeners
            .iter()
            .map(|(message_type, registered)| (*message_type, registered.len()))
            .collect();
        counts.sort_by_key(|(message_type, _)| message_type.as_ref().to_string());
        f.debug_struct("MessageBoard").field("listeners", &counts).finish()
    }
}
