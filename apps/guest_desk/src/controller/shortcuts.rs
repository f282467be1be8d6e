//! Keyboard shortcuts acting on the focused guest card.

use std::time::Instant;

use shared::domain::MarkAction;
use tracing::debug;

use crate::controller::cards::{CardHost, GuestCardController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    OpenMessenger,
    CopyMessage,
    Mark(MarkAction),
}

impl Shortcut {
    /// Maps a key name ("Enter", "c", "R", ...) to its binding, ignoring case.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "enter" => Some(Self::OpenMessenger),
            "c" => Some(Self::CopyMessage),
            "r" => Some(Self::Mark(MarkAction::Requested)),
            "n" => Some(Self::Mark(MarkAction::NotOnFb)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// No card has focus; the key keeps its default behavior.
    Ignored,
    /// The key belongs to the card, even when the card has nothing to act on.
    Consumed,
}

impl GuestCardController {
    pub fn handle_shortcut(
        &mut self,
        shortcut: Shortcut,
        host: &mut dyn CardHost,
        now: Instant,
    ) -> KeyDisposition {
        let Some(card) = self.focused_card() else {
            return KeyDisposition::Ignored;
        };
        let guest_id = card.guest_id();

        match shortcut {
            Shortcut::OpenMessenger => self.open_messenger(guest_id, host),
            Shortcut::CopyMessage => {
                if card.copy_button().is_some() {
                    self.copy_message(guest_id, host, now);
                } else {
                    debug!(guest_id = guest_id.0, "copy shortcut without copy button");
                }
            }
            Shortcut::Mark(action) => {
                if card.offers_action(action) {
                    self.mark_guest(guest_id, action, host);
                } else {
                    debug!(guest_id = guest_id.0, %action, "mark shortcut without action button");
                }
            }
        }

        KeyDisposition::Consumed
    }
}

#[cfg(test)]
#[path = "tests/shortcuts_tests.rs"]
mod tests;
