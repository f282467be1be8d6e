//! Guest card view model and the controller that mutates it.
//!
//! Every card is built once from the review snapshot and looked up by guest id
//! afterwards. All mutation happens on the UI thread; network results come
//! back through [`GuestCardController::apply_address_saved`] and
//! [`GuestCardController::apply_guest_marked`].

use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use shared::{
    domain::{GuestId, GuestStatus, MarkAction, Palette},
    outreach::{self, WeddingDetails},
    protocol::{GuestSnapshot, ReviewSnapshot},
};
use tracing::{debug, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{failure_notice, FailureContext, UpdateResult};

pub const CONFIRMATION_WINDOW: Duration = Duration::from_millis(2000);
pub const NO_ADDRESS_PLACEHOLDER: &str = "No address on file";

/// Side effects the controller asks of its surroundings.
pub trait CardHost {
    fn write_clipboard(&mut self, text: &str) -> Result<(), String>;
    fn open_in_new_tab(&mut self, url: &str);
    fn submit(&mut self, command: BackendCommand) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPalette {
    Neutral,
    Success,
    Primary,
    SuccessSolid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonFace {
    pub label: &'static str,
    pub palette: ButtonPalette,
    pub check_icon: bool,
}

pub const COPY_FACE: ButtonFace = ButtonFace {
    label: "Copy",
    palette: ButtonPalette::Neutral,
    check_icon: false,
};
pub const COPIED_FACE: ButtonFace = ButtonFace {
    label: "Copied!",
    palette: ButtonPalette::Success,
    check_icon: false,
};
pub const MESSENGER_FACE: ButtonFace = ButtonFace {
    label: "Copy & Open Messenger",
    palette: ButtonPalette::Primary,
    check_icon: false,
};
pub const MESSENGER_OPENING_FACE: ButtonFace = ButtonFace {
    label: "Copied & Opening...",
    palette: ButtonPalette::SuccessSolid,
    check_icon: true,
};

/// Button that shows a confirmation face for [`CONFIRMATION_WINDOW`] after a
/// successful copy. Each button owns its deadline; confirming again replaces
/// the pending one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmingButton {
    resting: ButtonFace,
    confirmed: ButtonFace,
    revert_at: Option<Instant>,
}

impl ConfirmingButton {
    fn new(resting: ButtonFace, confirmed: ButtonFace) -> Self {
        Self {
            resting,
            confirmed,
            revert_at: None,
        }
    }

    pub fn face(&self) -> ButtonFace {
        if self.revert_at.is_some() {
            self.confirmed
        } else {
            self.resting
        }
    }

    pub fn is_confirming(&self) -> bool {
        self.revert_at.is_some()
    }

    pub fn revert_at(&self) -> Option<Instant> {
        self.revert_at
    }

    fn confirm(&mut self, now: Instant) {
        self.revert_at = Some(now + CONFIRMATION_WINDOW);
    }

    fn expire(&mut self, now: Instant) -> bool {
        match self.revert_at {
            Some(at) if now >= at => {
                self.revert_at = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    status: GuestStatus,
    label: String,
    palette: Palette,
}

impl StatusBadge {
    pub fn new(status: GuestStatus) -> Self {
        Self {
            label: status.label(),
            palette: status.palette(),
            status,
        }
    }

    fn render(&mut self, status: GuestStatus) {
        *self = Self::new(status);
    }

    pub fn status(&self) -> &GuestStatus {
        &self.status
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Viewing,
    Editing,
}

/// Display/edit pair for one guest's address. The mode decides which half is
/// visible, so exactly one of them always is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEditor {
    mode: AddressMode,
    display_text: String,
    muted: bool,
    input: String,
    focus_requested: bool,
}

impl AddressEditor {
    fn new(address: Option<&str>) -> Self {
        let address = address.map(str::trim).unwrap_or_default();
        let mut editor = Self {
            mode: AddressMode::Viewing,
            display_text: String::new(),
            muted: false,
            input: address.to_string(),
            focus_requested: false,
        };
        editor.show_saved(address);
        editor
    }

    fn show_saved(&mut self, address: &str) {
        if address.is_empty() {
            self.display_text = NO_ADDRESS_PLACEHOLDER.to_string();
            self.muted = true;
        } else {
            self.display_text = address.to_string();
            self.muted = false;
        }
    }

    pub fn mode(&self) -> AddressMode {
        self.mode
    }

    pub fn is_display_visible(&self) -> bool {
        self.mode == AddressMode::Viewing
    }

    pub fn is_editor_visible(&self) -> bool {
        self.mode == AddressMode::Editing
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Placeholder styling (muted, italic).
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn edit_button_label(&self) -> &'static str {
        if self.muted {
            "Add"
        } else {
            "Edit"
        }
    }

    /// Returns true once after editing starts; the view focuses the input and
    /// selects its text when it sees it.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestCard {
    guest_id: GuestId,
    name: String,
    note: Option<String>,
    message: String,
    messenger_link: Option<String>,
    last_action_at: Option<DateTime<Utc>>,
    badge: StatusBadge,
    address: AddressEditor,
    actions: Vec<MarkAction>,
    actions_visible: bool,
    copy_button: Option<ConfirmingButton>,
    messenger_button: Option<ConfirmingButton>,
}

impl GuestCard {
    /// A card offers copy buttons only when it has a message, and the messenger
    /// button only when it also has a link. Already marked guests start with
    /// their action group hidden.
    pub fn new(
        guest_id: GuestId,
        name: impl Into<String>,
        status: GuestStatus,
        address: Option<&str>,
        message: impl Into<String>,
        messenger_link: Option<String>,
    ) -> Self {
        let message = message.into();
        let messenger_link = messenger_link.filter(|link| !link.trim().is_empty());
        let has_message = !message.trim().is_empty();

        Self {
            guest_id,
            name: name.into(),
            note: None,
            copy_button: has_message.then(|| ConfirmingButton::new(COPY_FACE, COPIED_FACE)),
            messenger_button: (has_message && messenger_link.is_some())
                .then(|| ConfirmingButton::new(MESSENGER_FACE, MESSENGER_OPENING_FACE)),
            message,
            messenger_link,
            last_action_at: None,
            actions: MarkAction::ALL.to_vec(),
            actions_visible: !status.is_marked(),
            badge: StatusBadge::new(status),
            address: AddressEditor::new(address),
        }
    }

    pub fn from_snapshot(snapshot: &GuestSnapshot, wedding: &WeddingDetails) -> Self {
        let message = snapshot
            .message
            .clone()
            .unwrap_or_else(|| {
                outreach::fallback_message(outreach::first_name(&snapshot.name), wedding)
            });
        let messenger_link = snapshot.messenger_link.clone().or_else(|| {
            Some(outreach::messenger_link(
                snapshot.facebook_profile.as_deref(),
                Some(&snapshot.name),
                None,
            ))
        });

        let mut card = Self::new(
            snapshot.id,
            snapshot.name.clone(),
            snapshot.status.clone(),
            snapshot.address.as_deref(),
            message,
            messenger_link,
        );
        card.note = snapshot.note.clone().filter(|note| !note.trim().is_empty());
        card.last_action_at = snapshot.last_action_at;
        card
    }

    pub fn guest_id(&self) -> GuestId {
        self.guest_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn messenger_link(&self) -> Option<&str> {
        self.messenger_link.as_deref()
    }

    pub fn last_action_at(&self) -> Option<DateTime<Utc>> {
        self.last_action_at
    }

    pub fn badge(&self) -> &StatusBadge {
        &self.badge
    }

    pub fn address(&self) -> &AddressEditor {
        &self.address
    }

    pub fn address_mut(&mut self) -> &mut AddressEditor {
        &mut self.address
    }

    pub fn copy_button(&self) -> Option<&ConfirmingButton> {
        self.copy_button.as_ref()
    }

    pub fn messenger_button(&self) -> Option<&ConfirmingButton> {
        self.messenger_button.as_ref()
    }

    pub fn actions_visible(&self) -> bool {
        self.actions_visible
    }

    /// Actions currently offered; empty once the group is hidden.
    pub fn visible_actions(&self) -> &[MarkAction] {
        if self.actions_visible {
            &self.actions
        } else {
            &[]
        }
    }

    pub fn offers_action(&self, action: MarkAction) -> bool {
        self.visible_actions().contains(&action)
    }

    fn expire_confirmations(&mut self, now: Instant) -> bool {
        let copy = self
            .copy_button
            .as_mut()
            .is_some_and(|button| button.expire(now));
        let messenger = self
            .messenger_button
            .as_mut()
            .is_some_and(|button| button.expire(now));
        copy || messenger
    }

    fn next_revert_at(&self) -> Option<Instant> {
        [self.copy_button.as_ref(), self.messenger_button.as_ref()]
            .into_iter()
            .flatten()
            .filter_map(ConfirmingButton::revert_at)
            .min()
    }
}

#[derive(Debug, Default)]
pub struct GuestCardController {
    cards: Vec<GuestCard>,
    index: HashMap<GuestId, usize>,
    focused: Option<GuestId>,
    notices: VecDeque<String>,
}

impl GuestCardController {
    pub fn new(cards: Vec<GuestCard>) -> Self {
        let mut kept = Vec::with_capacity(cards.len());
        let mut index = HashMap::with_capacity(cards.len());
        for card in cards {
            if index.contains_key(&card.guest_id) {
                warn!(guest_id = card.guest_id.0, "duplicate guest card ignored");
                continue;
            }
            index.insert(card.guest_id, kept.len());
            kept.push(card);
        }

        Self {
            cards: kept,
            index,
            focused: None,
            notices: VecDeque::new(),
        }
    }

    pub fn from_snapshot(snapshot: &ReviewSnapshot, wedding: &WeddingDetails) -> Self {
        Self::new(
            snapshot
                .guests
                .iter()
                .map(|guest| GuestCard::from_snapshot(guest, wedding))
                .collect(),
        )
    }

    pub fn cards(&self) -> &[GuestCard] {
        &self.cards
    }

    pub fn card(&self, guest_id: GuestId) -> Option<&GuestCard> {
        self.index.get(&guest_id).map(|&idx| &self.cards[idx])
    }

    pub fn card_mut(&mut self, guest_id: GuestId) -> Option<&mut GuestCard> {
        let idx = *self.index.get(&guest_id)?;
        self.cards.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn focused(&self) -> Option<GuestId> {
        self.focused
    }

    pub fn focused_card(&self) -> Option<&GuestCard> {
        self.focused.and_then(|id| self.card(id))
    }

    pub fn focus_card(&mut self, guest_id: GuestId) -> bool {
        if !self.index.contains_key(&guest_id) {
            return false;
        }
        self.focused = Some(guest_id);
        true
    }

    /// Focus leaves `guest_id` without moving to another card.
    pub fn blur_card(&mut self, guest_id: GuestId) {
        if self.focused == Some(guest_id) {
            self.focused = None;
        }
    }

    pub fn focus_first_card(&mut self) {
        if let Some(first) = self.cards.first() {
            self.focused = Some(first.guest_id);
        }
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let Some(current) = self.focused.and_then(|id| self.index.get(&id).copied()) else {
            self.focus_first_card();
            return;
        };
        let target = current
            .checked_add_signed(step)
            .filter(|&idx| idx < self.cards.len())
            .unwrap_or(current);
        self.focused = Some(self.cards[target].guest_id);
    }

    pub fn copy_message(&mut self, guest_id: GuestId, host: &mut dyn CardHost, now: Instant) {
        let Some(idx) = self.index.get(&guest_id).copied() else {
            warn!(guest_id = guest_id.0, "copy requested for unknown guest");
            return;
        };

        let outcome = {
            let card = &mut self.cards[idx];
            let Some(button) = card.copy_button.as_mut() else {
                debug!(guest_id = guest_id.0, "card has no copy button");
                return;
            };
            host.write_clipboard(&card.message)
                .map(|()| button.confirm(now))
        };

        match outcome {
            Ok(()) => debug!(guest_id = guest_id.0, "message copied"),
            Err(err) => {
                warn!(guest_id = guest_id.0, "clipboard write failed: {err}");
                self.notify(FailureContext::CopyMessage.generic_notice());
            }
        }
    }

    /// Copies the message, then opens the messaging link. The link is only
    /// opened when the copy succeeded.
    pub fn copy_and_open_messenger(
        &mut self,
        guest_id: GuestId,
        host: &mut dyn CardHost,
        now: Instant,
    ) {
        let Some(idx) = self.index.get(&guest_id).copied() else {
            warn!(guest_id = guest_id.0, "copy-and-open requested for unknown guest");
            return;
        };

        let outcome = {
            let card = &mut self.cards[idx];
            let (Some(button), Some(link)) =
                (card.messenger_button.as_mut(), card.messenger_link.as_deref())
            else {
                debug!(guest_id = guest_id.0, "card has no messenger button");
                return;
            };
            host.write_clipboard(&card.message).map(|()| {
                button.confirm(now);
                host.open_in_new_tab(link);
            })
        };

        match outcome {
            Ok(()) => debug!(guest_id = guest_id.0, "message copied, messenger opened"),
            Err(err) => {
                warn!(guest_id = guest_id.0, "clipboard write failed: {err}");
                self.notify(FailureContext::CopyAndOpen.generic_notice());
            }
        }
    }

    pub fn open_messenger(&self, guest_id: GuestId, host: &mut dyn CardHost) {
        if let Some(link) = self.card(guest_id).and_then(GuestCard::messenger_link) {
            host.open_in_new_tab(link);
        }
    }

    /// Reverts every confirmation whose window has passed. Returns whether
    /// anything changed.
    pub fn expire_confirmations(&mut self, now: Instant) -> bool {
        self.cards
            .iter_mut()
            .fold(false, |changed, card| card.expire_confirmations(now) || changed)
    }

    pub fn next_revert_at(&self) -> Option<Instant> {
        self.cards.iter().filter_map(GuestCard::next_revert_at).min()
    }

    pub fn edit_address(&mut self, guest_id: GuestId) {
        let Some(card) = self.card_mut(guest_id) else {
            return;
        };
        card.address.mode = AddressMode::Editing;
        card.address.focus_requested = true;
    }

    /// Leaves edit mode and discards unsaved input.
    pub fn cancel_edit_address(&mut self, guest_id: GuestId) {
        let Some(card) = self.card_mut(guest_id) else {
            return;
        };
        let editor = &mut card.address;
        editor.mode = AddressMode::Viewing;
        editor.focus_requested = false;
        editor.input = if editor.display_text == NO_ADDRESS_PLACEHOLDER {
            String::new()
        } else {
            editor.display_text.clone()
        };
    }

    /// Sends the trimmed input. The editor stays open until the response
    /// arrives.
    pub fn save_address(&mut self, guest_id: GuestId, host: &mut dyn CardHost) {
        let Some(card) = self.card(guest_id) else {
            warn!(guest_id = guest_id.0, "save requested for unknown guest");
            return;
        };
        let address = card.address.input.trim().to_string();
        if let Err(err) = host.submit(BackendCommand::UpdateAddress { guest_id, address }) {
            warn!(guest_id = guest_id.0, "address update not sent: {err}");
            self.notify(FailureContext::SaveAddress.generic_notice());
        }
    }

    pub fn apply_address_saved(&mut self, guest_id: GuestId, address: &str, result: UpdateResult) {
        let new_status = match result {
            Ok(status) => status,
            Err(err) => {
                warn!(guest_id = guest_id.0, "address update failed: {err}");
                self.notify(failure_notice(FailureContext::SaveAddress, &err));
                return;
            }
        };

        let Some(card) = self.card_mut(guest_id) else {
            warn!(guest_id = guest_id.0, "address update for unknown guest");
            return;
        };
        card.address.show_saved(address);
        card.address.input = address.to_string();
        card.address.mode = AddressMode::Viewing;
        card.address.focus_requested = false;
        card.badge.render(new_status);
        info!(
            guest_id = guest_id.0,
            status = %card.badge.status,
            "address saved"
        );
    }

    pub fn mark_guest(&mut self, guest_id: GuestId, action: MarkAction, host: &mut dyn CardHost) {
        if !self.index.contains_key(&guest_id) {
            warn!(guest_id = guest_id.0, "mark requested for unknown guest");
            return;
        }
        if let Err(err) = host.submit(BackendCommand::MarkGuest { guest_id, action }) {
            warn!(guest_id = guest_id.0, %action, "guest mark not sent: {err}");
            self.notify(FailureContext::MarkGuest.generic_notice());
        }
    }

    pub fn apply_guest_marked(&mut self, guest_id: GuestId, action: MarkAction, result: UpdateResult) {
        let new_status = match result {
            Ok(status) => status,
            Err(err) => {
                warn!(guest_id = guest_id.0, %action, "guest mark failed: {err}");
                self.notify(failure_notice(FailureContext::MarkGuest, &err));
                return;
            }
        };

        let Some(card) = self.card_mut(guest_id) else {
            warn!(guest_id = guest_id.0, "mark result for unknown guest");
            return;
        };
        card.badge.render(new_status);
        card.actions_visible = false;
        info!(guest_id = guest_id.0, %action, "guest marked");
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notices.push_back(message.into());
    }

    /// Oldest blocking notification that has not been dismissed yet.
    pub fn current_notice(&self) -> Option<&str> {
        self.notices.front().map(String::as_str)
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn pending_notices(&self) -> usize {
        self.notices.len()
    }
}

#[cfg(test)]
#[path = "tests/cards_tests.rs"]
mod tests;
