use std::time::{Duration, Instant};

use arboard::Clipboard;
use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{GuestId, MarkAction},
    outreach::WeddingDetails,
    protocol::ReviewSnapshot,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::cards::{ButtonFace, CardHost, GuestCard, GuestCardController};
use crate::controller::events::{UiError, UiErrorCategory, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::shortcuts::{KeyDisposition, Shortcut};
use crate::ui::theme;

const IDLE_REPAINT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub server_url: String,
    pub snapshot: ReviewSnapshot,
    pub wedding: WeddingDetails,
    /// Shown as a banner when the guest list could not be loaded.
    pub load_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

/// What the user did to a card during the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardIntent {
    Focus(GuestId),
    Copy(GuestId),
    CopyAndOpen(GuestId),
    Edit(GuestId),
    Cancel(GuestId),
    Save(GuestId),
    Mark(GuestId, MarkAction),
}

/// Desktop side effects for the card controller.
struct DeskHost<'a> {
    ctx: &'a egui::Context,
    cmd_tx: &'a Sender<BackendCommand>,
    status: &'a mut String,
    clipboard: &'a mut Option<Clipboard>,
}

impl CardHost for DeskHost<'_> {
    fn write_clipboard(&mut self, text: &str) -> Result<(), String> {
        if self.clipboard.is_none() {
            *self.clipboard = Some(Clipboard::new().map_err(|err| err.to_string())?);
        }
        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|err| err.to_string()),
            None => Err("clipboard unavailable".to_string()),
        }
    }

    fn open_in_new_tab(&mut self, url: &str) {
        tracing::info!(url, "opening messenger link");
        self.ctx.open_url(egui::OpenUrl::new_tab(url));
    }

    fn submit(&mut self, command: BackendCommand) -> Result<(), String> {
        dispatch_backend_command(self.cmd_tx, command, self.status)
    }
}

pub struct GuestDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: GuestCardController,
    server_url: String,
    status: String,
    status_banner: Option<StatusBanner>,
    clipboard: Option<Clipboard>,
    text_input_focused: bool,
}

impl GuestDeskApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut controller = GuestCardController::from_snapshot(&startup.snapshot, &startup.wedding);
        controller.focus_first_card();

        let status = format!("Loaded {} guests", controller.len());
        let status_banner = startup.load_error.map(|message| StatusBanner {
            severity: StatusBannerSeverity::Error,
            message,
        });

        Self {
            cmd_tx,
            ui_rx,
            controller,
            server_url: startup.server_url,
            status,
            status_banner,
            clipboard: None,
            text_input_focused: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::AddressSaved {
                    guest_id,
                    address,
                    result,
                } => {
                    self.status = match &result {
                        Ok(status) => format!("Guest {guest_id} address saved ({status})"),
                        Err(err) => format!("Guest {guest_id} address not saved: {}", err.message),
                    };
                    self.controller
                        .apply_address_saved(guest_id, &address, result);
                }
                UiEvent::GuestMarked {
                    guest_id,
                    action,
                    result,
                } => {
                    self.status = match &result {
                        Ok(status) => format!("Guest {guest_id} marked {status}"),
                        Err(err) => format!("Guest {guest_id} not marked {action}: {}", err.message),
                    };
                    self.controller.apply_guest_marked(guest_id, action, result);
                }
                UiEvent::Error(err) => self.show_error(err),
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        self.status = format!("{} error: {}", err_label(err.category()), err.message());
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: err.message().to_string(),
        });
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context, now: Instant) {
        if self.controller.current_notice().is_some() || self.text_input_focused {
            return;
        }

        // Shift is allowed so upper-case letters still count.
        let keys: Vec<(egui::Key, egui::Modifiers)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } if !(modifiers.ctrl || modifiers.alt || modifiers.command || modifiers.mac_cmd) => {
                        Some((*key, *modifiers))
                    }
                    _ => None,
                })
                .collect()
        });

        for (key, modifiers) in keys {
            match key {
                egui::Key::ArrowDown => self.controller.focus_next(),
                egui::Key::ArrowUp => self.controller.focus_previous(),
                egui::Key::Escape => {
                    if let Some(focused) = self.controller.focused() {
                        self.controller.blur_card(focused);
                    }
                }
                other => {
                    let Some(shortcut) = Shortcut::from_key_name(other.name()) else {
                        continue;
                    };
                    let mut host = DeskHost {
                        ctx,
                        cmd_tx: &self.cmd_tx,
                        status: &mut self.status,
                        clipboard: &mut self.clipboard,
                    };
                    if self.controller.handle_shortcut(shortcut, &mut host, now)
                        == KeyDisposition::Consumed
                    {
                        ctx.input_mut(|i| i.consume_key(modifiers, other));
                    }
                }
            }
        }
    }

    fn apply_intents(&mut self, ctx: &egui::Context, intents: Vec<CardIntent>, now: Instant) {
        let mut host = DeskHost {
            ctx,
            cmd_tx: &self.cmd_tx,
            status: &mut self.status,
            clipboard: &mut self.clipboard,
        };
        for intent in intents {
            match intent {
                CardIntent::Focus(id) => {
                    self.controller.focus_card(id);
                }
                CardIntent::Copy(id) => self.controller.copy_message(id, &mut host, now),
                CardIntent::CopyAndOpen(id) => {
                    self.controller.copy_and_open_messenger(id, &mut host, now)
                }
                CardIntent::Edit(id) => self.controller.edit_address(id),
                CardIntent::Cancel(id) => self.controller.cancel_edit_address(id),
                CardIntent::Save(id) => self.controller.save_address(id, &mut host),
                CardIntent::Mark(id, action) => self.controller.mark_guest(id, action, &mut host),
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("guest_desk_top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Guest Review");
                ui.separator();
                ui.label(format!(
                    "{} ({})",
                    self.server_url,
                    theme::server_environment_label(&self.server_url)
                ));
                ui.separator();
                ui.label(format!("{} guests", self.controller.len()));
                ui.separator();
                ui.label(egui::RichText::new(&self.status).weak());
            });
            self.show_status_banner(ui);
            ui.add_space(6.0);
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_cards(&mut self, ctx: &egui::Context) -> Vec<CardIntent> {
        let mut intents = Vec::new();
        let mut text_input_focused = false;
        let mut card_rects = Vec::with_capacity(self.controller.len());

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("No guests to review").color(theme::muted_text()));
                });
                return;
            }

            let focused = self.controller.focused();
            let ids: Vec<GuestId> = self
                .controller
                .cards()
                .iter()
                .map(GuestCard::guest_id)
                .collect();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for id in ids {
                        let Some(card) = self.controller.card_mut(id) else {
                            continue;
                        };
                        let rect = show_card(
                            ui,
                            card,
                            focused == Some(id),
                            &mut intents,
                            &mut text_input_focused,
                        );
                        card_rects.push((id, rect));
                        ui.add_space(10.0);
                    }
                });
        });

        self.text_input_focused = text_input_focused;

        // Any click inside a card focuses it; a click elsewhere leaves no card focused.
        if self.controller.current_notice().is_some() {
            return intents;
        }
        let click = ctx.input(|i| {
            i.pointer
                .primary_clicked()
                .then(|| i.pointer.interact_pos())
                .flatten()
        });
        if let Some(pos) = click {
            match card_rects.iter().find(|(_, rect)| rect.contains(pos)) {
                Some((id, _)) => intents.insert(0, CardIntent::Focus(*id)),
                None => {
                    if let Some(focused) = self.controller.focused() {
                        self.controller.blur_card(focused);
                    }
                }
            }
        }

        intents
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.controller.current_notice().map(str::to_owned) else {
            return;
        };

        let mut dismissed = false;
        let modal = egui::Modal::new(egui::Id::new("guest_desk_notice")).show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(notice);
            ui.add_space(10.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    dismissed = true;
                }
            });
        });

        if dismissed || modal.should_close() {
            self.controller.dismiss_notice();
        }
    }
}

fn show_card(
    ui: &mut egui::Ui,
    card: &mut GuestCard,
    focused: bool,
    intents: &mut Vec<CardIntent>,
    text_input_focused: &mut bool,
) -> egui::Rect {
    let id = card.guest_id();
    let stroke = if focused {
        theme::focused_card_stroke()
    } else {
        theme::card_stroke()
    };

    egui::Frame::NONE
        .fill(egui::Color32::WHITE)
        .stroke(stroke)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(card.name()).strong().size(16.0));
                show_badge(ui, card);
                if let Some(at) = card.last_action_at() {
                    ui.label(
                        egui::RichText::new(format!(
                            "Last action {}",
                            at.with_timezone(&Local).format("%b %-d, %H:%M")
                        ))
                        .small()
                        .color(theme::muted_text()),
                    );
                }
            });
            if let Some(note) = card.note() {
                ui.label(egui::RichText::new(note).italics().color(theme::muted_text()));
            }
            ui.add_space(6.0);

            show_address(ui, card, intents, text_input_focused);

            if !card.message().is_empty() {
                ui.add_space(6.0);
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(card.message());
                    });
            }

            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                if let Some(button) = card.copy_button() {
                    if ui.add(face_button(button.face())).clicked() {
                        intents.push(CardIntent::Copy(id));
                    }
                }
                if let Some(button) = card.messenger_button() {
                    if ui.add(face_button(button.face())).clicked() {
                        intents.push(CardIntent::CopyAndOpen(id));
                    }
                }
                if !card.visible_actions().is_empty() {
                    ui.separator();
                }
                for &action in card.visible_actions() {
                    if ui.button(action.button_label()).clicked() {
                        intents.push(CardIntent::Mark(id, action));
                    }
                }
            });
        })
        .response
        .rect
}

fn show_badge(ui: &mut egui::Ui, card: &GuestCard) {
    let colors = theme::badge_colors(card.badge().palette());
    egui::Frame::NONE
        .fill(colors.fill)
        .corner_radius(9.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(card.badge().label())
                    .small()
                    .color(colors.text),
            );
        });
}

fn show_address(
    ui: &mut egui::Ui,
    card: &mut GuestCard,
    intents: &mut Vec<CardIntent>,
    text_input_focused: &mut bool,
) {
    let id = card.guest_id();

    if card.address().is_display_visible() {
        ui.horizontal(|ui| {
            let editor = card.address();
            let text = egui::RichText::new(editor.display_text());
            let text = if editor.is_muted() {
                text.italics().color(theme::muted_text())
            } else {
                text
            };
            ui.label(text);
            if ui.small_button(editor.edit_button_label()).clicked() {
                intents.push(CardIntent::Edit(id));
            }
        });
        return;
    }

    ui.horizontal(|ui| {
        let editor = card.address_mut();
        let focus_requested = editor.take_focus_request();
        let output = egui::TextEdit::singleline(editor.input_mut())
            .id(egui::Id::new(("guest_address_input", id.0)))
            .hint_text("Mailing address")
            .desired_width(320.0)
            .show(ui);

        if focus_requested {
            output.response.request_focus();
            let len = editor.input().chars().count();
            let mut state = output.state.clone();
            state
                .cursor
                .set_char_range(Some(egui::text::CCursorRange::two(
                    egui::text::CCursor::new(0),
                    egui::text::CCursor::new(len),
                )));
            state.store(ui.ctx(), output.response.id);
        }

        if output.response.has_focus() || focus_requested {
            *text_input_focused = true;
        }
        if output.response.lost_focus() {
            if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                intents.push(CardIntent::Save(id));
            } else if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                intents.push(CardIntent::Cancel(id));
            }
        }

        if ui.button("Save").clicked() {
            intents.push(CardIntent::Save(id));
        }
        if ui.button("Cancel").clicked() {
            intents.push(CardIntent::Cancel(id));
        }
    });
}

fn face_button(face: ButtonFace) -> egui::Button<'static> {
    let label = if face.check_icon {
        format!("✔ {}", face.label)
    } else {
        face.label.to_string()
    };
    match theme::button_colors(face.palette) {
        Some((fill, text)) => egui::Button::new(egui::RichText::new(label).color(text)).fill(fill),
        None => egui::Button::new(label),
    }
}

impl eframe::App for GuestDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.process_ui_events();
        self.controller.expire_confirmations(now);
        self.handle_keyboard(ctx, now);

        self.show_top_bar(ctx);
        let intents = self.show_cards(ctx);
        self.apply_intents(ctx, intents, now);
        self.show_notice(ctx);

        let wait = self
            .controller
            .next_revert_at()
            .map(|at| at.saturating_duration_since(now))
            .map_or(IDLE_REPAINT, |until_revert| until_revert.min(IDLE_REPAINT));
        ctx.request_repaint_after(wait);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::{
        domain::GuestStatus,
        error::ApiError,
        protocol::GuestSnapshot,
    };

    fn guest(id: i64, name: &str) -> GuestSnapshot {
        GuestSnapshot {
            id: GuestId(id),
            name: name.to_string(),
            address: None,
            note: None,
            facebook_profile: None,
            status: GuestStatus::NeedsAddress,
            messenger_link: None,
            message: Some(format!("Hi {name}!")),
            last_action_at: None,
        }
    }

    fn app_with_guest() -> (GuestDeskApp, Sender<UiEvent>) {
        let (app, ui_tx, _cmd_rx) = app_with_guests(vec![guest(7, "Ada Lovelace")]);
        (app, ui_tx)
    }

    fn app_with_guests(
        guests: Vec<GuestSnapshot>,
    ) -> (GuestDeskApp, Sender<UiEvent>, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let snapshot = ReviewSnapshot { guests };
        let app = GuestDeskApp::new(
            cmd_tx,
            ui_rx,
            StartupConfig {
                server_url: "http://127.0.0.1:5000".to_string(),
                snapshot,
                ..StartupConfig::default()
            },
        );
        (app, ui_tx, cmd_rx)
    }

    /// Feeds one key press through a fresh frame. Returns whether the key
    /// was left for other widgets.
    fn press(app: &mut GuestDeskApp, key: egui::Key, modifiers: egui::Modifiers) -> bool {
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.events.push(egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        });
        ctx.begin_pass(input);
        app.handle_keyboard(&ctx, Instant::now());
        let left = ctx.input(|i| {
            i.events
                .iter()
                .any(|event| matches!(event, egui::Event::Key { key: k, .. } if *k == key))
        });
        let _ = ctx.end_pass();
        left
    }

    fn requested(id: i64) -> BackendCommand {
        BackendCommand::MarkGuest {
            guest_id: GuestId(id),
            action: MarkAction::Requested,
        }
    }

    #[test]
    fn mark_key_is_consumed_and_queued() {
        let (mut app, _ui_tx, cmd_rx) = app_with_guests(vec![guest(7, "Ada Lovelace")]);

        assert!(!press(&mut app, egui::Key::R, egui::Modifiers::NONE));
        assert_eq!(cmd_rx.try_recv().ok(), Some(requested(7)));
    }

    #[test]
    fn shifted_letters_still_trigger_shortcuts() {
        let (mut app, _ui_tx, cmd_rx) = app_with_guests(vec![guest(7, "Ada Lovelace")]);

        assert!(!press(&mut app, egui::Key::R, egui::Modifiers::SHIFT));
        assert_eq!(cmd_rx.try_recv().ok(), Some(requested(7)));

        assert!(!press(&mut app, egui::Key::N, egui::Modifiers::SHIFT));
        assert_eq!(
            cmd_rx.try_recv().ok(),
            Some(BackendCommand::MarkGuest {
                guest_id: GuestId(7),
                action: MarkAction::NotOnFb,
            })
        );
    }

    #[test]
    fn command_chords_are_left_alone() {
        let (mut app, _ui_tx, cmd_rx) = app_with_guests(vec![guest(7, "Ada Lovelace")]);

        assert!(press(&mut app, egui::Key::C, egui::Modifiers::COMMAND));
        assert!(press(&mut app, egui::Key::R, egui::Modifiers::CTRL));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn keys_without_focused_card_pass_through() {
        let (mut app, _ui_tx, cmd_rx) = app_with_guests(vec![guest(7, "Ada Lovelace")]);

        press(&mut app, egui::Key::Escape, egui::Modifiers::NONE);
        assert_eq!(app.controller.focused(), None);

        assert!(press(&mut app, egui::Key::R, egui::Modifiers::NONE));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn arrows_move_focus_between_cards() {
        let (mut app, _ui_tx, _cmd_rx) =
            app_with_guests(vec![guest(1, "Ada"), guest(2, "Grace"), guest(3, "Alan")]);
        assert_eq!(app.controller.focused(), Some(GuestId(1)));

        press(&mut app, egui::Key::ArrowDown, egui::Modifiers::NONE);
        press(&mut app, egui::Key::ArrowDown, egui::Modifiers::NONE);
        assert_eq!(app.controller.focused(), Some(GuestId(3)));

        press(&mut app, egui::Key::ArrowDown, egui::Modifiers::NONE);
        assert_eq!(app.controller.focused(), Some(GuestId(3)));

        press(&mut app, egui::Key::ArrowUp, egui::Modifiers::NONE);
        assert_eq!(app.controller.focused(), Some(GuestId(2)));
    }

    #[test]
    fn shortcuts_are_suppressed_while_notice_is_open() {
        let (mut app, _ui_tx, cmd_rx) = app_with_guests(vec![guest(7, "Ada Lovelace")]);
        app.controller.apply_guest_marked(
            GuestId(7),
            MarkAction::Requested,
            Err(ApiError::rejected("DB locked")),
        );

        assert!(press(&mut app, egui::Key::R, egui::Modifiers::NONE));
        press(&mut app, egui::Key::Escape, egui::Modifiers::NONE);
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.controller.focused(), Some(GuestId(7)));

        app.controller.dismiss_notice();
        assert!(!press(&mut app, egui::Key::R, egui::Modifiers::NONE));
        assert_eq!(cmd_rx.try_recv().ok(), Some(requested(7)));
    }

    #[test]
    fn shortcuts_are_suppressed_while_editing_address() {
        let (mut app, _ui_tx, cmd_rx) = app_with_guests(vec![guest(7, "Ada Lovelace")]);
        app.controller.edit_address(GuestId(7));

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let _ = app.show_cards(ctx);
        });
        assert!(app.text_input_focused);

        assert!(press(&mut app, egui::Key::R, egui::Modifiers::NONE));
        assert!(press(&mut app, egui::Key::C, egui::Modifiers::SHIFT));
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.controller.pending_notices(), 0);
    }

    #[test]
    fn first_card_is_focused_on_start() {
        let (app, _ui_tx) = app_with_guest();
        assert_eq!(app.controller.focused(), Some(GuestId(7)));
        assert_eq!(app.status, "Loaded 1 guests");
    }

    #[test]
    fn backend_results_reach_the_cards() {
        let (mut app, ui_tx) = app_with_guest();
        ui_tx
            .send(UiEvent::AddressSaved {
                guest_id: GuestId(7),
                address: "1 Elm St".to_string(),
                result: Ok(GuestStatus::HasAddress),
            })
            .expect("send");
        ui_tx
            .send(UiEvent::GuestMarked {
                guest_id: GuestId(7),
                action: MarkAction::Requested,
                result: Err(ApiError::rejected("DB locked")),
            })
            .expect("send");

        app.process_ui_events();

        let card = app.controller.card(GuestId(7)).expect("card");
        assert_eq!(card.address().display_text(), "1 Elm St");
        assert_eq!(card.badge().label(), "Has Address");
        assert!(card.actions_visible());
        assert_eq!(app.controller.current_notice(), Some("Error: DB locked"));
        assert_eq!(app.status, "Guest 7 not marked requested: DB locked");
    }

    #[test]
    fn backend_errors_raise_banner() {
        let (mut app, ui_tx) = app_with_guest();
        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                crate::controller::events::UiErrorContext::BackendStartup,
                "failed to build runtime",
            )))
            .expect("send");

        app.process_ui_events();

        assert!(app.status.starts_with("Transport error"));
        assert!(app.status_banner.is_some());
    }
}
