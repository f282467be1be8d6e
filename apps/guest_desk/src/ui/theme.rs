//! Colors for badges, buttons and the review window.

use eframe::egui::{self, Color32};
use shared::domain::Palette;

use crate::controller::cards::ButtonPalette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeColors {
    pub fill: Color32,
    pub text: Color32,
}

pub fn badge_colors(palette: Palette) -> BadgeColors {
    let (fill, text) = match palette {
        Palette::Success => (Color32::from_rgb(220, 252, 231), Color32::from_rgb(22, 101, 52)),
        Palette::Info => (Color32::from_rgb(219, 234, 254), Color32::from_rgb(30, 64, 175)),
        Palette::Neutral => (Color32::from_rgb(243, 244, 246), Color32::from_rgb(55, 65, 81)),
        Palette::Pending => (Color32::from_rgb(254, 249, 195), Color32::from_rgb(133, 77, 14)),
    };
    BadgeColors { fill, text }
}

/// Fill and text color for a card button face. `None` keeps egui's default look.
pub fn button_colors(palette: ButtonPalette) -> Option<(Color32, Color32)> {
    match palette {
        ButtonPalette::Neutral => None,
        ButtonPalette::Success => Some((
            Color32::from_rgb(220, 252, 231),
            Color32::from_rgb(21, 128, 61),
        )),
        ButtonPalette::Primary => Some((Color32::from_rgb(37, 99, 235), Color32::WHITE)),
        ButtonPalette::SuccessSolid => Some((Color32::from_rgb(22, 163, 74), Color32::WHITE)),
    }
}

pub fn focused_card_stroke() -> egui::Stroke {
    egui::Stroke::new(2.0, Color32::from_rgb(59, 130, 246))
}

pub fn card_stroke() -> egui::Stroke {
    egui::Stroke::new(1.0, Color32::from_rgb(229, 231, 235))
}

pub fn muted_text() -> Color32 {
    Color32::from_rgb(156, 163, 175)
}

pub fn lighten_color(c: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = Color32::from_rgb(249, 250, 251);
    visuals.window_corner_radius = egui::CornerRadius::same(10);
    visuals.selection.bg_fill = lighten_color(Color32::from_rgb(59, 130, 246), 0.6);
    visuals
}

pub fn server_environment_label(server_url: &str) -> &'static str {
    let server = server_url.to_ascii_lowercase();
    if server.contains("127.0.0.1") || server.contains("localhost") {
        "Local"
    } else {
        "Remote"
    }
}
