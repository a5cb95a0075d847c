//! Look-and-feel settings persisted between sessions.

use std::collections::BTreeMap;

use eframe::egui;
use serde::{Deserialize, Serialize};

pub const SETTINGS_STORAGE_KEY: &str = "order_board.settings";

const MIN_TEXT_SCALE: f32 = 0.8;
const MAX_TEXT_SCALE: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemePreset {
    Dark,
    Light,
}

impl ThemePreset {
    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::Dark => "Dark",
            ThemePreset::Light => "Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardUiSettings {
    pub preset: ThemePreset,
    pub accent_color: [u8; 4],
    pub text_scale: f32,
    pub compact_cards: bool,
    pub show_created_time: bool,
}

impl Default for BoardUiSettings {
    fn default() -> Self {
        Self {
            preset: ThemePreset::Dark,
            accent_color: [88, 101, 242, 255],
            text_scale: 1.0,
            compact_cards: false,
            show_created_time: true,
        }
    }
}

impl BoardUiSettings {
    /// Clamps values that may come from an older or hand-edited store.
    pub fn sanitized(mut self) -> Self {
        self.text_scale = if self.text_scale.is_finite() {
            self.text_scale.clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE)
        } else {
            1.0
        };
        self
    }

    pub fn accent(&self) -> egui::Color32 {
        let [r, g, b, a] = self.accent_color;
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn set_accent(&mut self, color: egui::Color32) {
        self.accent_color = [color.r(), color.g(), color.b(), color.a()];
    }

    pub fn from_json(text: &str) -> Option<Self> {
        serde_json::from_str::<Self>(text).ok().map(Self::sanitized)
    }
}

pub fn text_scale_range() -> std::ops::RangeInclusive<f32> {
    MIN_TEXT_SCALE..=MAX_TEXT_SCALE
}

pub fn apply_settings(ctx: &egui::Context, settings: &BoardUiSettings) {
    let mut style = (*ctx.style()).clone();
    style.visuals = match settings.preset {
        ThemePreset::Dark => egui::Visuals::dark(),
        ThemePreset::Light => egui::Visuals::light(),
    };
    style.visuals.selection.bg_fill = settings.accent();
    style.visuals.hyperlink_color = settings.accent();
    style.text_styles = scaled_text_styles(settings.text_scale);
    if settings.compact_cards {
        style.spacing.item_spacing = egui::vec2(6.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
    } else {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
    }
    ctx.set_style(style);
}

fn scaled_text_styles(text_scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= text_scale;
    }
    styles
}
