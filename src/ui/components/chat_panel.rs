//! Chat panel component
//!
//! Renders the conversation log as chat bubbles, with the typing reveal on
//! the newest assistant turn and a thinking indicator while a generation
//! request is in flight.

use crate::session::turn::Turn;
use crate::ui::state::UiState;
use crate::ui::theme::Theme;
use egui::{self, Align, Color32, RichText};

/// Canned health questions offered as suggestion chips
pub const SUGGESTIONS: &[&str] = &[
    "What are common symptoms of dehydration?",
    "How much sleep do adults need?",
    "Tips for a healthy diet",
    "How can I reduce stress?",
];

const DISCLAIMER: &str = "DISCLAIMER: This AI assistant provides general information only and is \
not a substitute for professional medical advice. Always consult a healthcare provider.";

/// Chat panel component
pub struct ChatPanel<'a> {
    turns: &'a [Turn],
    state: &'a UiState,
    theme: &'a Theme,
}

impl<'a> ChatPanel<'a> {
    pub fn new(turns: &'a [Turn], state: &'a UiState, theme: &'a Theme) -> Self {
        Self {
            turns,
            state,
            theme,
        }
    }

    /// Render the panel; returns a suggestion the user clicked, if any
    pub fn show(self, ui: &mut egui::Ui) -> Option<String> {
        let mut clicked_suggestion = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    for turn in self.turns {
                        self.show_turn(ui, turn);
                        ui.add_space(self.theme.spacing_sm);
                    }

                    if self.state.is_generating {
                        self.show_thinking_indicator(ui);
                        ui.add_space(self.theme.spacing_sm);
                    }

                    // Offer suggestions while the conversation is fresh
                    if self.turns.len() <= 1 && !self.state.is_generating {
                        clicked_suggestion = self.show_suggestions(ui);
                    }

                    if let Some(ref transcription) = self.state.last_transcription {
                        ui.add_space(self.theme.spacing_sm);
                        ui.label(
                            RichText::new(format!("You said: {}", transcription))
                                .size(12.0)
                                .italics()
                                .color(self.theme.text_muted),
                        );
                    }

                    ui.add_space(self.theme.spacing);
                    ui.separator();
                    ui.label(
                        RichText::new(DISCLAIMER)
                            .size(11.0)
                            .italics()
                            .color(self.theme.text_muted),
                    );
                    ui.add_space(self.theme.spacing_sm);
                });
            });

        clicked_suggestion
    }

    fn show_turn(&self, ui: &mut egui::Ui, turn: &Turn) {
        let is_user = turn.is_user();
        let bubble_color = if is_user {
            self.theme.user_bubble
        } else {
            self.theme.assistant_bubble
        };
        let text_color = if is_user {
            Color32::WHITE
        } else {
            self.theme.text_primary
        };
        let align = if is_user { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            ui.label(
                RichText::new(if is_user { "You" } else { "MediAssist" })
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);

                    let animating = self.state.typing.applies_to(turn.id)
                        && self.state.typing.is_active();

                    if animating {
                        let visible = self.state.typing.visible_text(turn);
                        ui.label(
                            RichText::new(format!("{} \u{258c}", visible)).color(text_color),
                        );
                        ui.ctx().request_repaint();
                    } else {
                        ui.label(RichText::new(&turn.content).color(text_color));
                    }
                });

            let time_str = turn.timestamp.format("%H:%M").to_string();
            ui.label(
                RichText::new(time_str)
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_thinking_indicator(&self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(Align::LEFT), |ui| {
            ui.label(
                RichText::new("MediAssist")
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            egui::Frame::none()
                .fill(self.theme.assistant_bubble)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("MediAssist is thinking")
                                .size(13.0)
                                .color(self.theme.text_muted),
                        );
                        for i in 0..3 {
                            let t = ui.ctx().input(|input| input.time);
                            let alpha = ((t * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                            ui.label(
                                RichText::new("\u{25cf}")
                                    .size(10.0)
                                    .color(self.theme.text_muted.gamma_multiply(alpha)),
                            );
                        }
                    });
                });
        });

        ui.ctx().request_repaint();
    }

    fn show_suggestions(&self, ui: &mut egui::Ui) -> Option<String> {
        let mut clicked = None;

        ui.add_space(self.theme.spacing);
        ui.label(
            RichText::new("Try asking:")
                .size(12.0)
                .color(self.theme.text_muted),
        );

        ui.horizontal_wrapped(|ui| {
            for suggestion in SUGGESTIONS {
                let chip = egui::Button::new(
                    RichText::new(*suggestion)
                        .size(12.0)
                        .color(self.theme.primary),
                )
                .fill(self.theme.bg_secondary)
                .stroke(egui::Stroke::new(1.0, self.theme.primary))
                .rounding(self.theme.button_rounding);

                if ui.add(chip).clicked() {
                    clicked = Some(suggestion.to_string());
                }
            }
        });

        clicked
    }
}
