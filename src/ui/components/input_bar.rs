//! Input bar component
//!
//! Text input, send button, and the voice record toggle.

use crate::ui::state::{RecordingState, UiState};
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

/// Action requested by the user through the input bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Submit this text as a query
    Submit(String),
    /// Start recording voice input
    StartRecording,
    /// Stop recording and transcribe
    StopRecording,
}

/// Input bar component for text and voice input
pub struct InputBar<'a> {
    state: &'a mut UiState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut UiState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Render the bar; returns the action the user requested, if any
    pub fn show(mut self, ui: &mut egui::Ui) -> Option<InputAction> {
        let mut action = None;

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if let Some(record_action) = self.show_record_button(ui) {
                        action = Some(record_action);
                    }

                    ui.add_space(self.theme.spacing_sm);

                    if let Some(submit_action) = self.show_text_input(ui) {
                        action = Some(submit_action);
                    }

                    ui.add_space(self.theme.spacing_sm);

                    if let Some(submit_action) = self.show_send_button(ui) {
                        action = Some(submit_action);
                    }
                });
            });

        action
    }

    fn show_record_button(&mut self, ui: &mut egui::Ui) -> Option<InputAction> {
        let is_recording = self.state.recording_state.is_recording();
        let is_processing = self.state.recording_state.is_processing();

        let (icon, tooltip, color) = match self.state.recording_state {
            RecordingState::Idle => ("\u{1f3a4}", "Record a voice question", self.theme.text_secondary),
            RecordingState::Recording => ("\u{23f9}", "Stop and transcribe", self.theme.recording),
            RecordingState::Processing => ("\u{23f3}", "Transcribing...", self.theme.warning),
        };

        let button = egui::Button::new(RichText::new(icon).size(20.0).color(color))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding);

        let button = if is_recording {
            button.fill(self.theme.recording.gamma_multiply(0.2))
        } else {
            button
        };

        let response = ui.add_enabled(!is_processing && !self.state.is_generating, button);
        let button_rect = response.rect;
        let clicked = response.clicked();

        if response.hovered() && !is_processing {
            response.on_hover_text(tooltip);
        }

        // Pulsing ring while recording
        if is_recording {
            let t = ui.ctx().input(|input| input.time);
            let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

            let painter = ui.painter();
            let center = button_rect.center();
            let radius = button_rect.width() / 2.0 + 2.0 + pulse * 3.0;

            painter.circle_stroke(
                center,
                radius,
                egui::Stroke::new(
                    2.0 * pulse,
                    self.theme.recording.gamma_multiply(1.0 - pulse * 0.5),
                ),
            );

            ui.ctx().request_repaint();
        }

        if clicked {
            if is_recording {
                Some(InputAction::StopRecording)
            } else {
                Some(InputAction::StartRecording)
            }
        } else {
            None
        }
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) -> Option<InputAction> {
        let enabled = self.state.can_submit();

        // Reserve space for the send button
        let available_width = ui.available_width() - 60.0;

        let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
            .hint_text("Ask your health question...")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0));

        let response = ui.add_enabled(enabled, text_edit);

        // The field surrenders focus on Enter, so check both states
        let had_focus = response.has_focus() || response.lost_focus();
        let enter_pressed = ui.input(|input| input.key_pressed(Key::Enter));

        if had_focus && enter_pressed && !self.state.input_text.trim().is_empty() {
            response.request_focus();
            return self.state.take_input().map(InputAction::Submit);
        }

        None
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) -> Option<InputAction> {
        let can_send = self.state.can_submit() && !self.state.input_text.trim().is_empty();

        let button_color = if can_send {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(
            RichText::new("\u{27a4}").size(18.0).color(egui::Color32::WHITE),
        )
        .min_size(Vec2::splat(44.0))
        .rounding(self.theme.button_rounding)
        .fill(button_color);

        let response = ui.add_enabled(can_send, button);

        let action = if response.clicked() {
            self.state.take_input().map(InputAction::Submit)
        } else {
            None
        };

        response.on_hover_text("Send message (Enter)");
        action
    }
}
