//! Health-tracking sidebar
//!
//! Water and step counters, the medication reminder list, the appointment
//! request form, and the emergency contacts card. Each widget mutates only
//! its own tracker field; nothing here touches the conversation.

use crate::session::health::{
    AppointmentRequest, Frequency, HealthTracker, MedicationReminder, TimeOfDay, STEP_GOAL,
    WATER_GOAL_GLASSES,
};
use crate::ui::state::UiState;
use crate::ui::theme::Theme;
use egui::{self, ProgressBar, RichText};

const EMERGENCY_CONTACTS: &[(&str, &str)] = &[
    ("Emergency services", "911"),
    ("Poison control", "1-800-222-1222"),
    ("Crisis helpline", "988"),
];

/// Health sidebar component
pub struct HealthSidebar<'a> {
    tracker: &'a mut HealthTracker,
    state: &'a mut UiState,
    theme: &'a Theme,
}

impl<'a> HealthSidebar<'a> {
    pub fn new(tracker: &'a mut HealthTracker, state: &'a mut UiState, theme: &'a Theme) -> Self {
        Self {
            tracker,
            state,
            theme,
        }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing_sm);

                self.show_water_card(ui);
                ui.add_space(self.theme.spacing);

                self.show_steps_card(ui);
                ui.add_space(self.theme.spacing);

                self.show_medications_card(ui);
                ui.add_space(self.theme.spacing);

                self.show_appointment_card(ui);
                ui.add_space(self.theme.spacing);

                self.show_emergency_card(ui);
                ui.add_space(self.theme.spacing_sm);
            });
    }

    fn card<R>(
        theme: &Theme,
        ui: &mut egui::Ui,
        title: &str,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> R {
        egui::Frame::none()
            .fill(theme.bg_secondary)
            .rounding(theme.card_rounding)
            .inner_margin(theme.spacing_sm)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(title)
                        .size(14.0)
                        .strong()
                        .color(theme.text_primary),
                );
                ui.add_space(theme.spacing_sm);
                add_contents(ui)
            })
            .inner
    }

    fn show_water_card(&mut self, ui: &mut egui::Ui) {
        Self::card(self.theme, ui, "\u{1f4a7} Water intake", |ui| {
            ui.horizontal(|ui| {
                if ui.button(RichText::new("\u{2212}").size(16.0)).clicked() {
                    self.tracker.remove_water();
                }

                ui.label(
                    RichText::new(format!(
                        "{} / {} glasses",
                        self.tracker.water_glasses(),
                        WATER_GOAL_GLASSES
                    ))
                    .size(14.0)
                    .color(self.theme.text_secondary),
                );

                if ui.button(RichText::new("+").size(16.0)).clicked() {
                    self.tracker.add_water();
                }
            });

            ui.add(
                ProgressBar::new(self.tracker.water_progress())
                    .fill(self.theme.primary)
                    .desired_height(8.0),
            );
        });
    }

    fn show_steps_card(&mut self, ui: &mut egui::Ui) {
        Self::card(self.theme, ui, "\u{1f45f} Steps", |ui| {
            ui.label(
                RichText::new(format!("{} / {}", self.tracker.steps(), STEP_GOAL))
                    .size(14.0)
                    .color(self.theme.text_secondary),
            );

            ui.add(
                ProgressBar::new(self.tracker.step_progress())
                    .fill(self.theme.success)
                    .desired_height(8.0),
            );

            ui.horizontal(|ui| {
                if ui.button("+500").clicked() {
                    self.tracker.add_steps(500);
                }
                if ui.button("+1000").clicked() {
                    self.tracker.add_steps(1000);
                }
            });
        });
    }

    fn show_medications_card(&mut self, ui: &mut egui::Ui) {
        Self::card(self.theme, ui, "\u{1f48a} Medications", |ui| {
            let mut remove_index = None;

            for (index, medication) in self.tracker.medications().iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&medication.name)
                                .size(13.0)
                                .strong()
                                .color(self.theme.text_primary),
                        );
                        ui.label(
                            RichText::new(format!(
                                "{} \u{00b7} {}",
                                medication.time_of_day.as_str(),
                                medication.frequency.as_str()
                            ))
                            .size(11.0)
                            .color(self.theme.text_muted),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{2715}").clicked() {
                            remove_index = Some(index);
                        }
                    });
                });
                ui.separator();
            }

            if let Some(index) = remove_index {
                self.tracker.remove_medication(index);
            }

            ui.add(
                egui::TextEdit::singleline(&mut self.state.med_name_input)
                    .hint_text("Medication name"),
            );

            egui::ComboBox::from_id_salt("med_time")
                .selected_text(self.state.med_time_input.as_str())
                .show_ui(ui, |ui| {
                    for option in TimeOfDay::ALL {
                        ui.selectable_value(
                            &mut self.state.med_time_input,
                            option,
                            option.as_str(),
                        );
                    }
                });

            egui::ComboBox::from_id_salt("med_frequency")
                .selected_text(self.state.med_frequency_input.as_str())
                .show_ui(ui, |ui| {
                    for option in Frequency::ALL {
                        ui.selectable_value(
                            &mut self.state.med_frequency_input,
                            option,
                            option.as_str(),
                        );
                    }
                });

            let name = self.state.med_name_input.trim().to_string();
            if ui
                .add_enabled(!name.is_empty(), egui::Button::new("Add reminder"))
                .clicked()
            {
                self.tracker.add_medication(MedicationReminder {
                    name,
                    time_of_day: self.state.med_time_input,
                    frequency: self.state.med_frequency_input,
                });
                self.state.med_name_input.clear();
            }
        });
    }

    fn show_appointment_card(&mut self, ui: &mut egui::Ui) {
        Self::card(self.theme, ui, "\u{1f4c5} Request appointment", |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.state.appt_doctor_input)
                    .hint_text("Doctor"),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.state.appt_specialty_input)
                    .hint_text("Specialty"),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.state.appt_date_input)
                    .hint_text("Date (YYYY-MM-DD)"),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.state.appt_time_input)
                    .hint_text("Preferred time"),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.state.appt_reason_input)
                    .hint_text("Reason for visit"),
            );

            let complete = !self.state.appt_doctor_input.trim().is_empty()
                && !self.state.appt_date_input.trim().is_empty();

            if ui
                .add_enabled(complete, egui::Button::new("Submit request"))
                .clicked()
            {
                self.tracker.add_appointment(AppointmentRequest {
                    doctor: self.state.appt_doctor_input.trim().to_string(),
                    specialty: self.state.appt_specialty_input.trim().to_string(),
                    date: self.state.appt_date_input.trim().to_string(),
                    time_slot: self.state.appt_time_input.trim().to_string(),
                    reason: self.state.appt_reason_input.trim().to_string(),
                });

                self.state.appt_doctor_input.clear();
                self.state.appt_specialty_input.clear();
                self.state.appt_date_input.clear();
                self.state.appt_time_input.clear();
                self.state.appt_reason_input.clear();
            }

            if !self.tracker.appointments().is_empty() {
                ui.add_space(self.theme.spacing_sm);
                ui.label(
                    RichText::new(format!(
                        "{} request(s) submitted",
                        self.tracker.appointments().len()
                    ))
                    .size(11.0)
                    .color(self.theme.success),
                );
            }
        });
    }

    fn show_emergency_card(&self, ui: &mut egui::Ui) {
        Self::card(self.theme, ui, "\u{1f6a8} Emergency contacts", |ui| {
            for (label, number) in EMERGENCY_CONTACTS {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(*label)
                            .size(12.0)
                            .color(self.theme.text_secondary),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(*number)
                                .size(12.0)
                                .strong()
                                .color(self.theme.error),
                        );
                    });
                });
            }
        });
    }
}
