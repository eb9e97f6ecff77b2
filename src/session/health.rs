//! Sidebar health-tracker state
//!
//! Independent per-session fields with no relationship to the conversation
//! log or to each other. Each field is mutated only by its own widget.

use serde::{Deserialize, Serialize};

/// Daily water-intake bound in glasses
pub const WATER_GOAL_GLASSES: u8 = 8;

/// Daily step target shown against the counter
pub const STEP_GOAL: u32 = 10_000;

/// When a medication should be taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Bedtime,
}

impl TimeOfDay {
    /// All options, in form display order
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Bedtime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Bedtime => "Bedtime",
        }
    }
}

/// How often a medication is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    TwiceDaily,
    Weekly,
    AsNeeded,
}

impl Frequency {
    /// All options, in form display order
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::TwiceDaily,
        Frequency::Weekly,
        Frequency::AsNeeded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::TwiceDaily => "Twice daily",
            Frequency::Weekly => "Weekly",
            Frequency::AsNeeded => "As needed",
        }
    }
}

/// A single medication reminder entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationReminder {
    pub name: String,
    pub time_of_day: TimeOfDay,
    pub frequency: Frequency,
}

/// An appointment request captured from the sidebar form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub doctor: String,
    pub specialty: String,
    pub date: String,
    pub time_slot: String,
    pub reason: String,
}

/// Per-session health-tracking state
#[derive(Debug, Clone, Default)]
pub struct HealthTracker {
    water_glasses: u8,
    steps: u32,
    medications: Vec<MedicationReminder>,
    appointments: Vec<AppointmentRequest>,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Glasses of water logged today
    pub fn water_glasses(&self) -> u8 {
        self.water_glasses
    }

    /// Log one glass of water, saturating at the daily bound
    pub fn add_water(&mut self) {
        if self.water_glasses < WATER_GOAL_GLASSES {
            self.water_glasses += 1;
        }
    }

    /// Remove one logged glass, saturating at zero
    pub fn remove_water(&mut self) {
        self.water_glasses = self.water_glasses.saturating_sub(1);
    }

    /// Water progress as a fraction of the daily bound
    pub fn water_progress(&self) -> f32 {
        self.water_glasses as f32 / WATER_GOAL_GLASSES as f32
    }

    /// Steps logged today
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Add steps; unbounded above
    pub fn add_steps(&mut self, count: u32) {
        self.steps = self.steps.saturating_add(count);
    }

    /// Step progress against the target, clamped to 1.0 for display
    pub fn step_progress(&self) -> f32 {
        (self.steps as f32 / STEP_GOAL as f32).min(1.0)
    }

    /// Current medication reminders
    pub fn medications(&self) -> &[MedicationReminder] {
        &self.medications
    }

    /// Add a medication reminder
    pub fn add_medication(&mut self, reminder: MedicationReminder) {
        self.medications.push(reminder);
    }

    /// Remove a medication reminder by index; out-of-range is ignored
    pub fn remove_medication(&mut self, index: usize) {
        if index < self.medications.len() {
            self.medications.remove(index);
        }
    }

    /// Current appointment requests
    pub fn appointments(&self) -> &[AppointmentRequest] {
        &self.appointments
    }

    /// Record an appointment request
    pub fn add_appointment(&mut self, request: AppointmentRequest) {
        self.appointments.push(request);
    }

    /// Reset every tracker to its initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_clamps_at_goal() {
        let mut tracker = HealthTracker::new();

        for _ in 0..9 {
            tracker.add_water();
        }

        assert_eq!(tracker.water_glasses(), WATER_GOAL_GLASSES);
        assert_eq!(tracker.water_progress(), 1.0);
    }

    #[test]
    fn test_water_saturates_at_zero() {
        let mut tracker = HealthTracker::new();
        tracker.remove_water();
        assert_eq!(tracker.water_glasses(), 0);

        tracker.add_water();
        tracker.remove_water();
        tracker.remove_water();
        assert_eq!(tracker.water_glasses(), 0);
    }

    #[test]
    fn test_steps_are_unbounded_above() {
        let mut tracker = HealthTracker::new();
        tracker.add_steps(15_000);

        assert_eq!(tracker.steps(), 15_000);
        // Display progress caps at the target
        assert_eq!(tracker.step_progress(), 1.0);
    }

    #[test]
    fn test_step_progress_below_goal() {
        let mut tracker = HealthTracker::new();
        tracker.add_steps(2_500);
        assert!((tracker.step_progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_medication_add_remove() {
        let mut tracker = HealthTracker::new();

        tracker.add_medication(MedicationReminder {
            name: "Vitamin D".to_string(),
            time_of_day: TimeOfDay::Morning,
            frequency: Frequency::Daily,
        });
        tracker.add_medication(MedicationReminder {
            name: "Ibuprofen".to_string(),
            time_of_day: TimeOfDay::Evening,
            frequency: Frequency::AsNeeded,
        });
        assert_eq!(tracker.medications().len(), 2);

        tracker.remove_medication(0);
        assert_eq!(tracker.medications().len(), 1);
        assert_eq!(tracker.medications()[0].name, "Ibuprofen");

        // Out-of-range removal is ignored
        tracker.remove_medication(5);
        assert_eq!(tracker.medications().len(), 1);
    }

    #[test]
    fn test_appointment_recording() {
        let mut tracker = HealthTracker::new();
        tracker.add_appointment(AppointmentRequest {
            doctor: "Dr. Mehta".to_string(),
            specialty: "General Medicine".to_string(),
            date: "2025-03-12".to_string(),
            time_slot: "Morning".to_string(),
            reason: "Annual checkup".to_string(),
        });

        assert_eq!(tracker.appointments().len(), 1);
        assert_eq!(tracker.appointments()[0].doctor, "Dr. Mehta");
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut tracker = HealthTracker::new();
        tracker.add_water();
        tracker.add_steps(100);
        tracker.add_medication(MedicationReminder {
            name: "Aspirin".to_string(),
            time_of_day: TimeOfDay::Bedtime,
            frequency: Frequency::Weekly,
        });

        tracker.reset();

        assert_eq!(tracker.water_glasses(), 0);
        assert_eq!(tracker.steps(), 0);
        assert!(tracker.medications().is_empty());
        assert!(tracker.appointments().is_empty());
    }

    #[test]
    fn test_trackers_are_independent() {
        let mut tracker = HealthTracker::new();
        tracker.add_water();
        assert_eq!(tracker.steps(), 0);
        assert!(tracker.medications().is_empty());
    }
}
