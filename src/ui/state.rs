//! UI-local state
//!
//! Everything here is presentation state: the stored conversation always
//! holds complete turns, and the typing animation only controls how much
//! of the newest assistant turn is shown.

use crate::session::health::{Frequency, TimeOfDay};
use crate::session::turn::Turn;
use uuid::Uuid;

/// Recording state for voice input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// Not recording
    Idle,
    /// Currently recording audio
    Recording,
    /// Recording stopped, transcription in flight
    Processing,
}

impl RecordingState {
    pub fn is_recording(&self) -> bool {
        matches!(self, RecordingState::Recording)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, RecordingState::Processing)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RecordingState::Idle)
    }
}

/// Word-by-word reveal of the newest assistant turn
///
/// Cosmetic only: it tracks how many whitespace-delimited tokens of the
/// stored (complete) turn content are visible, advancing on a fixed
/// inter-word delay.
#[derive(Debug, Clone, Default)]
pub struct TypingAnimation {
    turn_id: Option<Uuid>,
    total_words: usize,
    revealed_words: usize,
    last_reveal_time: f64,
}

impl TypingAnimation {
    /// Fixed delay between revealed words, in seconds
    pub const WORD_DELAY_SECS: f64 = 0.02;

    /// Begin animating the given turn at the current time
    pub fn start(&mut self, turn: &Turn, now: f64) {
        self.turn_id = Some(turn.id);
        self.total_words = turn.content.split_whitespace().count();
        self.revealed_words = 0;
        self.last_reveal_time = now;
    }

    /// Whether the animation is still revealing words
    pub fn is_active(&self) -> bool {
        self.turn_id.is_some() && self.revealed_words < self.total_words
    }

    /// Whether this animation targets the given turn
    pub fn applies_to(&self, turn_id: Uuid) -> bool {
        self.turn_id == Some(turn_id)
    }

    /// Advance the reveal based on elapsed time
    pub fn tick(&mut self, now: f64) {
        while self.is_active() && now - self.last_reveal_time >= Self::WORD_DELAY_SECS {
            self.revealed_words += 1;
            self.last_reveal_time += Self::WORD_DELAY_SECS;
        }
    }

    /// The currently visible portion of the turn's content
    ///
    /// Joins the first `revealed_words` whitespace tokens; the stored turn
    /// content is never modified.
    pub fn visible_text(&self, turn: &Turn) -> String {
        turn.content
            .split_whitespace()
            .take(self.revealed_words)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Stop animating and show everything
    pub fn finish(&mut self) {
        self.revealed_words = self.total_words;
    }

    /// Drop the animation entirely
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// UI-local application state
pub struct UiState {
    /// Current text input
    pub input_text: String,

    /// Recording state
    pub recording_state: RecordingState,

    /// Whether a generation request is in flight
    pub is_generating: bool,

    /// Typing reveal for the newest assistant turn
    pub typing: TypingAnimation,

    /// Last transcription message shown to the user
    pub last_transcription: Option<String>,

    /// Last error or status notice
    pub status: Option<String>,

    /// Medication form: name field
    pub med_name_input: String,
    /// Medication form: selected time of day
    pub med_time_input: TimeOfDay,
    /// Medication form: selected frequency
    pub med_frequency_input: Frequency,

    /// Appointment form fields
    pub appt_doctor_input: String,
    pub appt_specialty_input: String,
    pub appt_date_input: String,
    pub appt_time_input: String,
    pub appt_reason_input: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// Create a fresh UI state
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            recording_state: RecordingState::Idle,
            is_generating: false,
            typing: TypingAnimation::default(),
            last_transcription: None,
            status: None,
            med_name_input: String::new(),
            med_time_input: TimeOfDay::Morning,
            med_frequency_input: Frequency::Daily,
            appt_doctor_input: String::new(),
            appt_specialty_input: String::new(),
            appt_date_input: String::new(),
            appt_time_input: String::new(),
            appt_reason_input: String::new(),
        }
    }

    /// Take the trimmed input text, clearing the field
    ///
    /// Returns `None` if the input trims to empty.
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input_text.trim().to_string();
        self.input_text.clear();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Whether the UI should accept new input
    pub fn can_submit(&self) -> bool {
        !self.is_generating && self.recording_state.is_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::turn::Turn;

    #[test]
    fn test_typing_reveals_word_by_word() {
        let turn = Turn::assistant("one two three four");
        let mut typing = TypingAnimation::default();

        typing.start(&turn, 0.0);
        assert!(typing.is_active());
        assert_eq!(typing.visible_text(&turn), "");

        typing.tick(TypingAnimation::WORD_DELAY_SECS);
        assert_eq!(typing.visible_text(&turn), "one");

        typing.tick(TypingAnimation::WORD_DELAY_SECS * 3.0);
        assert_eq!(typing.visible_text(&turn), "one two three");

        typing.tick(TypingAnimation::WORD_DELAY_SECS * 10.0);
        assert_eq!(typing.visible_text(&turn), "one two three four");
        assert!(!typing.is_active());
    }

    #[test]
    fn test_typing_never_mutates_turn_content() {
        let turn = Turn::assistant("complete response text");
        let mut typing = TypingAnimation::default();

        typing.start(&turn, 0.0);
        typing.tick(TypingAnimation::WORD_DELAY_SECS);

        // The stored turn always holds the full text
        assert_eq!(turn.content, "complete response text");
    }

    #[test]
    fn test_typing_finish_shows_everything() {
        let turn = Turn::assistant("a b c");
        let mut typing = TypingAnimation::default();

        typing.start(&turn, 0.0);
        typing.finish();

        assert!(!typing.is_active());
        assert_eq!(typing.visible_text(&turn), "a b c");
    }

    #[test]
    fn test_typing_applies_to_started_turn_only() {
        let animated = Turn::assistant("animated");
        let other = Turn::assistant("other");
        let mut typing = TypingAnimation::default();

        typing.start(&animated, 0.0);
        assert!(typing.applies_to(animated.id));
        assert!(!typing.applies_to(other.id));
    }

    #[test]
    fn test_take_input_trims_and_clears() {
        let mut state = UiState::new();
        state.input_text = "  hello  ".to_string();

        assert_eq!(state.take_input(), Some("hello".to_string()));
        assert!(state.input_text.is_empty());

        state.input_text = "   ".to_string();
        assert_eq!(state.take_input(), None);
    }

    #[test]
    fn test_can_submit_gating() {
        let mut state = UiState::new();
        assert!(state.can_submit());

        state.is_generating = true;
        assert!(!state.can_submit());

        state.is_generating = false;
        state.recording_state = RecordingState::Recording;
        assert!(!state.can_submit());
    }
}
