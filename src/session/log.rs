//! Append-only conversation log
//!
//! The session owns the turn log for the lifetime of one user session and
//! hosts the composite `process_user_query` operation that ties user input
//! to generated responses.

use crate::llm::generator::ResponseGenerator;
use crate::session::turn::Turn;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed greeting seeded as the first assistant turn of every session
pub const GREETING: &str =
    "Hello! I'm MediAssist AI, your healthcare assistant. How can I help you today?";

/// Thread-safe, append-only conversation session
///
/// Cloning is cheap and clones share the same log, so the UI can read
/// while a worker appends.
#[derive(Debug, Clone)]
pub struct ChatSession {
    turns: Arc<RwLock<Vec<Turn>>>,
}

impl ChatSession {
    /// Create a session seeded with the fixed greeting
    pub fn new() -> Self {
        Self {
            turns: Arc::new(RwLock::new(vec![Turn::assistant(GREETING)])),
        }
    }

    /// Append a user turn
    pub fn add_user_turn(&self, content: impl Into<String>) {
        self.turns.write().push(Turn::user(content));
    }

    /// Append an assistant turn
    pub fn add_assistant_turn(&self, content: impl Into<String>) {
        self.turns.write().push(Turn::assistant(content));
    }

    /// Get a snapshot of all turns in display order
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.read().clone()
    }

    /// Get the most recent turn
    pub fn last_turn(&self) -> Option<Turn> {
        self.turns.read().last().cloned()
    }

    /// Number of turns in the log
    pub fn len(&self) -> usize {
        self.turns.read().len()
    }

    /// A session always contains at least the seeded greeting
    pub fn is_empty(&self) -> bool {
        self.turns.read().is_empty()
    }

    /// Reset the log to the initial seeded state
    pub fn clear(&self) {
        let mut turns = self.turns.write();
        turns.clear();
        turns.push(Turn::assistant(GREETING));
    }

    /// Process one submitted user input
    ///
    /// No-op for input that trims to empty. Otherwise appends the user
    /// turn, invokes the generator synchronously, and appends the result
    /// as the assistant turn. A generation failure is formatted into a
    /// user-facing message and stored like any other answer, so the log
    /// keeps exactly what the user saw.
    ///
    /// Returns the appended assistant content, or `None` for empty input.
    pub fn process_user_query(
        &self,
        input: &str,
        generator: &dyn ResponseGenerator,
    ) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        self.add_user_turn(input);
        debug!("Processing user query: {} chars", input.len());

        let content = match generator.generate(input) {
            Ok(response) => response,
            Err(e) => {
                warn!("Generation failed: {}", e);
                format!("Sorry, an error occurred: {}", e)
            }
        };

        self.add_assistant_turn(content.clone());
        Some(content)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::GenerationError;
    use crate::session::turn::Role;

    struct StubGenerator {
        response: std::result::Result<String, GenerationError>,
    }

    impl StubGenerator {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(GenerationError::Network("connection refused".to_string())),
            }
        }
    }

    impl ResponseGenerator for StubGenerator {
        fn generate(&self, _input: &str) -> std::result::Result<String, GenerationError> {
            self.response.clone()
        }
    }

    #[test]
    fn test_session_starts_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.len(), 1);

        let turns = session.turns();
        assert_eq!(turns[0].role, Role::Assistant);
        assert_eq!(turns[0].content, GREETING);
    }

    #[test]
    fn test_query_appends_user_then_assistant() {
        let session = ChatSession::new();
        let generator = StubGenerator::ok("Rest and drink fluids.");

        let response = session.process_user_query("I have a cold", &generator);
        assert_eq!(response, Some("Rest and drink fluids.".to_string()));

        let turns = session.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].role, Role::User);
        assert_eq!(turns[1].content, "I have a cold");
        assert_eq!(turns[2].role, Role::Assistant);
        assert_eq!(turns[2].content, "Rest and drink fluids.");
    }

    #[test]
    fn test_empty_query_is_a_no_op() {
        let session = ChatSession::new();
        let generator = StubGenerator::ok("unused");

        assert_eq!(session.process_user_query("", &generator), None);
        assert_eq!(session.process_user_query("   \n\t", &generator), None);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_generation_failure_is_stored_as_assistant_turn() {
        let session = ChatSession::new();
        let generator = StubGenerator::failing();

        let response = session.process_user_query("hello", &generator).unwrap();
        assert!(response.contains("Sorry, an error occurred"));

        let turns = session.turns();
        assert_eq!(turns.len(), 3);
        assert!(turns[2].is_assistant());
        assert!(turns[2].content.contains("error"));
    }

    #[test]
    fn test_clear_restores_seeded_state() {
        let session = ChatSession::new();
        let generator = StubGenerator::ok("answer");

        session.process_user_query("question one", &generator);
        session.process_user_query("question two", &generator);
        assert_eq!(session.len(), 5);

        session.clear();
        assert_eq!(session.len(), 1);

        let turns = session.turns();
        assert!(turns[0].is_assistant());
        assert_eq!(turns[0].content, GREETING);
    }

    #[test]
    fn test_clones_share_the_log() {
        let session = ChatSession::new();
        let view = session.clone();

        session.add_user_turn("shared");
        assert_eq!(view.len(), 2);
        assert_eq!(view.last_turn().unwrap().content, "shared");
    }

    #[test]
    fn test_input_is_trimmed_before_storage() {
        let session = ChatSession::new();
        let generator = StubGenerator::ok("ok");

        session.process_user_query("  what is BMI  ", &generator);
        assert_eq!(session.turns()[1].content, "what is BMI");
    }
}
