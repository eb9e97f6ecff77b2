//! egui user interface for MediAssist
//!
//! The UI reads the shared session each frame and drives the workers
//! through the orchestrator handle. All widget state (typing animation,
//! form fields, recording state) lives in [`state::UiState`]; the stored
//! conversation is never touched by presentation effects.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::MediAssistApp;
pub use state::{RecordingState, TypingAnimation, UiState};
pub use theme::Theme;
