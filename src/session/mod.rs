//! Per-session conversation and health-tracking state
//!
//! All state lives in an explicit session object rather than process-wide
//! globals, so independent sessions can coexist and tests stay
//! deterministic:
//!
//! - **turn**: Role-tagged, immutable conversation turns
//! - **log**: The append-only [`ChatSession`] turn log and its composite
//!   `process_user_query` operation
//! - **health**: Sidebar tracker state (water, steps, medications,
//!   appointments), each field mutated only by its own widget
//!
//! Nothing here persists: the session vanishes when the app exits.

pub mod health;
pub mod log;
pub mod turn;

pub use health::{
    AppointmentRequest, Frequency, HealthTracker, MedicationReminder, TimeOfDay, STEP_GOAL,
    WATER_GOAL_GLASSES,
};
pub use log::{ChatSession, GREETING};
pub use turn::{Role, Turn};
