pub mod channels;

pub use channels::{AudioChannels, SessionChannels};
