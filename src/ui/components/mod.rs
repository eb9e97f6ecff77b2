pub mod chat_panel;
pub mod input_bar;
pub mod sidebar;

pub use chat_panel::ChatPanel;
pub use input_bar::{InputAction, InputBar};
pub use sidebar::HealthSidebar;
