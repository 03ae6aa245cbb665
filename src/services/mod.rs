pub mod analytics;
pub mod drag;
pub mod edit;
pub mod import_service;
pub mod statbotics;
pub mod tba;

pub use drag::{DragEvent, DragSession};
pub use edit::EditSession;
pub use import_service::{merge_teams, ImportMode, ImportOutcome, ImportService};
pub use statbotics::StatboticsClient;
pub use tba::{normalize_event_key, TbaClient};
