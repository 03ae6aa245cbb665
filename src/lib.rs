//! Kanban-style ranking board for FRC alliance selection: an immutable board
//! snapshot with pure transforms, a drag-gesture state machine, single-card
//! inline editing, event roster import (TBA + Statbotics enrichment), and
//! debounced file persistence.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use app::BoardApp;
pub use config::Config;
pub use domain::{Board, BoardError, Card, CardMeta, CardPatch, CardSpec, Column};
pub use services::{DragEvent, DragSession, EditSession, ImportMode, ImportService};
