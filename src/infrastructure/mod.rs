pub mod snapshot;

pub use snapshot::{DebouncedSaver, SnapshotStore};
