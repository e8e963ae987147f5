//! Persistence for projects and challenge progress over a key/value backend.

pub mod progress;
pub mod project;
pub mod store;

pub use progress::{PROGRESS_KEY, Progress, ProgressTracker};
pub use project::{PROJECTS_KEY, Project, ProjectStore};
pub use store::{FileStore, KeyValueStore, MemoryStore};
