//! Persistence layer for the agency planner.
//!
//! The scheduler talks to three collaborators through async traits:
//! [`TaskStore`] for time blocks, [`LeaveDirectory`] for approved leave and
//! [`ProjectStore`] for projects and phases. Two backends implement all of
//! them: [`MemoryStore`] and the crash-safe JSON [`FileStore`].
//!
//! # Example
//!
//! ```no_run
//! use planner_persistence::{FileStore, ProjectStore};
//! use planner_models::Project;
//!
//! # async fn run() -> planner_persistence::Result<()> {
//! let store = FileStore::new("/home/user/.agency-planner");
//! let project = store.insert_project(Project::new("Lente campagne", "user-lead")).await?;
//! let loaded = store.load_project(&project.id)?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod error;
pub mod file_store;
pub mod memory;
pub mod traits;

pub use error::{PersistenceError, Result};
pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use traits::{LeaveDirectory, ProjectStore, TaskStore};
