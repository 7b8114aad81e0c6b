pub mod core;

pub use crate::core::db::{
    ADMIN_USERNAME, CredentialRepository, NewSubtask, Project, ProjectRepository, ProjectStatus,
    Subtask, SubtaskStatus, TrackerDb,
};
