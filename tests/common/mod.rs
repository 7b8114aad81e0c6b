mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from projtrack for tests
pub use projtrack::core::db::{
    ADMIN_USERNAME, CredentialRepository, NewSubtask, Project, ProjectRepository, ProjectStatus,
    Subtask, SubtaskStatus, TrackerDb,
};
