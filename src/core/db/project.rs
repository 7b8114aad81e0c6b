use serde::{Deserialize, Serialize};

use crate::core::db::model::{ProjectStatus, SubtaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subtask {
    pub member: String,
    pub description: String,
    pub progress: u8,
    pub status: SubtaskStatus,
    #[serde(skip)]
    pub(super) _guard: (),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub status: ProjectStatus,
    /// Derived from subtasks whenever at least one exists; otherwise the last
    /// explicitly stored value (0 at creation).
    pub progress: u8,
    pub members: Vec<String>,
    pub subtasks: Vec<Subtask>,
    pub(super) _guard: (),
}

#[derive(Debug, Clone)]
pub struct NewSubtask {
    pub description: String,
    pub progress: u8,
    pub status: SubtaskStatus,
}

impl Project {
    /// Recompute the aggregate progress as the rounded mean of all subtask
    /// progress values. Leaves the stored value untouched with zero subtasks.
    pub(super) fn recompute_progress(&mut self) {
        if self.subtasks.is_empty() {
            return;
        }
        let total: u32 = self.subtasks.iter().map(|s| u32::from(s.progress)).sum();
        self.progress = (f64::from(total) / self.subtasks.len() as f64).round() as u8;
    }
}

pub trait ProjectRepository {
    fn get_projects(&self) -> impl Future<Output = anyhow::Result<Vec<Project>>>;
    fn get_project(&self, name: &str) -> impl Future<Output = anyhow::Result<Option<Project>>>;
    /// All projects for the admin user, otherwise only projects whose member
    /// list contains the username.
    fn visible_projects(
        &self,
        username: &str,
    ) -> impl Future<Output = anyhow::Result<Vec<Project>>>;
    fn add_project(&self, name: &str) -> impl Future<Output = anyhow::Result<bool>>;
    fn set_status(
        &self,
        name: &str,
        status: ProjectStatus,
    ) -> impl Future<Output = anyhow::Result<bool>>;
    fn delete_project(&self, name: &str) -> impl Future<Output = anyhow::Result<bool>>;
    fn set_membership(
        &self,
        name: &str,
        username: &str,
        included: bool,
    ) -> impl Future<Output = anyhow::Result<bool>>;
    fn add_subtask(
        &self,
        project_name: &str,
        member: &str,
        subtask: NewSubtask,
    ) -> impl Future<Output = anyhow::Result<bool>>;
}
