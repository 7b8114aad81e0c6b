mod credential;
mod model;
mod project;
mod state;

use std::{path::Path, sync::Arc};

pub use credential::{ADMIN_USERNAME, CredentialRepository};
pub use model::{ProjectStatus, SubtaskStatus};
pub use project::{NewSubtask, Project, ProjectRepository, Subtask};

use state::TrackerState;

/// Handle to the two flat-file stores. Constructed once per process and passed
/// by reference to every handler; all reads and mutations go through the
/// repository traits.
#[derive(Debug)]
pub struct TrackerDb {
    state: Arc<TrackerState>,
}

impl TrackerDb {
    /// Open both stores, seeding missing files with defaults (an admin
    /// credential, a header-only project table). Fails if either file exists
    /// but cannot be parsed.
    pub async fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        projects_file: P,
        credentials_file: Q,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(TrackerState::new(projects_file, credentials_file).await?),
        })
    }
}

impl CredentialRepository for TrackerDb {
    async fn authenticate(&self, username: &str, password: &str) -> anyhow::Result<bool> {
        let credentials = self.state.credentials.read().await;
        Ok(credentials
            .get(username)
            .is_some_and(|stored| stored == password))
    }

    async fn upsert_credential(&self, username: &str, password: &str) -> anyhow::Result<()> {
        let mut credentials = self.state.credentials.write().await;
        credentials.insert(username.to_string(), password.to_string());
        self.state.save_credentials(&credentials).await
    }

    async fn get_usernames(&self) -> anyhow::Result<Vec<String>> {
        let credentials = self.state.credentials.read().await;
        Ok(credentials.keys().cloned().collect())
    }
}

impl ProjectRepository for TrackerDb {
    async fn get_projects(&self) -> anyhow::Result<Vec<Project>> {
        Ok(self.state.projects.read().await.clone())
    }

    async fn get_project(&self, name: &str) -> anyhow::Result<Option<Project>> {
        let projects = self.state.projects.read().await;
        Ok(projects.iter().find(|p| p.name == name).cloned())
    }

    async fn visible_projects(&self, username: &str) -> anyhow::Result<Vec<Project>> {
        let projects = self.state.projects.read().await;
        if username == ADMIN_USERNAME {
            return Ok(projects.clone());
        }
        Ok(projects
            .iter()
            .filter(|p| p.members.iter().any(|m| m == username))
            .cloned()
            .collect())
    }

    async fn add_project(&self, name: &str) -> anyhow::Result<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        let mut projects = self.state.projects.write().await;
        if projects.iter().any(|p| p.name == name) {
            return Ok(false);
        }
        projects.push(Project {
            name: name.to_string(),
            status: ProjectStatus::NotStarted,
            progress: 0,
            members: Vec::new(),
            subtasks: Vec::new(),
            _guard: (),
        });
        self.state.save_projects(&projects).await?;
        Ok(true)
    }

    async fn set_status(&self, name: &str, status: ProjectStatus) -> anyhow::Result<bool> {
        let mut projects = self.state.projects.write().await;
        let Some(project) = projects.iter_mut().find(|p| p.name == name) else {
            return Ok(false);
        };
        project.status = status;
        self.state.save_projects(&projects).await?;
        Ok(true)
    }

    async fn delete_project(&self, name: &str) -> anyhow::Result<bool> {
        let mut projects = self.state.projects.write().await;
        let before = projects.len();
        projects.retain(|p| p.name != name);
        if projects.len() == before {
            return Ok(false);
        }
        self.state.save_projects(&projects).await?;
        Ok(true)
    }

    async fn set_membership(
        &self,
        name: &str,
        username: &str,
        included: bool,
    ) -> anyhow::Result<bool> {
        let mut projects = self.state.projects.write().await;
        let Some(project) = projects.iter_mut().find(|p| p.name == name) else {
            return Ok(false);
        };
        if included {
            if !project.members.iter().any(|m| m == username) {
                project.members.push(username.to_string());
            }
        } else {
            project.members.retain(|m| m != username);
        }
        self.state.save_projects(&projects).await?;
        Ok(true)
    }

    async fn add_subtask(
        &self,
        project_name: &str,
        member: &str,
        subtask: NewSubtask,
    ) -> anyhow::Result<bool> {
        if subtask.description.trim().is_empty() {
            return Ok(false);
        }
        let mut projects = self.state.projects.write().await;
        let Some(project) = projects.iter_mut().find(|p| p.name == project_name) else {
            return Ok(false);
        };
        // Only the admin or an assigned member may record progress.
        if member != ADMIN_USERNAME && !project.members.iter().any(|m| m == member) {
            return Ok(false);
        }
        project.subtasks.push(Subtask {
            member: member.to_string(),
            description: subtask.description,
            progress: subtask.progress.min(100),
            status: subtask.status,
            _guard: (),
        });
        project.recompute_progress();
        self.state.save_projects(&projects).await?;
        Ok(true)
    }
}
