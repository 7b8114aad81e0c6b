use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubtaskStatus {
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Not Started" => Ok(ProjectStatus::NotStarted),
            "In Progress" => Ok(ProjectStatus::InProgress),
            "Completed" => Ok(ProjectStatus::Completed),
            _ => Err(anyhow::anyhow!("Invalid project status: {}", value)),
        }
    }
}

impl SubtaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubtaskStatus::Planning => "Planning",
            SubtaskStatus::InProgress => "In Progress",
            SubtaskStatus::Done => "Done",
        }
    }
}

impl std::fmt::Display for SubtaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SubtaskStatus {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Planning" => Ok(SubtaskStatus::Planning),
            "In Progress" => Ok(SubtaskStatus::InProgress),
            "Done" => Ok(SubtaskStatus::Done),
            _ => Err(anyhow::anyhow!("Invalid subtask status: {}", value)),
        }
    }
}
