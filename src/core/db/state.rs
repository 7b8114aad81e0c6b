use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tokio::{fs as async_fs, sync::RwLock};

use crate::core::db::{
    credential::{ADMIN_SEED_PASSWORD, ADMIN_USERNAME},
    model::ProjectStatus,
    project::{Project, Subtask},
};

const PROJECT_HEADER: [&str; 5] = ["Project", "Status", "Progress (%)", "Team Members", "Subtasks"];
const MEMBER_SEPARATOR: &str = ", ";

/// Shared state behind [`super::TrackerDb`]: both backing files plus the fully
/// loaded in-memory collections. Every mutation rewrites the owning file
/// wholesale; there is no partial or append persistence.
pub(super) struct TrackerState {
    projects_file: PathBuf,
    credentials_file: PathBuf,
    pub(super) projects: RwLock<Vec<Project>>,
    pub(super) credentials: RwLock<BTreeMap<String, String>>,
}

impl std::fmt::Debug for TrackerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerState")
            .field("projects_file", &self.projects_file)
            .field("credentials_file", &self.credentials_file)
            .finish()
    }
}

impl TrackerState {
    pub(super) async fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        projects_file: P,
        credentials_file: Q,
    ) -> anyhow::Result<Self> {
        let projects_file = projects_file.as_ref().to_path_buf();
        let credentials_file = credentials_file.as_ref().to_path_buf();

        // Missing files self-heal with seeded defaults; files that exist but
        // fail to parse are a fatal open error.
        let credentials = if credentials_file.is_file() {
            let raw = async_fs::read_to_string(&credentials_file)
                .await
                .with_context(|| {
                    format!("Failed to read credential file {:?}", credentials_file)
                })?;
            serde_json::from_str(&raw).with_context(|| {
                format!(
                    "Credential file {:?} is not a valid username/password map",
                    credentials_file
                )
            })?
        } else {
            let mut seeded = BTreeMap::new();
            seeded.insert(ADMIN_USERNAME.to_string(), ADMIN_SEED_PASSWORD.to_string());
            write_credentials(&credentials_file, &seeded).await?;
            seeded
        };

        let projects = if projects_file.is_file() {
            let raw = async_fs::read_to_string(&projects_file)
                .await
                .with_context(|| format!("Failed to read project file {:?}", projects_file))?;
            parse_projects(&raw)
                .with_context(|| format!("Failed to parse project file {:?}", projects_file))?
        } else {
            let empty: Vec<Project> = Vec::new();
            write_projects(&projects_file, &empty).await?;
            empty
        };

        Ok(Self {
            projects_file,
            credentials_file,
            projects: RwLock::new(projects),
            credentials: RwLock::new(credentials),
        })
    }

    /// Full rewrite of the project file from the given in-memory collection.
    pub(super) async fn save_projects(&self, projects: &[Project]) -> anyhow::Result<()> {
        write_projects(&self.projects_file, projects).await
    }

    /// Full rewrite of the credential file from the given in-memory mapping.
    pub(super) async fn save_credentials(
        &self,
        credentials: &BTreeMap<String, String>,
    ) -> anyhow::Result<()> {
        write_credentials(&self.credentials_file, credentials).await
    }
}

async fn write_credentials(
    path: &Path,
    credentials: &BTreeMap<String, String>,
) -> anyhow::Result<()> {
    let raw = serde_json::to_vec(credentials)?;
    async_fs::write(path, raw)
        .await
        .with_context(|| format!("Failed to write credential file {:?}", path))?;
    Ok(())
}

async fn write_projects(path: &Path, projects: &[Project]) -> anyhow::Result<()> {
    let raw = serialize_projects(projects)?;
    async_fs::write(path, raw)
        .await
        .with_context(|| format!("Failed to write project file {:?}", path))?;
    Ok(())
}

fn serialize_projects(projects: &[Project]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PROJECT_HEADER)?;
    for project in projects {
        let progress = project.progress.to_string();
        let members = join_members(&project.members);
        let subtasks = serde_json::to_string(&project.subtasks)?;
        writer.write_record([
            project.name.as_str(),
            project.status.as_str(),
            progress.as_str(),
            members.as_str(),
            subtasks.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush project rows: {}", e.error()))
}

fn parse_projects(raw: &str) -> anyhow::Result<Vec<Project>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(raw.as_bytes());
    let mut projects = Vec::new();
    for record in reader.records() {
        let record = record.context("Malformed project row")?;
        projects.push(project_from_record(&record)?);
    }
    Ok(projects)
}

/// Convert one raw row into a typed record, defaulting missing trailing
/// fields (older files were written without the member and subtask columns).
fn project_from_record(record: &csv::StringRecord) -> anyhow::Result<Project> {
    let name = record.get(0).unwrap_or("").to_string();
    let status = match record.get(1) {
        Some(value) if !value.is_empty() => ProjectStatus::try_from(value)?,
        _ => ProjectStatus::NotStarted,
    };
    let progress = match record.get(2) {
        Some(value) if !value.is_empty() => value
            .parse::<u8>()
            .with_context(|| format!("Invalid progress value for project '{}'", name))?,
        _ => 0,
    };
    let members = split_members(record.get(3).unwrap_or(""));
    let subtasks: Vec<Subtask> = match record.get(4) {
        Some(value) if !value.is_empty() => serde_json::from_str(value)
            .with_context(|| format!("Invalid subtask list for project '{}'", name))?,
        _ => Vec::new(),
    };
    Ok(Project {
        name,
        status,
        progress,
        members,
        subtasks,
        _guard: (),
    })
}

fn join_members(members: &[String]) -> String {
    members.join(MEMBER_SEPARATOR)
}

fn split_members(raw: &str) -> Vec<String> {
    let mut members = Vec::new();
    for member in raw.split(MEMBER_SEPARATOR) {
        if !member.is_empty() && !members.iter().any(|m| m == member) {
            members.push(member.to_string());
        }
    }
    members
}
