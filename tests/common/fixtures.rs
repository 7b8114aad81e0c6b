use std::path::PathBuf;

use projtrack::core::db::{NewSubtask, SubtaskStatus, TrackerDb};
use tempfile::TempDir;

pub fn projects_path(dir: &TempDir) -> PathBuf {
    dir.path().join("projects.csv")
}

pub fn credentials_path(dir: &TempDir) -> PathBuf {
    dir.path().join("user_credentials.json")
}

/// Opens a tracker on the given directory's standard file names.
pub async fn open_tracker(dir: &TempDir) -> TrackerDb {
    TrackerDb::open(projects_path(dir), credentials_path(dir))
        .await
        .expect("Failed to open test tracker")
}

/// Creates a fresh tracker on a temporary directory.
/// Returns both the tracker and the temp directory (which must be kept alive).
pub async fn create_test_tracker() -> (TrackerDb, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let db = open_tracker(&dir).await;
    (db, dir)
}

pub fn make_subtask(description: &str, progress: u8, status: SubtaskStatus) -> NewSubtask {
    NewSubtask {
        description: description.to_string(),
        progress,
        status,
    }
}
