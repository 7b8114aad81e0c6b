//! Integration tests for project CRUD operations.
//!
//! Tests cover:
//! - Adding projects and listing them in append order
//! - Rejection of blank and duplicate project names
//! - Status updates
//! - Deletion, including the no-op path

mod common;

use common::*;

#[tokio::test]
async fn test_add_and_list_projects() -> anyhow::Result<()> {
    let (db, _dir) = create_test_tracker().await;

    assert!(db.add_project("Alpha").await?);
    assert!(db.add_project("Beta").await?);
    assert!(db.add_project("Gamma").await?);

    let projects = db.get_projects().await?;
    assert_eq!(projects.len(), 3);
    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta", "Gamma"], "append order preserved");

    for project in &projects {
        assert_eq!(project.status, ProjectStatus::NotStarted);
        assert_eq!(project.progress, 0);
        assert!(project.members.is_empty());
        assert!(project.subtasks.is_empty());
    }

    Ok(())
}

#[tokio::test]
async fn test_blank_project_name_rejected() -> anyhow::Result<()> {
    let (db, _dir) = create_test_tracker().await;

    assert!(!db.add_project("").await?);
    assert!(!db.add_project("   ").await?);

    assert!(db.get_projects().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_duplicate_project_name_rejected() -> anyhow::Result<()> {
    let (db, _dir) = create_test_tracker().await;

    assert!(db.add_project("Website").await?);
    assert!(!db.add_project("Website").await?, "duplicate must be a no-op");

    let projects = db.get_projects().await?;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Website");

    Ok(())
}

#[tokio::test]
async fn test_set_status() -> anyhow::Result<()> {
    let (db, _dir) = create_test_tracker().await;
    db.add_project("Website").await?;

    assert!(db.set_status("Website", ProjectStatus::InProgress).await?);
    let project = db.get_project("Website").await?.expect("project exists");
    assert_eq!(project.status, ProjectStatus::InProgress);

    // Unknown name is a no-op
    assert!(!db.set_status("Nope", ProjectStatus::Completed).await?);

    Ok(())
}

#[tokio::test]
async fn test_delete_project() -> anyhow::Result<()> {
    let (db, _dir) = create_test_tracker().await;
    db.add_project("Keep").await?;
    db.add_project("Drop").await?;

    assert!(db.delete_project("Drop").await?);

    let projects = db.get_projects().await?;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Keep");

    assert!(!db.delete_project("Drop").await?, "second delete is a no-op");

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_project_leaves_file_unchanged() -> anyhow::Result<()> {
    let (db, dir) = create_test_tracker().await;
    db.add_project("Website").await?;
    db.set_membership("Website", "alice", true).await?;

    let before = std::fs::read(projects_path(&dir))?;
    assert!(!db.delete_project("Ghost").await?);
    let after = std::fs::read(projects_path(&dir))?;

    assert_eq!(before, after, "no-op delete must not rewrite the store");

    Ok(())
}
