use clap::{Parser, Subcommand};
use std::path::PathBuf;

use projtrack::{
    ADMIN_USERNAME, CredentialRepository, NewSubtask, Project, ProjectRepository, ProjectStatus,
    SubtaskStatus, TrackerDb,
};

#[derive(Parser)]
#[command(name = "projtrack")]
#[command(about = "Multi-user project tracker backed by flat files")]
struct Cli {
    /// Path to the project table
    #[arg(long, value_name = "FILE", default_value = "projects.csv")]
    projects_file: PathBuf,

    /// Path to the credential map
    #[arg(long, value_name = "FILE", default_value = "user_credentials.json")]
    credentials_file: PathBuf,

    /// Username to act as
    #[arg(short, long)]
    user: String,

    /// Password for the acting user
    #[arg(short, long)]
    password: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the projects visible to the acting user
    Show,
    /// Add a new project (admin only)
    AddProject {
        name: String,
    },
    /// Update a project's status (admin only)
    SetStatus {
        name: String,
        /// One of: "Not Started", "In Progress", "Completed"
        status: String,
    },
    /// Delete a project (admin only)
    DeleteProject {
        name: String,
    },
    /// Assign a member to a project (admin only)
    Assign {
        project: String,
        member: String,
    },
    /// Remove a member from a project (admin only)
    Unassign {
        project: String,
        member: String,
    },
    /// Record a subtask on an assigned project
    AddTask {
        project: String,
        description: String,
        /// Completion percentage, 0-100
        #[arg(long, default_value_t = 0)]
        progress: u8,
        /// One of: "Planning", "In Progress", "Done"
        #[arg(long, default_value = "Planning")]
        status: String,
    },
    /// Set a password: your own, or anyone's as admin
    SetPassword {
        username: String,
        new_password: String,
    },
    /// List all known usernames (admin only)
    Users,
}

fn require_admin(user: &str) -> anyhow::Result<()> {
    if user != ADMIN_USERNAME {
        anyhow::bail!("Only the admin user may perform this action");
    }
    Ok(())
}

fn print_project(project: &Project) {
    println!("{} [{}] {}%", project.name, project.status, project.progress);
    if project.members.is_empty() {
        println!("  Members: None");
    } else {
        println!("  Members: {}", project.members.join(", "));
    }
    if project.subtasks.is_empty() {
        println!("  No subtasks yet.");
    } else {
        for (idx, task) in project.subtasks.iter().enumerate() {
            println!(
                "  {}. {}: {} - {}% ({})",
                idx + 1,
                task.member,
                task.description,
                task.progress,
                task.status
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if args.verbose {
        println!("Project file: {:?}", args.projects_file);
        println!("Credential file: {:?}", args.credentials_file);
    }

    let db = TrackerDb::open(&args.projects_file, &args.credentials_file).await?;

    if !db.authenticate(&args.user, &args.password).await? {
        anyhow::bail!("Invalid credentials");
    }

    match args.command {
        Command::Show => {
            let projects = db.visible_projects(&args.user).await?;
            println!("=== Project Dashboard ===");
            if projects.is_empty() {
                println!("No visible projects.");
            }
            for project in &projects {
                print_project(project);
            }
        }
        Command::AddProject { name } => {
            require_admin(&args.user)?;
            if db.add_project(&name).await? {
                println!("Project '{}' added!", name);
            } else {
                println!("Project '{}' not added: name is blank or already taken.", name);
            }
        }
        Command::SetStatus { name, status } => {
            require_admin(&args.user)?;
            let status = ProjectStatus::try_from(status.as_str())?;
            if db.set_status(&name, status).await? {
                println!("Status of '{}' updated to '{}'.", name, status);
            } else {
                println!("No project named '{}'.", name);
            }
        }
        Command::DeleteProject { name } => {
            require_admin(&args.user)?;
            if db.delete_project(&name).await? {
                println!("Project '{}' has been deleted.", name);
            } else {
                println!("No project named '{}'.", name);
            }
        }
        Command::Assign { project, member } => {
            require_admin(&args.user)?;
            if db.set_membership(&project, &member, true).await? {
                println!("'{}' assigned to '{}'.", member, project);
            } else {
                println!("No project named '{}'.", project);
            }
        }
        Command::Unassign { project, member } => {
            require_admin(&args.user)?;
            if db.set_membership(&project, &member, false).await? {
                println!("'{}' removed from '{}'.", member, project);
            } else {
                println!("No project named '{}'.", project);
            }
        }
        Command::AddTask {
            project,
            description,
            progress,
            status,
        } => {
            let status = SubtaskStatus::try_from(status.as_str())?;
            let subtask = NewSubtask {
                description,
                progress,
                status,
            };
            if db.add_subtask(&project, &args.user, subtask).await? {
                println!("Task added!");
                if let Some(project) = db.get_project(&project).await? {
                    println!("'{}' is now at {}%.", project.name, project.progress);
                }
            } else {
                println!(
                    "Task not added: check the project name, your assignment, and the description."
                );
            }
        }
        Command::SetPassword {
            username,
            new_password,
        } => {
            if args.user != ADMIN_USERNAME && args.user != username {
                anyhow::bail!("Only the admin user may change another user's password");
            }
            db.upsert_credential(&username, &new_password).await?;
            println!("Password updated successfully.");
        }
        Command::Users => {
            require_admin(&args.user)?;
            for username in db.get_usernames().await? {
                println!("{}", username);
            }
        }
    }

    Ok(())
}
