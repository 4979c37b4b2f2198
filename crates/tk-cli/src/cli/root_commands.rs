use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AssetCommands, ProjectCommands, PublishCommands, PublishTypeCommands, TaskCommands,
    TaxonomyCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Asset type taxonomy.
    AssetType {
        #[command(subcommand)]
        action: TaxonomyCommands,
    },
    /// Task type taxonomy.
    TaskType {
        #[command(subcommand)]
        action: TaxonomyCommands,
    },
    /// Publish type taxonomy.
    PublishType {
        #[command(subcommand)]
        action: PublishTypeCommands,
    },
    /// Assets of a project.
    Asset {
        #[command(subcommand)]
        action: AssetCommands,
    },
    /// Tasks of an asset.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Versioned publishes of a task.
    Publish {
        #[command(subcommand)]
        action: PublishCommands,
    },
    /// Mark an entity active.
    Activate(ActivateArgs),
    /// Mark an entity inactive.
    Deactivate(ActivateArgs),
}

/// Arguments for `tk activate` / `tk deactivate`.
#[derive(Clone, Debug, Args)]
pub struct ActivateArgs {
    /// Entity kind: project, asset-type, task-type, publish-type, asset, task, publish
    pub kind: String,
    /// Numeric id of the entity.
    pub id: i64,
}
