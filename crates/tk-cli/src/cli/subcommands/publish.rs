use clap::{Args, Subcommand};

/// Codes locating one task: `PROJECT ASSET_TYPE ASSET TASK_TYPE`.
#[derive(Clone, Debug, Args)]
pub struct TaskPath {
    pub project: String,
    pub asset_type: String,
    pub asset: String,
    pub task_type: String,
}

/// Publish commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PublishCommands {
    /// List publishes of a task.
    List {
        #[command(flatten)]
        target: TaskPath,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        publish_type: Option<String>,
        #[arg(long)]
        release: Option<String>,
    },
    /// Create the next version of a publish.
    Next {
        #[command(flatten)]
        target: TaskPath,
        code: String,
        publish_type: String,
        /// work or release (defaults to `general.default_release`)
        #[arg(long)]
        release: Option<String>,
    },
}
