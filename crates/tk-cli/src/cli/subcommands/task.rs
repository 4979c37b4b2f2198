use clap::Subcommand;

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks of an asset.
    List {
        project: String,
        asset_type: String,
        asset: String,
    },
    /// Create the task of a task type on an asset (idempotent).
    Create {
        project: String,
        asset_type: String,
        asset: String,
        task_type: String,
    },
}
