use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// List projects.
    List,
    /// Get a project by code.
    Get { code: String },
    /// Create a project (returns the existing one unless --strict).
    Create {
        code: String,
        name: String,
        #[arg(long)]
        strict: bool,
    },
    /// Set the production root path.
    SetRoot { code: String, path: String },
    /// Show project metadata.
    Metadata { code: String },
}
