use clap::Subcommand;

/// Publish type commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PublishTypeCommands {
    /// List publish types.
    List,
    /// Get a publish type by code.
    Get { code: String },
    /// Create a publish type (returns the existing one unless --strict).
    Create {
        code: String,
        file_type: String,
        extension: String,
        #[arg(long)]
        strict: bool,
    },
}
