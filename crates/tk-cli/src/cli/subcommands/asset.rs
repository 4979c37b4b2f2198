use clap::Subcommand;

/// Asset commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AssetCommands {
    /// List assets of a project.
    List {
        project: String,
        #[arg(long)]
        asset_type: Option<String>,
    },
    /// Create an asset (returns the existing one unless --strict).
    Create {
        project: String,
        asset_type: String,
        code: String,
        #[arg(long)]
        strict: bool,
    },
}
