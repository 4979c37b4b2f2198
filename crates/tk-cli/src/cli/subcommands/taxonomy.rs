use clap::Subcommand;

/// Asset type and task type commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaxonomyCommands {
    /// List entries.
    List,
    /// Get an entry by code.
    Get { code: String },
    /// Create an entry (returns the existing one unless --strict).
    Create {
        code: String,
        name: String,
        #[arg(long)]
        strict: bool,
    },
}
