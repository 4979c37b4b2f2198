use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::AssetType { action } => commands::asset_type::handle(&action, ctx, flags).await,
        Commands::TaskType { action } => commands::task_type::handle(&action, ctx, flags).await,
        Commands::PublishType { action } => {
            commands::publish_type::handle(&action, ctx, flags).await
        }
        Commands::Asset { action } => commands::asset::handle(&action, ctx, flags).await,
        Commands::Task { action } => commands::task::handle(&action, ctx, flags).await,
        Commands::Publish { action } => commands::publish::handle(&action, ctx, flags).await,
        Commands::Activate(args) => commands::activate::handle(&args, true, ctx, flags).await,
        Commands::Deactivate(args) => commands::activate::handle(&args, false, ctx, flags).await,
    }
}
