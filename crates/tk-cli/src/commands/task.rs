use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tk task`.
pub async fn handle(action: &TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        TaskCommands::List {
            project,
            asset_type,
            asset,
        } => {
            let project = svc.get_project(project).await?;
            let asset_type = svc.get_asset_type(asset_type).await?;
            let asset = svc.get_asset(&project, &asset_type, asset).await?;
            output(&svc.list_tasks(&asset).await?, flags.format)
        }
        TaskCommands::Create {
            project,
            asset_type,
            asset,
            task_type,
        } => {
            let project = svc.get_project(project).await?;
            let asset_type = svc.get_asset_type(asset_type).await?;
            let asset = svc.get_asset(&project, &asset_type, asset).await?;
            let task_type = svc.get_task_type(task_type).await?;
            output(&svc.get_or_create_task(&asset, &task_type).await?, flags.format)
        }
    }
}
