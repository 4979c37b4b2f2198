use tk_core::entities::Task;

use crate::cli::subcommands::TaskPath;
use crate::context::AppContext;

/// Resolve the task named by a `PROJECT ASSET_TYPE ASSET TASK_TYPE` path.
pub async fn task(target: &TaskPath, ctx: &AppContext) -> anyhow::Result<Task> {
    let task = ctx
        .service
        .resolve_task(
            &target.project,
            &target.asset_type,
            &target.asset,
            &target.task_type,
        )
        .await?;
    Ok(task)
}
