use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaxonomyCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tk task-type`.
pub async fn handle(
    action: &TaxonomyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        TaxonomyCommands::List => output(&svc.list_task_types().await?, flags.format),
        TaxonomyCommands::Get { code } => output(&svc.get_task_type(code).await?, flags.format),
        TaxonomyCommands::Create { code, name, strict } => {
            let task_type = if *strict {
                svc.create_task_type(code, name).await?
            } else {
                svc.get_or_create_task_type(code, name).await?
            };
            output(&task_type, flags.format)
        }
    }
}
