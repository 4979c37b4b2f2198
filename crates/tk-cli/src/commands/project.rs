use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tk project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        ProjectCommands::List => output(&svc.list_projects().await?, flags.format),
        ProjectCommands::Get { code } => output(&svc.get_project(code).await?, flags.format),
        ProjectCommands::Create { code, name, strict } => {
            let project = if *strict {
                svc.create_project(code, name).await?
            } else {
                svc.get_or_create_project(code, name).await?
            };
            output(&project, flags.format)
        }
        ProjectCommands::SetRoot { code, path } => {
            let project = svc.get_project(code).await?;
            output(&svc.set_project_root(&project, path).await?, flags.format)
        }
        ProjectCommands::Metadata { code } => {
            let project = svc.get_project(code).await?;
            output(&svc.project_metadata(&project).await?, flags.format)
        }
    }
}
