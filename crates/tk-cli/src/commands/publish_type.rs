use crate::cli::GlobalFlags;
use crate::cli::subcommands::PublishTypeCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tk publish-type`.
pub async fn handle(
    action: &PublishTypeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        PublishTypeCommands::List => output(&svc.list_publish_types().await?, flags.format),
        PublishTypeCommands::Get { code } => {
            output(&svc.get_publish_type(code).await?, flags.format)
        }
        PublishTypeCommands::Create {
            code,
            file_type,
            extension,
            strict,
        } => {
            let publish_type = if *strict {
                svc.create_publish_type(code, file_type, extension).await?
            } else {
                svc.get_or_create_publish_type(code, file_type, extension)
                    .await?
            };
            output(&publish_type, flags.format)
        }
    }
}
