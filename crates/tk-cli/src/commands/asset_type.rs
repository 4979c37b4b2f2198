use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaxonomyCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tk asset-type`.
pub async fn handle(
    action: &TaxonomyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        TaxonomyCommands::List => output(&svc.list_asset_types().await?, flags.format),
        TaxonomyCommands::Get { code } => output(&svc.get_asset_type(code).await?, flags.format),
        TaxonomyCommands::Create { code, name, strict } => {
            let asset_type = if *strict {
                svc.create_asset_type(code, name).await?
            } else {
                svc.get_or_create_asset_type(code, name).await?
            };
            output(&asset_type, flags.format)
        }
    }
}
