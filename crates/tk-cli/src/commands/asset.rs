use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssetCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tk asset`.
pub async fn handle(action: &AssetCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        AssetCommands::List {
            project,
            asset_type,
        } => {
            let project = svc.get_project(project).await?;
            let asset_type = match asset_type {
                Some(code) => Some(svc.get_asset_type(code).await?),
                None => None,
            };
            let assets = svc.list_assets(&project, asset_type.as_ref()).await?;
            output(&assets, flags.format)
        }
        AssetCommands::Create {
            project,
            asset_type,
            code,
            strict,
        } => {
            let project = svc.get_project(project).await?;
            let asset_type = svc.get_asset_type(asset_type).await?;
            let asset = if *strict {
                svc.create_asset(&project, &asset_type, code).await?
            } else {
                svc.get_or_create_asset(&project, &asset_type, code).await?
            };
            output(&asset, flags.format)
        }
    }
}
