use serde::Serialize;
use tk_core::entities::{Asset, AssetType, Project, Publish, PublishType, Task, TaskType};
use tk_core::enums::EntityKind;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ActivateArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ActivateResponse {
    kind: EntityKind,
    id: i64,
    active: bool,
}

/// Handle `tk activate` and `tk deactivate`.
pub async fn handle(
    args: &ActivateArgs,
    active: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let kind: EntityKind = args.kind.parse()?;
    let svc = &ctx.service;
    let id = args.id;
    match kind {
        EntityKind::Project => svc.set_active::<Project>(id, active).await?,
        EntityKind::AssetType => svc.set_active::<AssetType>(id, active).await?,
        EntityKind::TaskType => svc.set_active::<TaskType>(id, active).await?,
        EntityKind::PublishType => svc.set_active::<PublishType>(id, active).await?,
        EntityKind::Asset => svc.set_active::<Asset>(id, active).await?,
        EntityKind::Task => svc.set_active::<Task>(id, active).await?,
        EntityKind::Publish => svc.set_active::<Publish>(id, active).await?,
    }
    output(&ActivateResponse { kind, id, active }, flags.format)
}
