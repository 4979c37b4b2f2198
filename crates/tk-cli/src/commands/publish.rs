use serde::Serialize;
use tk_core::entities::Publish;
use tk_core::enums::Release;
use tk_db::repos::publish::PublishFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PublishCommands;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::resolve;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PublishResponse {
    #[serde(flatten)]
    publish: Publish,
    version_name: String,
}

impl From<Publish> for PublishResponse {
    fn from(publish: Publish) -> Self {
        let version_name = publish.version_name();
        Self {
            publish,
            version_name,
        }
    }
}

/// Handle `tk publish`.
pub async fn handle(
    action: &PublishCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        PublishCommands::List {
            target,
            code,
            publish_type,
            release,
        } => {
            let task = resolve::task(target, ctx).await?;
            let publish_type_id = match publish_type {
                Some(code) => Some(svc.get_publish_type(code).await?.id),
                None => None,
            };
            let release = release
                .as_deref()
                .map(|raw| parse_enum::<Release>(raw, "release"))
                .transpose()?;
            let filter = PublishFilter {
                code: code.clone(),
                publish_type_id,
                release,
                active: None,
            };
            let publishes: Vec<PublishResponse> = svc
                .task_publishes(&task, &filter)
                .await?
                .into_iter()
                .map(PublishResponse::from)
                .collect();
            output(&publishes, flags.format)
        }
        PublishCommands::Next {
            target,
            code,
            publish_type,
            release,
        } => {
            let release = match release {
                Some(raw) => parse_enum::<Release>(raw, "release")?,
                None => ctx.config.general.default_release,
            };
            let task = resolve::task(target, ctx).await?;
            let publish = svc
                .create_next_publish(&task, code, publish_type, release)
                .await?;
            output(&PublishResponse::from(publish), flags.format)
        }
    }
}
