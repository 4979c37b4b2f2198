use anyhow::Context;
use tk_config::TkConfig;
use tk_db::service::TkService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: TkService,
    pub config: TkConfig,
}

impl AppContext {
    /// Open the configured database.
    pub async fn init(config: TkConfig) -> anyhow::Result<Self> {
        if config.database.is_in_memory() {
            tracing::warn!("database is in memory; nothing will persist after this command");
        }
        let service = TkService::from_config(&config)
            .await
            .with_context(|| format!("failed to open database '{}'", config.database.path))?;
        Ok(Self { service, config })
    }
}
