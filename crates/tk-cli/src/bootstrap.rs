use anyhow::Context;
use tk_config::TkConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TkConfig> {
    let mut config = TkConfig::load_with_dotenv().context("failed to load tk configuration")?;

    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
        config.validate().context("invalid --db override")?;
    }

    tracing::debug!(database = %config.database.path, "configuration loaded");
    Ok(config)
}
