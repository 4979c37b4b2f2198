//! General application configuration.

use serde::{Deserialize, Serialize};
use tk_core::enums::Release;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Release channel used by `tk publish next` when `--release` is omitted.
    #[serde(default)]
    pub default_release: Release,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_release, Release::Work);
    }
}
