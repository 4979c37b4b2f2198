//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use tk_config::TkConfig;
use tk_core::enums::Release;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/tk/pipeline.db"

[publish]
max_attempts = 5
retry_base_delay_ms = 20
retry_max_delay_ms = 1000

[general]
default_release = "release"
"#,
        )?;

        let config: TkConfig = Figment::from(Serialized::defaults(TkConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/tk/pipeline.db");
        assert_eq!(config.publish.max_attempts, 5);
        assert_eq!(config.publish.retry_base_delay_ms, 20);
        assert_eq!(config.publish.retry_max_delay_ms, 1000);
        assert_eq!(config.general.default_release, Release::Release);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[publish]\nmax_attempts = 7\n")?;

        let config: TkConfig = Figment::from(Serialized::defaults(TkConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.publish.max_attempts, 7);
        assert_eq!(config.publish.retry_base_delay_ms, 10);
        assert_eq!(config.database.path, "tk.db");
        assert_eq!(config.general.default_release, Release::Work);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tk")?;
        jail.create_file(".tk/config.toml", "[database]\npath = \"local.db\"\n")?;

        let config = TkConfig::load().expect("config loads");
        assert_eq!(config.database.path, "local.db");
        Ok(())
    });
}

#[test]
fn invalid_values_are_reported() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tk")?;
        jail.create_file(".tk/config.toml", "[publish]\nmax_attempts = 0\n")?;

        let err = TkConfig::load().expect_err("zero attempts must be rejected");
        assert!(err.to_string().contains("publish.max_attempts"));
        Ok(())
    });
}
