use figment::Jail;
use tk_config::TkConfig;
use tk_core::enums::Release;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("TK_DATABASE__PATH", ":memory:");
        jail.set_env("TK_PUBLISH__MAX_ATTEMPTS", "4");
        jail.set_env("TK_GENERAL__DEFAULT_RELEASE", "release");

        let config = TkConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        assert_eq!(config.publish.max_attempts, 4);
        assert_eq!(config.general.default_release, Release::Release);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tk")?;
        jail.create_file(".tk/config.toml", "[database]\npath = \"from_toml.db\"\n")?;
        jail.set_env("TK_DATABASE__PATH", "from_env.db");

        let config = TkConfig::load().expect("config loads");
        assert_eq!(config.database.path, "from_env.db");
        Ok(())
    });
}
