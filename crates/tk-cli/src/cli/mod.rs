use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tk` binary.
#[derive(Debug, Parser)]
#[command(name = "tk", version, about = "tk - pipeline entity store and publish versioning")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides `database.path` from configuration)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{PublishCommands, TaxonomyCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "tk",
            "--format",
            "raw",
            "--db",
            "/tmp/tk.db",
            "--verbose",
            "asset-type",
            "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.db.as_deref(), Some("/tmp/tk.db"));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::AssetType {
                action: TaxonomyCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["tk", "task-type", "list", "--quiet"])
            .expect("cli should parse");
        assert!(cli.quiet);
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.format, OutputFormat::Json);
        assert!(flags.db.is_none());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["tk", "--format", "table", "project", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn publish_next_takes_full_code_path() {
        let cli = Cli::try_parse_from([
            "tk",
            "publish",
            "next",
            "PRJ1",
            "chr",
            "hero_knight",
            "rig",
            "cache",
            "geo_cache",
            "--release",
            "release",
        ])
        .expect("cli should parse");

        let Commands::Publish {
            action: PublishCommands::Next { target, code, publish_type, release },
        } = cli.command
        else {
            panic!("expected publish next");
        };
        assert_eq!(target.project, "PRJ1");
        assert_eq!(target.task_type, "rig");
        assert_eq!(code, "cache");
        assert_eq!(publish_type, "geo_cache");
        assert_eq!(release.as_deref(), Some("release"));
    }

    #[test]
    fn activate_takes_kind_and_id() {
        let cli = Cli::try_parse_from(["tk", "activate", "publish-type", "3"])
            .expect("cli should parse");
        let Commands::Activate(args) = cli.command else {
            panic!("expected activate");
        };
        assert_eq!(args.kind, "publish-type");
        assert_eq!(args.id, 3);
    }
}
