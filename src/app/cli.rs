//! Command Line Interface

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

#[derive(Debug)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    /// Slot to render; defaults to the config file's root slot, then "root"
    pub slot: Option<String>,
    pub list_plugins: bool,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
    pub color: bool,
    pub no_color: bool,
}

pub fn build_command() -> Command {
    Command::new("vitrine")
        .about("Component preview host - renders isolated UI fixtures through a plugin/slot architecture")
        .version(format!(
            "{} ({})",
            env!("CARGO_PKG_VERSION"),
            crate::GIT_HASH
        ))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("slot")
                .short('s')
                .long("slot")
                .value_name("NAME")
                .help("Slot to render (default: root)"),
        )
        .arg(
            Arg::new("list-plugins")
                .long("list-plugins")
                .action(ArgAction::SetTrue)
                .help("List registered plugins and exit"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level: trace, debug, info, warn, error, off"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .value_parser(["text", "json"])
                .help("Log output format"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Write logs to a file instead of the console"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .action(ArgAction::SetTrue)
                .help("Force colored output"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .conflicts_with("color")
                .help("Disable colored output"),
        )
}

fn from_matches(matches: &ArgMatches) -> CliArgs {
    CliArgs {
        config: matches.get_one::<String>("config").map(PathBuf::from),
        slot: matches.get_one::<String>("slot").cloned(),
        list_plugins: matches.get_flag("list-plugins"),
        log_level: matches.get_one::<String>("log-level").cloned(),
        log_format: matches.get_one::<String>("log-format").cloned(),
        log_file: matches.get_one::<String>("log-file").cloned(),
        color: matches.get_flag("color"),
        no_color: matches.get_flag("no-color"),
    }
}

pub fn parse() -> CliArgs {
    from_matches(&build_command().get_matches())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let matches = build_command().try_get_matches_from(["vitrine"]).unwrap();
        let args = from_matches(&matches);
        assert!(args.config.is_none());
        assert!(args.slot.is_none());
        assert!(!args.list_plugins);
        assert!(!args.color);
        assert!(!args.no_color);
    }

    #[test]
    fn test_full_invocation() {
        let matches = build_command()
            .try_get_matches_from([
                "vitrine",
                "--config",
                "preview.toml",
                "--slot",
                "rendererPreviewOuter",
                "--log-level",
                "debug",
                "--log-format",
                "json",
                "--no-color",
            ])
            .unwrap();
        let args = from_matches(&matches);
        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("preview.toml")));
        assert_eq!(args.slot.as_deref(), Some("rendererPreviewOuter"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.log_format.as_deref(), Some("json"));
        assert!(args.no_color);
    }

    #[test]
    fn test_color_flags_conflict() {
        let result = build_command().try_get_matches_from(["vitrine", "--color", "--no-color"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let result = build_command().try_get_matches_from(["vitrine", "--log-format", "xml"]);
        assert!(result.is_err());
    }
}
