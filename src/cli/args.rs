//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueHint};

/// Open groups of URLs and files by title
#[derive(Parser, Debug)]
#[command(name = "ao")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "ao [OPTIONS] [TITLE|COMMAND] [SUB-COMMAND]")]
#[command(after_help = crate::cli::dispatch::COMMANDS_HELP)]
pub struct Cli {
    /// Title to open, or a top-level command (conf, list, help)
    #[arg(value_name = "TITLE|COMMAND")]
    pub target: Option<String>,

    /// Sub-command for the title (list, add, remove)
    #[arg(value_name = "SUB-COMMAND")]
    pub action: Option<String>,

    /// Links file (default: ~/.config/auto-opener/config.config)
    #[arg(short, long, env = "AO_FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Do not send a desktop notification for this run
    #[arg(long)]
    pub no_notify: bool,

    /// Print effective settings as TOML
    #[arg(long)]
    pub show_settings: bool,

    /// Print shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

/// Exit code for a failed `Cli::try_parse`.
///
/// `--help` and `--version` are successful runs; every other clap error is
/// a usage error.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => crate::exitcode::OK,
        _ => crate::exitcode::USAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_title_and_action_when_parsing_then_both_positionals_set() {
        let cli = Cli::try_parse_from(["ao", "work", "add"]).unwrap();
        assert_eq!(cli.target.as_deref(), Some("work"));
        assert_eq!(cli.action.as_deref(), Some("add"));
    }

    #[test]
    fn given_three_positionals_when_parsing_then_usage_exit() {
        let err = Cli::try_parse_from(["ao", "work", "add", "extra"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(parse_error_exit_code(&err), crate::exitcode::USAGE);
    }

    #[test]
    fn given_unknown_flag_when_parsing_then_usage_exit() {
        let err = Cli::try_parse_from(["ao", "--bogus"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), crate::exitcode::USAGE);
    }

    #[test]
    fn given_help_or_version_when_parsing_then_success_exit() {
        let help = Cli::try_parse_from(["ao", "--help"]).unwrap_err();
        let version = Cli::try_parse_from(["ao", "--version"]).unwrap_err();

        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse_error_exit_code(&help), crate::exitcode::OK);
        assert_eq!(parse_error_exit_code(&version), crate::exitcode::OK);
    }

    #[test]
    fn given_flags_when_parsing_then_collected() {
        let cli =
            Cli::try_parse_from(["ao", "-dd", "--file", "/tmp/x.config", "--no-notify", "list"])
                .unwrap();
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/x.config")));
        assert!(cli.no_notify);
        assert_eq!(cli.target.as_deref(), Some("list"));
    }
}
