//! Maps the two positional arguments onto a command.

use crate::cli::{CliError, CliResult};

pub const COMMANDS_HELP: &str = "\
Commands:
  ao <title>                 Open every link under <title>
  ao <top-level command>     Top-level commands: [conf, list, help]
  ao <title> <sub-command>   Sub-commands: [list, add, remove]

add and remove ask for input interactively.";

/// What one `ao` run should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Open the links file with the default application
    Conf,
    /// Print all titles
    ListTitles,
    /// Print usage
    Help,
    /// Open all links of a title
    Open(String),
    /// Print the links of a title
    ListLinks(String),
    /// Prompt for a link and append it to a title
    Add(String),
    /// Prompt for a link of a title to remove
    Remove(String),
}

impl Invocation {
    /// Interpret `ao [target] [action]`.
    ///
    /// A known top-level command as `target` wins over a title of the same
    /// name, so such titles are only reachable with a sub-command.
    pub fn from_args(target: Option<&str>, action: Option<&str>) -> CliResult<Self> {
        let Some(target) = target else {
            return Err(CliError::Usage("Not enough arguments.".into()));
        };

        match action {
            None => Ok(match target {
                "conf" => Self::Conf,
                "list" => Self::ListTitles,
                "help" => Self::Help,
                title => Self::Open(checked_title(title)?),
            }),
            Some(action) => {
                let title = checked_title(target)?;
                match action {
                    "list" => Ok(Self::ListLinks(title)),
                    "add" => Ok(Self::Add(title)),
                    "remove" => Ok(Self::Remove(title)),
                    _ => Err(CliError::Usage("Not a valid command.".into())),
                }
            }
        }
    }
}

fn checked_title(title: &str) -> CliResult<String> {
    if title.trim().is_empty() {
        return Err(CliError::InvalidArgs("title must not be empty".into()));
    }
    Ok(title.to_string())
}
