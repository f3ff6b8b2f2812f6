use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::application::services::{LinkOutcome, LinksService};
use crate::cli::output;
use crate::cli::{Cli, CliResult, Invocation};
use crate::domain::{DomainError, LinksConfig};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::Prompter;
use crate::infrastructure::InfraError;

/// Run one invocation.
pub fn execute_command(invocation: &Invocation, container: &ServiceContainer) -> CliResult<()> {
    let service = container.links_service();

    match invocation {
        Invocation::Help => {
            _help();
            Ok(())
        }
        Invocation::Conf => _conf(&service),
        Invocation::ListTitles => with_links(&service, |config| _list_titles(config)),
        Invocation::Open(title) => with_links(&service, |config| _open(&service, config, title)),
        Invocation::ListLinks(title) => {
            with_links(&service, |config| _list_links(container, config, title))
        }
        Invocation::Add(title) => {
            with_links(&service, |config| _add(container, &service, config, title))
        }
        Invocation::Remove(title) => {
            with_links(&service, |config| _remove(container, &service, config, title))
        }
    }
}

/// Load the links file, run `f`, and write the file back if `f` reports a change.
fn with_links(
    service: &LinksService,
    f: impl FnOnce(&mut LinksConfig) -> CliResult<bool>,
) -> CliResult<()> {
    let mut config = service.load()?;
    if f(&mut config)? {
        service.save(&config)?;
    } else {
        debug!("links file unchanged, not writing");
    }
    Ok(())
}

/// Full help text, including the command overview.
pub fn usage_text() -> String {
    Cli::command().render_long_help().to_string()
}

fn _help() {
    output::info(&usage_text());
}

#[instrument(skip(service))]
fn _conf(service: &LinksService) -> CliResult<()> {
    service.open_links_file()?;
    output::success(&format!("Opened config: {}", service.links_file().display()));
    Ok(())
}

fn _list_titles(config: &LinksConfig) -> CliResult<bool> {
    if config.is_empty() {
        output::info("No titles in config file.");
        return Ok(false);
    }
    output::header("Titles in config file:");
    output::numbered(config.titles());
    Ok(false)
}

#[instrument(skip(service, config))]
fn _open(service: &LinksService, config: &LinksConfig, title: &str) -> CliResult<bool> {
    let report = service.open_title(config, title)?;

    if report.links.is_empty() {
        output::info("no links associated with this title.");
        return Ok(false);
    }

    for entry in &report.links {
        match &entry.outcome {
            LinkOutcome::Opened => output::success(&format!("Opened successfully {}", entry.link)),
            LinkOutcome::Invalid => output::warning(&format!(
                "`{}` is not a valid URL or filepath.",
                entry.link
            )),
            LinkOutcome::Failed(reason) => {
                output::failure(&format!("Could not open {}: {}", entry.link, reason))
            }
        }
    }

    if report.opened() == 0 {
        output::warning(&format!(
            "nothing opened for {} ({} invalid, {} failed)",
            title,
            report.invalid(),
            report.failed()
        ));
    }
    Ok(false)
}

fn _list_links(container: &ServiceContainer, config: &LinksConfig, title: &str) -> CliResult<bool> {
    let links = config.links(title).unwrap_or_default();
    output::header(&format!("Links of title {}:", title));
    if links.is_empty() {
        output::info("no links associated with this title.");
    } else {
        let hyperlinks = container.settings.hyperlinks;
        output::numbered(links.iter().map(|l| output::display_link(l, hyperlinks)));
    }
    Ok(false)
}

#[instrument(skip(container, service, config))]
fn _add(
    container: &ServiceContainer,
    service: &LinksService,
    config: &mut LinksConfig,
    title: &str,
) -> CliResult<bool> {
    let marker = if config.contains_title(title) {
        ""
    } else {
        " (new)"
    };
    let answer = container
        .prompter
        .read_line(&format!("Insert filepath/url to add to {}{}: ", title, marker))
        .map_err(|e| InfraError::prompt("link", e))?;

    let added = service.add_link(config, title, &answer)?;
    output::success(&format!(
        "{} added successfully to {} at index {}",
        answer.trim(),
        title,
        added.index
    ));
    Ok(true)
}

#[instrument(skip(container, service, config))]
fn _remove(
    container: &ServiceContainer,
    service: &LinksService,
    config: &mut LinksConfig,
    title: &str,
) -> CliResult<bool> {
    let Some(links) = config.links(title) else {
        return Err(ApplicationError::from(DomainError::TitleNotFound(title.to_string())).into());
    };

    if links.is_empty() {
        let answer = container
            .prompter
            .read_line(&format!(
                "{} has no links associated with it. Want to remove the title from configuration? [y/N] ",
                title
            ))
            .map_err(|e| InfraError::prompt("confirmation", e))?;
        if answer.trim().eq_ignore_ascii_case("y") {
            service.remove_title(config, title)?;
            output::success(&format!("Removed {} from configuration.", title));
            return Ok(true);
        }
        output::info(&format!("Kept {}.", title));
        return Ok(false);
    }

    let hyperlinks = container.settings.hyperlinks;
    output::header(&format!("Current links of {}:", title));
    output::numbered(links.iter().map(|l| output::display_link(l, hyperlinks)));

    let index = prompt_index(container.prompter.as_ref(), links.len())?;
    let removed = service.remove_link(config, title, index)?;
    output::success(&format!("{} removed successfully from {}", removed, title));
    Ok(true)
}

/// Ask until the answer is an index in `0..len`.
///
/// `len` must be non-zero.
pub fn prompt_index(prompter: &dyn Prompter, len: usize) -> CliResult<usize> {
    let prompt = format!("Insert a valid number between 0 and {}: ", len.saturating_sub(1));
    loop {
        let answer = prompter
            .read_line(&prompt)
            .map_err(|e| InfraError::prompt("index", e))?;
        let answer = answer.trim();
        // digits only: `parse` alone would take "+1"
        if !answer.is_empty() && answer.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = answer.parse::<usize>() {
                if index < len {
                    return Ok(index);
                }
            }
        }
        debug!("prompt_index: rejected {:?}", answer);
    }
}
