use std::io;

use auto_opener::cli::commands::{execute_command, usage_text};
use auto_opener::cli::args::parse_error_exit_code;
use auto_opener::cli::{output, Cli, CliError, CliResult, Invocation};
use auto_opener::config::Settings;
use auto_opener::exitcode;
use auto_opener::infrastructure::di::ServiceContainer;
use clap::{Command, CommandFactory, Parser};
use clap_complete::{generate, Generator};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // help and version go to stdout, real errors to stderr
            let _ = e.print();
            std::process::exit(parse_error_exit_code(&e));
        }
    };

    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        if let CliError::Infra(infra) = &e {
            if infra.is_end_of_input() {
                // Ctrl-D leaves the cursor on the prompt line
                eprintln!();
            }
        }
        output::error(&e);
        if e.shows_usage() {
            eprintln!();
            eprintln!("{}", usage_text());
        }
        std::process::exit(e.exit_code());
    }
    std::process::exit(exitcode::OK);
}

fn run(cli: &Cli) -> CliResult<()> {
    if let Some(generator) = cli.completions {
        let mut cmd = Cli::command();
        eprintln!("Generating completion file for {generator:?}...");
        print_completions(generator, &mut cmd);
        if cli.target.is_none() {
            return Ok(());
        }
    }

    let settings = load_settings(cli)?;

    if cli.show_settings {
        output::info(&settings.to_toml()?);
        if cli.target.is_none() {
            return Ok(());
        }
    }

    let invocation = Invocation::from_args(cli.target.as_deref(), cli.action.as_deref())?;
    tracing::debug!("invocation: {:?}", invocation);

    let container = ServiceContainer::new(settings);
    execute_command(&invocation, &container)
}

/// Settings from files and environment, then command line flags on top.
fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    let mut settings = Settings::load()?;
    if let Some(file) = &cli.file {
        settings = settings.with_links_file(file);
    }
    if cli.no_notify {
        settings.notify = false;
    }
    tracing::debug!("links file: {}", settings.links_file.display());
    Ok(settings)
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -ddd");
            LevelFilter::TRACE
        }
    };

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auto_opener::util::testing;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        testing::init_test_setup();
        Cli::command().debug_assert();
    }

    #[test]
    fn given_file_flag_when_loading_settings_then_overrides_links_file() {
        let cli = Cli::try_parse_from(["ao", "--file", "/tmp/custom.config", "--no-notify", "list"])
            .unwrap();

        let settings = load_settings(&cli).unwrap();

        assert_eq!(
            settings.links_file,
            std::path::PathBuf::from("/tmp/custom.config")
        );
        assert!(!settings.notify);
    }
}
