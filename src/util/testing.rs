//! Test support: logging setup and recording doubles for the I/O traits.

use std::collections::VecDeque;
use std::env;
use std::io;
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::notifier::Notifier;
use crate::infrastructure::opener::Opener;
use crate::infrastructure::traits::{CommandRunner, Prompter};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Command runner that records calls instead of spawning processes.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    should_fail: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a non-zero-exit style error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<()> {
        self.calls.lock().unwrap().push((
            cmd.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        ));
        if self.should_fail {
            return Err(io::Error::other(format!("{cmd} exited with exit status: 1")));
        }
        Ok(())
    }
}

/// Opener that records targets; targets containing `fail_on` are errors.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(pattern: &str) -> Self {
        Self {
            fail_on: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    /// Targets that were attempted, including failed ones.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Opener for RecordingOpener {
    fn open(&self, target: &str) -> io::Result<()> {
        self.opened.lock().unwrap().push(target.to_string());
        match &self.fail_on {
            Some(pattern) if target.contains(pattern.as_str()) => {
                Err(io::Error::other("launcher failed"))
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Prompter that replays canned answers and records the prompts shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, prompt: &str) -> io::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }
}

/// Notifier that records (summary, body) pairs.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    should_fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, summary: &str, body: &str) -> io::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((summary.to_string(), body.to_string()));
        if self.should_fail {
            return Err(io::Error::other("no notification daemon"));
        }
        Ok(())
    }
}
