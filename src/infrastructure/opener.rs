//! Default-application launchers, one per platform.

use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::infrastructure::traits::CommandRunner;

/// Hands a URL or path to whatever the desktop opens it with.
pub trait Opener: Send + Sync {
    /// Open `target`; blocks until the launcher itself exits.
    fn open(&self, target: &str) -> io::Result<()>;

    /// Launcher name for logs and messages.
    fn name(&self) -> &str;
}

/// `xdg-open`, used on Linux and the BSDs.
pub struct XdgOpener {
    runner: Arc<dyn CommandRunner>,
}

impl XdgOpener {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Opener for XdgOpener {
    fn open(&self, target: &str) -> io::Result<()> {
        self.runner.run("xdg-open", &[target])
    }

    fn name(&self) -> &str {
        "xdg-open"
    }
}

/// macOS `open`.
pub struct MacOpener {
    runner: Arc<dyn CommandRunner>,
}

impl MacOpener {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Opener for MacOpener {
    fn open(&self, target: &str) -> io::Result<()> {
        self.runner.run("open", &[target])
    }

    fn name(&self) -> &str {
        "open"
    }
}

/// Windows shell association via `rundll32 url.dll,FileProtocolHandler`.
///
/// The target never passes through `cmd.exe`, so `&`, `|`, `^` and `%` in
/// a URL stay part of the argument.
pub struct WindowsOpener {
    runner: Arc<dyn CommandRunner>,
}

impl WindowsOpener {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Opener for WindowsOpener {
    fn open(&self, target: &str) -> io::Result<()> {
        self.runner
            .run("rundll32", &["url.dll,FileProtocolHandler", target])
    }

    fn name(&self) -> &str {
        "rundll32"
    }
}

/// User-configured launcher, e.g. `firefox --new-tab`.
///
/// The command line is split on whitespace; the target is appended last.
pub struct CommandOpener {
    runner: Arc<dyn CommandRunner>,
    program: String,
    args: Vec<String>,
}

impl CommandOpener {
    /// Returns `None` for a blank command line.
    pub fn new(runner: Arc<dyn CommandRunner>, command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            runner,
            program,
            args: parts.collect(),
        })
    }
}

impl Opener for CommandOpener {
    fn open(&self, target: &str) -> io::Result<()> {
        let mut args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        args.push(target);
        self.runner.run(&self.program, &args)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Launcher for the platform this binary was built for.
pub fn default_opener(runner: Arc<dyn CommandRunner>) -> Arc<dyn Opener> {
    if cfg!(target_os = "macos") {
        Arc::new(MacOpener::new(runner))
    } else if cfg!(target_os = "windows") {
        Arc::new(WindowsOpener::new(runner))
    } else {
        Arc::new(XdgOpener::new(runner))
    }
}

/// Configured launcher if one is set, platform default otherwise.
pub fn select_opener(runner: Arc<dyn CommandRunner>, configured: Option<&str>) -> Arc<dyn Opener> {
    if let Some(command_line) = configured {
        if let Some(opener) = CommandOpener::new(runner.clone(), command_line) {
            debug!("using configured opener: {}", opener.name());
            return Arc::new(opener);
        }
    }
    let opener = default_opener(runner);
    debug!("using platform opener: {}", opener.name());
    opener
}
