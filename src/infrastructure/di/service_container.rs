//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::LinksService;
use crate::config::Settings;
use crate::infrastructure::notifier::{DesktopNotifier, Notifier};
use crate::infrastructure::opener::{select_opener, Opener};
use crate::infrastructure::traits::{
    CommandRunner, FileSystem, Prompter, RealCommandRunner, RealFileSystem, StdinPrompter,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Launcher for links and for the links file itself
    pub opener: Arc<dyn Opener>,

    /// Interactive input for add/remove
    pub prompter: Arc<dyn Prompter>,

    /// Present only when notifications are enabled
    pub notifier: Option<Arc<dyn Notifier>>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let cmd: Arc<dyn CommandRunner> = Arc::new(RealCommandRunner);
        let opener = select_opener(cmd.clone(), settings.opener.as_deref());
        let notifier: Option<Arc<dyn Notifier>> = if settings.notify {
            Some(Arc::new(DesktopNotifier::new(cmd)))
        } else {
            None
        };

        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            opener,
            Arc::new(StdinPrompter),
            notifier,
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        opener: Arc<dyn Opener>,
        prompter: Arc<dyn Prompter>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            opener,
            prompter,
            notifier,
        }
    }

    /// Links service bound to the configured links file.
    pub fn links_service(&self) -> LinksService {
        LinksService::new(
            self.fs.clone(),
            self.opener.clone(),
            self.notifier.clone(),
            self.settings.links_file.clone(),
        )
    }
}
