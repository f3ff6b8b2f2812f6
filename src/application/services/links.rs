//! Links file service
//!
//! Loads and saves the links file and opens the links grouped under a title.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{AddedLink, DomainError, LinkTarget, LinksConfig};
use crate::infrastructure::notifier::Notifier;
use crate::infrastructure::opener::Opener;
use crate::infrastructure::traits::FileSystem;

/// What happened to a single link during an open run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Handed to the opener successfully
    Opened,
    /// Neither a URL nor an existing path; skipped
    Invalid,
    /// The opener reported an error
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReport {
    pub link: String,
    pub outcome: LinkOutcome,
}

/// Per-link results of opening a title, in link order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenReport {
    pub title: String,
    pub links: Vec<LinkReport>,
}

impl OpenReport {
    pub fn opened(&self) -> usize {
        self.count(|o| matches!(o, LinkOutcome::Opened))
    }

    pub fn invalid(&self) -> usize {
        self.count(|o| matches!(o, LinkOutcome::Invalid))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, LinkOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&LinkOutcome) -> bool) -> usize {
        self.links.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Service for reading, changing and opening the links file.
pub struct LinksService {
    fs: Arc<dyn FileSystem>,
    opener: Arc<dyn Opener>,
    notifier: Option<Arc<dyn Notifier>>,
    links_file: PathBuf,
}

impl LinksService {
    /// Create a new links service for `links_file`.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        opener: Arc<dyn Opener>,
        notifier: Option<Arc<dyn Notifier>>,
        links_file: PathBuf,
    ) -> Self {
        Self {
            fs,
            opener,
            notifier,
            links_file,
        }
    }

    pub fn links_file(&self) -> &Path {
        &self.links_file
    }

    /// Read and parse the links file.
    ///
    /// A missing file is an empty configuration, so the first `add` can
    /// create it.
    #[instrument(skip(self), fields(path = %self.links_file.display()))]
    pub fn load(&self) -> ApplicationResult<LinksConfig> {
        if !self.fs.exists(&self.links_file) {
            debug!("load: links file missing, starting empty");
            return Ok(LinksConfig::new());
        }

        let content = self
            .fs
            .read_to_string(&self.links_file)
            .with_path_context("read links file", &self.links_file)?;
        let config = LinksConfig::parse(&content, &self.links_file)?;
        debug!("load: {} titles", config.len());
        Ok(config)
    }

    /// Write `config` back to the links file, creating parent directories.
    #[instrument(skip(self, config), fields(path = %self.links_file.display()))]
    pub fn save(&self, config: &LinksConfig) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(&self.links_file)
            .with_path_context("create directory for", &self.links_file)?;
        self.fs
            .write(&self.links_file, &config.render())
            .with_path_context("write links file", &self.links_file)?;
        info!("saved {} titles", config.len());
        Ok(())
    }

    /// Open every link under `title`.
    ///
    /// Invalid links and opener failures are recorded and skipped; only an
    /// unknown title is an error.
    #[instrument(skip(self, config))]
    pub fn open_title(&self, config: &LinksConfig, title: &str) -> ApplicationResult<OpenReport> {
        let links = config
            .links(title)
            .ok_or_else(|| DomainError::TitleNotFound(title.to_string()))?;

        let mut report = OpenReport {
            title: title.to_string(),
            links: Vec::with_capacity(links.len()),
        };

        for link in links {
            let outcome = match LinkTarget::resolve(link, |p| self.fs.exists(p)) {
                None => {
                    debug!("open_title: invalid link {:?}", link);
                    LinkOutcome::Invalid
                }
                Some(target) => match self.opener.open(&target.as_open_arg()) {
                    Ok(()) => {
                        debug!("open_title: opened {:?} via {}", link, self.opener.name());
                        LinkOutcome::Opened
                    }
                    Err(e) => {
                        warn!("open_title: {} failed for {:?}: {}", self.opener.name(), link, e);
                        LinkOutcome::Failed(e.to_string())
                    }
                },
            };
            report.links.push(LinkReport {
                link: link.clone(),
                outcome,
            });
        }

        self.notify_opened(&report);
        Ok(report)
    }

    /// Open the links file itself, creating an empty one first if needed.
    #[instrument(skip(self), fields(path = %self.links_file.display()))]
    pub fn open_links_file(&self) -> ApplicationResult<()> {
        if !self.fs.exists(&self.links_file) {
            debug!("open_links_file: creating empty links file");
            self.save(&LinksConfig::new())?;
        }
        let target = self.links_file.to_string_lossy();
        self.opener
            .open(&target)
            .map_err(|e| ApplicationError::Launch {
                opener: self.opener.name().to_string(),
                path: self.links_file.clone(),
                source: e,
            })
    }

    /// Append a link to `title`, creating the title when needed.
    ///
    /// Surrounding whitespace in `link` is dropped.
    pub fn add_link(
        &self,
        config: &mut LinksConfig,
        title: &str,
        link: &str,
    ) -> ApplicationResult<AddedLink> {
        let added = config.add_link(title, link.trim())?;
        debug!(
            "add_link: {:?} -> {:?} at {} (new title: {})",
            link, title, added.index, added.created_title
        );
        Ok(added)
    }

    pub fn remove_link(
        &self,
        config: &mut LinksConfig,
        title: &str,
        index: usize,
    ) -> ApplicationResult<String> {
        let removed = config.remove_link(title, index)?;
        debug!("remove_link: {:?}[{}] = {:?}", title, index, removed);
        Ok(removed)
    }

    pub fn remove_title(&self, config: &mut LinksConfig, title: &str) -> ApplicationResult<()> {
        let links = config.remove_title(title)?;
        debug!("remove_title: {:?} ({} links)", title, links.len());
        Ok(())
    }

    fn notify_opened(&self, report: &OpenReport) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        if report.links.is_empty() {
            debug!("notify_opened: no links under {:?}, nothing to announce", report.title);
            return;
        }
        let body = format!(
            "opened {} link(s) for {}",
            report.opened(),
            report.title
        );
        if let Err(e) = notifier.notify("ao", &body) {
            warn!("notification failed: {}", e);
        }
    }
}
