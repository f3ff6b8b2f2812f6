//! Domain entities: core data structures

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DomainError;

static URL_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("static url scheme regex")
});

/// One titled group of links, as it appears in the links file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEntry {
    pub title: String,
    pub links: Vec<String>,
}

/// Ordered mapping from title to links.
///
/// Titles are unique and keep the order in which they were first read or
/// inserted; links keep their order within a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinksConfig {
    entries: Vec<TitleEntry>,
}

/// Result of appending a link to a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedLink {
    /// Position of the new link within its title
    pub index: usize,
    /// Whether the title had to be created
    pub created_title: bool,
}

impl LinksConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TitleEntry] {
        &self.entries
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    /// Links under `title`, or `None` if the title is unknown.
    pub fn links(&self, title: &str) -> Option<&[String]> {
        self.position(title).map(|i| self.entries[i].links.as_slice())
    }

    /// Insert a new, empty title at the end.
    pub fn insert_title(&mut self, title: &str) -> Result<(), DomainError> {
        validate_title(title)?;
        if self.contains_title(title) {
            return Err(DomainError::TitleExists(title.to_string()));
        }
        self.entries.push(TitleEntry {
            title: title.to_string(),
            links: Vec::new(),
        });
        Ok(())
    }

    /// Append `link` to `title`, creating the title if it does not exist.
    ///
    /// Only new titles are validated; an existing title is used exactly as
    /// it was read from the links file.
    pub fn add_link(&mut self, title: &str, link: &str) -> Result<AddedLink, DomainError> {
        validate_link(link)?;

        let (pos, created_title) = match self.position(title) {
            Some(pos) => (pos, false),
            None => {
                self.insert_title(title)?;
                (self.entries.len() - 1, true)
            }
        };

        let links = &mut self.entries[pos].links;
        links.push(link.to_string());
        Ok(AddedLink {
            index: links.len() - 1,
            created_title,
        })
    }

    /// Remove and return the link at `index` under `title`.
    pub fn remove_link(&mut self, title: &str, index: usize) -> Result<String, DomainError> {
        let pos = self
            .position(title)
            .ok_or_else(|| DomainError::TitleNotFound(title.to_string()))?;
        let links = &mut self.entries[pos].links;
        if index >= links.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: links.len(),
            });
        }
        Ok(links.remove(index))
    }

    /// Remove `title` with all its links, returning the links.
    pub fn remove_title(&mut self, title: &str) -> Result<Vec<String>, DomainError> {
        let pos = self
            .position(title)
            .ok_or_else(|| DomainError::TitleNotFound(title.to_string()))?;
        Ok(self.entries.remove(pos).links)
    }

    /// Used by the parser, which has already checked for duplicates.
    pub(crate) fn push_entry(&mut self, entry: TitleEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn last_entry_mut(&mut self) -> Option<&mut TitleEntry> {
        self.entries.last_mut()
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.title == title)
    }
}

/// Check that a title can be written to and read back from the links file.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    let reason = if title.trim().is_empty() {
        Some("title is empty")
    } else if title.trim() != title {
        Some("title has leading or trailing whitespace")
    } else if title.contains(['\n', '\r']) {
        Some("title contains a line break")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidTitle {
            title: title.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Check that a link can be written to and read back from the links file.
pub fn validate_link(link: &str) -> Result<(), DomainError> {
    let reason = if link.trim().is_empty() {
        Some("link is empty")
    } else if link.trim() != link {
        Some("link has leading or trailing whitespace")
    } else if link.contains(['\n', '\r']) {
        Some("link contains a line break")
    } else if crate::domain::parser::parse_title_header(link).is_some() {
        Some("link would be read back as a [title] header")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidLink {
            link: link.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// A link that passed validation and can be handed to an opener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Anything with a URL scheme (`https://`, `file://`, `mailto:` ...)
    Url(String),
    /// An existing filesystem path, after `~`/`$VAR` expansion
    Path(PathBuf),
}

impl LinkTarget {
    /// Classify `raw` as a URL or an existing path.
    ///
    /// Returns `None` for links that are neither; `exists` decides whether an
    /// expanded path is present on disk.
    pub fn resolve(raw: &str, exists: impl Fn(&Path) -> bool) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if has_url_scheme(raw) {
            return Some(Self::Url(raw.to_string()));
        }
        let path = PathBuf::from(expand_env_vars(raw));
        exists(&path).then_some(Self::Path(path))
    }

    /// Argument passed to the OS opener.
    pub fn as_open_arg(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Path(path) => path.to_string_lossy().into_owned(),
        }
    }
}

/// True for `scheme://...` and `mailto:` links.
pub fn has_url_scheme(link: &str) -> bool {
    URL_SCHEME.is_match(link) || link.starts_with("mailto:")
}

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LinksConfig {
        let mut config = LinksConfig::new();
        config.add_link("work", "https://example.com").unwrap();
        config.add_link("work", "~/notes.md").unwrap();
        config.insert_title("empty").unwrap();
        config
    }

    #[test]
    fn given_padded_header_title_when_adding_link_then_appended() {
        let mut config =
            LinksConfig::parse("[ my work ]\nhttps://a.example\n", Path::new("mem")).unwrap();

        let added = config.add_link(" my work ", "https://b.example").unwrap();

        assert!(!added.created_title);
        assert_eq!(added.index, 1);
        assert_eq!(
            config.links(" my work ").unwrap(),
            ["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn given_padded_new_title_when_adding_link_then_rejected() {
        let mut config = LinksConfig::new();

        let err = config.add_link(" work", "https://a.example").unwrap_err();

        assert!(matches!(err, DomainError::InvalidTitle { .. }));
        assert!(config.is_empty());
    }

    #[test]
    fn given_new_title_when_adding_link_then_title_is_created() {
        let mut config = LinksConfig::new();

        let added = config.add_link("docs", "https://docs.rs").unwrap();

        assert!(added.created_title);
        assert_eq!(added.index, 0);
        assert_eq!(config.links("docs").unwrap(), ["https://docs.rs"]);
    }

    #[test]
    fn given_existing_title_when_adding_link_then_appends_at_end() {
        let mut config = sample();

        let added = config.add_link("work", "https://rust-lang.org").unwrap();

        assert!(!added.created_title);
        assert_eq!(added.index, 2);
        assert_eq!(config.links("work").unwrap()[2], "https://rust-lang.org");
    }

    #[test]
    fn given_duplicate_title_when_inserting_then_fails() {
        let mut config = sample();
        assert_eq!(
            config.insert_title("work"),
            Err(DomainError::TitleExists("work".into()))
        );
    }

    #[test]
    fn given_add_then_remove_at_reported_index_then_list_is_restored() {
        let mut config = sample();
        let before = config.clone();

        let added = config.add_link("work", "https://tmp.example").unwrap();
        let removed = config.remove_link("work", added.index).unwrap();

        assert_eq!(removed, "https://tmp.example");
        assert_eq!(config, before);
    }

    #[test]
    fn given_index_past_end_when_removing_then_out_of_range() {
        let mut config = sample();
        assert_eq!(
            config.remove_link("work", 2),
            Err(DomainError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn given_unknown_title_when_removing_then_not_found() {
        let mut config = sample();
        assert!(matches!(
            config.remove_title("nope"),
            Err(DomainError::TitleNotFound(_))
        ));
    }

    #[test]
    fn given_title_removed_then_order_of_remaining_titles_kept() {
        let mut config = sample();
        config.insert_title("last").unwrap();

        config.remove_title("work").unwrap();

        assert_eq!(config.titles().collect::<Vec<_>>(), ["empty", "last"]);
    }

    #[test]
    fn given_unwritable_links_when_validating_then_rejected() {
        assert!(validate_link("").is_err());
        assert!(validate_link("  padded ").is_err());
        assert!(validate_link("two\nlines").is_err());
        assert!(validate_link("[looks-like-title]").is_err());
        assert!(validate_link("[]").is_ok());
        assert!(validate_link("https://ok.example").is_ok());
    }

    #[test]
    fn given_unwritable_titles_when_validating_then_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title(" x").is_err());
        assert!(validate_title("a\nb").is_err());
        assert!(validate_title("a]b").is_ok());
    }

    #[test]
    fn given_scheme_prefixes_when_checking_then_detected() {
        assert!(has_url_scheme("https://example.com"));
        assert!(has_url_scheme("http://localhost:8080"));
        assert!(has_url_scheme("file:///tmp/x"));
        assert!(has_url_scheme("mailto:someone@example.com"));
        assert!(!has_url_scheme("/tmp/file"));
        assert!(!has_url_scheme("example.com"));
        assert!(!has_url_scheme("C:\\Users\\me"));
    }

    #[test]
    fn given_url_when_resolving_then_existence_not_checked() {
        let target = LinkTarget::resolve("https://example.com", |_| false);
        assert_eq!(target, Some(LinkTarget::Url("https://example.com".into())));
    }

    #[test]
    fn given_missing_path_when_resolving_then_none() {
        assert_eq!(LinkTarget::resolve("/definitely/missing", |_| false), None);
    }

    #[test]
    fn given_existing_path_when_resolving_then_path_target() {
        let target = LinkTarget::resolve("/etc/hosts", |p| p == Path::new("/etc/hosts"));
        assert_eq!(target, Some(LinkTarget::Path(PathBuf::from("/etc/hosts"))));
    }

    #[test]
    fn given_tilde_path_when_resolving_then_expanded_before_check() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expected = PathBuf::from(format!("{home}/notes.md"));

        let target = LinkTarget::resolve("~/notes.md", |p| p == expected.as_path());

        assert_eq!(target, Some(LinkTarget::Path(expected)));
    }
}
