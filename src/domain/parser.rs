//! Links file format: `[title]` headers followed by one link per line.
//!
//! ```text
//! [work]
//! https://mail.example.com
//! ~/notes/todo.md
//!
//! [music]
//! https://radio.example.com
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{instrument, trace};

use crate::domain::{DomainError, LinksConfig, TitleEntry};

static TITLE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.+)\]$").expect("static title header regex"));

/// Title named by a `[title]` header line, if `line` is one.
pub fn parse_title_header(line: &str) -> Option<&str> {
    TITLE_HEADER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

impl LinksConfig {
    /// Parse links file content.
    ///
    /// Lines are trimmed. Blank lines are skipped; every other line is either
    /// a `[title]` header or a link belonging to the most recent header.
    ///
    /// # Arguments
    /// * `content` - File content to parse
    /// * `path` - Path of the file, only used in error messages
    ///
    /// # Errors
    /// * [`DomainError::LinkBeforeTitle`] if a link appears before any header
    /// * [`DomainError::DuplicateTitle`] if a header repeats an earlier title
    #[instrument(level = "trace", skip(content))]
    pub fn parse(content: &str, path: &Path) -> Result<Self, DomainError> {
        let mut config = LinksConfig::new();

        for (idx, raw) in content.lines().enumerate() {
            let line_number = idx + 1;
            let line = raw.trim();

            if line.is_empty() {
                continue;
            }

            if let Some(title) = parse_title_header(line) {
                if config.contains_title(title) {
                    return Err(DomainError::DuplicateTitle {
                        path: path.to_path_buf(),
                        line: line_number,
                        title: title.to_string(),
                    });
                }
                trace!("line {}: title {:?}", line_number, title);
                config.push_entry(TitleEntry {
                    title: title.to_string(),
                    links: Vec::new(),
                });
                continue;
            }

            match config.last_entry_mut() {
                Some(entry) => entry.links.push(line.to_string()),
                None => {
                    return Err(DomainError::LinkBeforeTitle {
                        path: path.to_path_buf(),
                        line: line_number,
                        content: line.to_string(),
                    })
                }
            }
        }

        Ok(config)
    }

    /// Serialize to the links file format, one block per title.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in self.entries() {
            out.push('[');
            out.push_str(&entry.title);
            out.push_str("]\n");
            for link in &entry.links {
                out.push_str(link);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("/tmp/links.config")
    }

    #[test]
    fn given_blocks_when_parsing_then_keeps_title_and_link_order() {
        let content = "[b]\nhttps://two\nhttps://one\n\n[a]\n/tmp\n";

        let config = LinksConfig::parse(content, &path()).unwrap();

        assert_eq!(config.titles().collect::<Vec<_>>(), ["b", "a"]);
        assert_eq!(config.links("b").unwrap(), ["https://two", "https://one"]);
        assert_eq!(config.links("a").unwrap(), ["/tmp"]);
    }

    #[test]
    fn given_title_without_links_when_parsing_then_empty_list() {
        let config = LinksConfig::parse("[lonely]\n\n[other]\nx\n", &path()).unwrap();
        assert_eq!(config.links("lonely").unwrap().len(), 0);
    }

    #[test]
    fn given_surrounding_whitespace_when_parsing_then_trimmed() {
        let config = LinksConfig::parse("  [t]  \n\t https://x \n", &path()).unwrap();
        assert_eq!(config.links("t").unwrap(), ["https://x"]);
    }

    #[test]
    fn given_link_after_blank_line_when_parsing_then_belongs_to_last_title() {
        let config = LinksConfig::parse("[t]\na\n\n\nb\n", &path()).unwrap();
        assert_eq!(config.links("t").unwrap(), ["a", "b"]);
    }

    #[test]
    fn given_link_before_title_when_parsing_then_reports_line() {
        let err = LinksConfig::parse("\n\nhttps://orphan\n[t]\n", &path()).unwrap_err();

        assert_eq!(
            err,
            DomainError::LinkBeforeTitle {
                path: path(),
                line: 3,
                content: "https://orphan".into(),
            }
        );
        assert!(err.to_string().contains("/tmp/links.config"));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn given_duplicate_title_when_parsing_then_reports_line() {
        let err = LinksConfig::parse("[t]\na\n\n[u]\n\n[t]\n", &path()).unwrap_err();

        assert_eq!(
            err,
            DomainError::DuplicateTitle {
                path: path(),
                line: 6,
                title: "t".into(),
            }
        );
    }

    #[rstest]
    #[case("[work]", Some("work"))]
    #[case("[a]b]", Some("a]b"))]
    #[case("[with space]", Some("with space"))]
    #[case("[]", None)]
    #[case("work]", None)]
    #[case("[work", None)]
    #[case("x[work]", None)]
    fn given_line_when_matching_header_then_expected(
        #[case] line: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(parse_title_header(line), expected);
    }

    #[test]
    fn given_empty_brackets_when_parsing_then_treated_as_link() {
        let config = LinksConfig::parse("[t]\n[]\n", &path()).unwrap();
        assert_eq!(config.links("t").unwrap(), ["[]"]);
    }

    #[test]
    fn given_config_when_rendering_then_one_block_per_title() {
        let mut config = LinksConfig::new();
        config.add_link("work", "https://mail").unwrap();
        config.add_link("work", "/tmp/notes").unwrap();
        config.insert_title("empty").unwrap();

        assert_eq!(
            config.render(),
            "[work]\nhttps://mail\n/tmp/notes\n\n[empty]\n\n"
        );
    }

    #[test]
    fn given_empty_config_when_rendering_then_empty_string() {
        assert_eq!(LinksConfig::new().render(), "");
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::title_without_links(&[("lonely", &[] as &[&str])])]
    #[case::bracket_in_title(&[("a]b", &["https://a.example"] as &[&str]), ("[x", &[])])]
    #[case::brackets_in_links(&[("work", &["https://e.example/[x]", "[]", "a]b[", "]["] as &[&str])])]
    #[case::padded_title(&[(" my work ", &["~/notes.md"] as &[&str]), ("home", &["/tmp"])])]
    fn given_entries_when_round_tripping_then_equal(#[case] entries: &[(&str, &[&str])]) {
        let mut config = LinksConfig::new();
        for (title, links) in entries {
            config.push_entry(TitleEntry {
                title: title.to_string(),
                links: links.iter().map(|l| l.to_string()).collect(),
            });
        }

        let reparsed = LinksConfig::parse(&config.render(), &path()).unwrap();

        assert_eq!(reparsed, config);
        assert_eq!(reparsed.len(), entries.len());
    }

    #[test]
    fn given_well_formed_config_when_round_tripping_then_equal() {
        let mut config = LinksConfig::new();
        config.add_link("z last-first", "https://example.com/?q=[x]").unwrap();
        config.insert_title("no links").unwrap();
        config.add_link("a]b", "~/file with spaces.txt").unwrap();
        config.add_link("a]b", "[]").unwrap();
        config.add_link("a]b", "mailto:me@example.com").unwrap();

        let reparsed = LinksConfig::parse(&config.render(), &path()).unwrap();

        assert_eq!(reparsed, config);
    }
}
