//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::IsTerminal;

use colored::Colorize;

use crate::domain::{expand_env_vars, has_url_scheme};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X, indented)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print items as `0) item`, `1) item`, ...
pub fn numbered<I, T>(items: I)
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    for (i, item) in items.into_iter().enumerate() {
        println!("{}) {}", i.to_string().dimmed(), item);
    }
}

/// Wrap `text` in an OSC 8 terminal hyperlink to `target`.
pub fn hyperlink(target: &str, text: &str) -> String {
    format!("\x1b]8;;{target}\x1b\\{text}\x1b]8;;\x1b\\")
}

/// URI a terminal can follow for `link`, if there is one.
///
/// URLs are used as is; absolute paths become `file://` URIs.
pub fn link_uri(link: &str) -> Option<String> {
    if has_url_scheme(link) {
        return Some(link.to_string());
    }
    let expanded = expand_env_vars(link);
    std::path::Path::new(&expanded)
        .is_absolute()
        .then(|| format!("file://{expanded}"))
}

/// Display form of a link: clickable when enabled and stdout is a terminal.
pub fn display_link(link: &str, hyperlinks: bool) -> String {
    if !hyperlinks || !std::io::stdout().is_terminal() {
        return link.to_string();
    }
    match link_uri(link) {
        Some(uri) => hyperlink(&uri, link),
        None => link.to_string(),
    }
}
