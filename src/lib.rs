//! auto-opener: open groups of URLs and files by title.
//!
//! Titles and their links live in a plain-text links file:
//!
//! ```text
//! [work]
//! https://mail.example.com
//! ~/notes/todo.md
//! ```
//!
//! `ao work` hands every link under `[work]` to the desktop's default
//! application.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
