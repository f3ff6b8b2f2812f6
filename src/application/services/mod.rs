//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Opener, etc.)
//! but are themselves concrete structs, not traits.

mod links;

pub use links::{LinkOutcome, LinkReport, LinksService, OpenReport};
