#![deny(unsafe_code)]

//! Scratchlight core engine.
//!
//! Provides the wiki fetcher, the snippet builder, and the spotlight
//! rotation that both front ends (CLI, TUI) are built on. The
//! [`search::ScratchService`] ties them together: it turns raw user input
//! into the two-step remote fetch and feeds the results into the rotating
//! display.

/// Compile-time build metadata (version, git hash, profile).
pub mod build_info;
/// In-memory log capture for the TUI.
pub mod logging;
/// Search orchestration service.
pub mod search;
/// Snippet carving and spotlight frame decomposition.
pub mod snippet;
/// Timed rotation through snippet frames.
pub mod spotlight;
/// MediaWiki search API client.
pub mod wiki;

pub use logging::{LogStore, LogView};
pub use search::{ScratchService, ScratchServiceHandle};
pub use snippet::{SpotlightFrame, build_snippet, clamp_limit, decompose};
pub use spotlight::{SpotlightController, SpotlightDisplay};
pub use wiki::WikiClient;
