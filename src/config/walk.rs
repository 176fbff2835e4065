//! Walk configuration for directory size measurement.
//!
//! This module defines the options that control how a directory tree is
//! traversed and which entries contribute to the measured total.

use clap::ValueEnum;
use serde::Serialize;

/// Which entries contribute to a directory's measured size.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePolicy {
    /// Sum the lengths of regular files only
    ///
    /// Directories, symlinks and special files add nothing. This is the
    /// stable answer to "how much data lives under this path".
    #[default]
    Files,

    /// Sum the filesystem-reported length of every entry, directories included
    All,
}

/// Configuration for directory walking behavior.
///
/// The defaults measure regular files only, never follow symlinks, and
/// descend without a depth limit.
#[derive(Clone, Debug, Default)]
pub struct WalkOptions {
    /// Which entries are counted
    pub policy: SizePolicy,

    /// Whether symlinks are followed instead of being counted as links
    pub follow_links: bool,

    /// Maximum depth below the root to descend into (None = unlimited)
    pub max_depth: Option<usize>,
}

impl WalkOptions {
    /// Use the given size policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: SizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Follow (or stop following) symlinks.
    #[must_use]
    pub const fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Limit how deep below the root the walk descends.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
