//! Directory size measurement.
//!
//! This module walks a directory tree with `walkdir` and sums the sizes of the
//! entries selected by a [`SizePolicy`]. The walk is best-effort: entries that
//! cannot be read are logged, recorded in the returned [`DirSize`], and
//! skipped, so measuring never fails outward.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{SizePolicy, WalkOptions};

/// A problem met while walking, recorded instead of aborting the walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkIssue {
    /// The entry that failed, when the error could be tied to one
    pub path: Option<PathBuf>,

    /// Human-readable description of the failure
    pub message: String,
}

/// Result of measuring one directory tree.
#[derive(Clone, Debug)]
pub struct DirSize {
    /// The root that was measured
    pub root: PathBuf,

    /// Total size in bytes of all counted entries
    pub total: u64,

    /// Number of regular files seen
    pub files: u64,

    /// Number of directories seen below the root
    pub dirs: u64,

    /// Entries skipped because of errors, in walk order
    pub issues: Vec<WalkIssue>,
}

impl DirSize {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            total: 0,
            files: 0,
            dirs: 0,
            issues: Vec::new(),
        }
    }

    /// Whether every entry could be read.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }

    fn record(&mut self, path: Option<&Path>, message: impl Into<String>) {
        let message = message.into();
        match path {
            Some(p) => warn!(path = %p.display(), "skipping entry: {message}"),
            None => warn!("skipping entry: {message}"),
        }

        self.push_issue(path, message);
    }

    fn record_root_failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(root = %self.root.display(), "cannot measure root: {message}");

        let root = self.root.clone();
        self.push_issue(Some(&root), message);
    }

    fn push_issue(&mut self, path: Option<&Path>, message: String) {
        self.issues.push(WalkIssue {
            path: path.map(Path::to_path_buf),
            message,
        });
    }

    fn add_entry(&mut self, entry: &DirEntry, policy: SizePolicy) {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            self.dirs += 1;
        } else if file_type.is_file() {
            self.files += 1;
        }

        let counted = match policy {
            SizePolicy::Files => file_type.is_file(),
            SizePolicy::All => true,
        };
        if !counted {
            return;
        }

        match entry.metadata() {
            Ok(metadata) => self.total = self.total.saturating_add(metadata.len()),
            Err(err) => self.record(Some(entry.path()), err.to_string()),
        }
    }
}

/// Calculate the total size of a directory and all its contents, in bytes.
///
/// Only regular files are counted; directories and symlinks add nothing.
/// Unreadable entries are logged and skipped, and a root that is missing or
/// not a directory yields `0`.
#[must_use]
pub fn calculate_dir_size(path: &Path) -> u64 {
    measure_dir(path, &WalkOptions::default()).total
}

/// Walk `root` and measure it according to `options`.
///
/// The root itself is never counted, only what lies below it. Every failure,
/// including one on the root, ends up in [`DirSize::issues`] and in a `warn`
/// log event; the total covers everything that could be read.
#[must_use]
pub fn measure_dir(root: &Path, options: &WalkOptions) -> DirSize {
    let mut report = DirSize::new(root);

    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            report.record_root_failure("not a directory");
            return report;
        }
        Err(err) => {
            report.record_root_failure(format!("cannot access root: {err}"));
            return report;
        }
    }

    // walkdir raises max_depth to min_depth, so depth 0 must stop here.
    if options.max_depth == Some(0) {
        return report;
    }

    debug!(root = %root.display(), ?options, "measuring directory");

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(options.follow_links);
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    for entry in walker {
        match entry {
            Ok(entry) => report.add_entry(&entry, options.policy),
            Err(err) => report.record(err.path(), err.to_string()),
        }
    }

    debug!(
        root = %root.display(),
        total = report.total,
        files = report.files,
        issues = report.issues.len(),
        "directory measured"
    );

    report
}
