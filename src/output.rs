//! Structured JSON output for scripting and piping.
//!
//! When the `--json` flag is passed, the CLI serializes one of these
//! structures to stdout instead of printing human-readable text.

use humansize::{DECIMAL, format_size};
use serde::Serialize;

use crate::{
    config::SizePolicy,
    hex::LetterCase,
    utils::{DirSize, WalkIssue},
};

/// JSON output of the `size` command.
#[derive(Serialize, Debug)]
pub struct JsonSizeOutput {
    /// Policy used to pick which entries count (`"files"` or `"all"`).
    pub policy: SizePolicy,

    /// One entry per measured root, in argument order.
    pub roots: Vec<JsonDirEntry>,

    /// Totals across all roots.
    pub summary: JsonSizeSummary,
}

/// A single measured root.
#[derive(Serialize, Debug)]
pub struct JsonDirEntry {
    /// The root path as given.
    pub path: String,

    /// Total size in bytes.
    pub size: u64,

    /// Human-readable formatted size (e.g. `"1.23 GB"`).
    pub size_formatted: String,

    /// Number of regular files seen.
    pub files: u64,

    /// Number of directories seen below the root.
    pub dirs: u64,

    /// Entries that were skipped.
    pub issues: Vec<JsonIssue>,
}

/// A skipped entry.
#[derive(Serialize, Debug)]
pub struct JsonIssue {
    /// Path of the failing entry, or `null` when unknown.
    pub path: Option<String>,

    /// What went wrong.
    pub message: String,
}

/// Aggregated totals for the `size` command.
#[derive(Serialize, Debug)]
pub struct JsonSizeSummary {
    /// Number of roots measured.
    pub total_roots: usize,

    /// Sum of all root sizes in bytes.
    pub total_size: u64,

    /// Human-readable formatted total size.
    pub total_size_formatted: String,

    /// Number of skipped entries across all roots.
    pub total_issues: usize,
}

/// JSON output of the `encode` command.
#[derive(Serialize, Debug)]
pub struct JsonEncodeOutput {
    /// Number of input bytes.
    pub bytes: usize,

    /// `"upper"` or `"lower"`.
    pub case: &'static str,

    /// The encoded text.
    pub hex: String,
}

/// JSON output of the `decode` command.
#[derive(Serialize, Debug)]
pub struct JsonDecodeOutput {
    /// Number of decoded bytes.
    pub bytes: usize,

    /// The decoded bytes as text, or `null` when they are not valid UTF-8.
    pub text: Option<String>,
}

impl JsonSizeOutput {
    /// Build the output for a set of measured roots.
    #[must_use]
    pub fn from_reports(policy: SizePolicy, reports: &[DirSize]) -> Self {
        let total_size = reports.iter().map(|r| r.total).sum();
        let total_issues = reports.iter().map(|r| r.issues.len()).sum();

        Self {
            policy,
            roots: reports.iter().map(JsonDirEntry::from_report).collect(),
            summary: JsonSizeSummary {
                total_roots: reports.len(),
                total_size,
                total_size_formatted: format_size(total_size, DECIMAL),
                total_issues,
            },
        }
    }
}

impl JsonDirEntry {
    /// Convert a [`DirSize`] into a `JsonDirEntry`.
    #[must_use]
    pub fn from_report(report: &DirSize) -> Self {
        Self {
            path: report.root.display().to_string(),
            size: report.total,
            size_formatted: format_size(report.total, DECIMAL),
            files: report.files,
            dirs: report.dirs,
            issues: report.issues.iter().map(JsonIssue::from_issue).collect(),
        }
    }
}

impl JsonIssue {
    /// Convert a [`WalkIssue`] into a `JsonIssue`.
    #[must_use]
    pub fn from_issue(issue: &WalkIssue) -> Self {
        Self {
            path: issue.path.as_ref().map(|p| p.display().to_string()),
            message: issue.message.clone(),
        }
    }
}

impl JsonEncodeOutput {
    /// Describe an encoding of `bytes` input bytes.
    #[must_use]
    pub const fn new(bytes: usize, case: LetterCase, hex: String) -> Self {
        let case = match case {
            LetterCase::Upper => "upper",
            LetterCase::Lower => "lower",
        };

        Self { bytes, case, hex }
    }
}

impl JsonDecodeOutput {
    /// Describe a decoded buffer.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.len(),
            text: std::str::from_utf8(bytes).ok().map(str::to_string),
        }
    }
}
