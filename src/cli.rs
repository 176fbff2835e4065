//! Command-line interface definition and argument parsing.
//!
//! This module defines the subcommands and options of the `hexwalk` binary
//! with [clap](https://docs.rs/clap/). Helper methods on the argument structs
//! accept a [`FileConfig`] reference so that config-file values act as
//! defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use hexwalk::config::file::{FileConfig, expand_tilde};
use hexwalk::config::{SizePolicy, WalkOptions};
use hexwalk::hex::LetterCase;

/// Arguments of the `encode` subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Text whose UTF-8 bytes are encoded
    ///
    /// When neither TEXT nor --file is given, stdin is read to the end.
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Encode the raw bytes of this file instead of TEXT
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Use lowercase letters (a-f) instead of uppercase
    #[arg(short = 'l', long)]
    lower: bool,
}

/// Arguments of the `decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex string to decode (letters in either case)
    ///
    /// Surrounding whitespace is ignored. Odd lengths and non-hex characters
    /// are rejected.
    pub hex: String,

    /// Write the decoded bytes to this file instead of printing them
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments of the `size` subcommand.
#[derive(Args, Debug)]
pub struct SizeArgs {
    /// One or more directories to measure
    ///
    /// Defaults to the configured directories, or the current directory.
    #[arg(num_args = 0..)]
    dirs: Vec<PathBuf>,

    /// Which entries contribute to the total
    ///
    /// `files` sums regular files only; `all` also adds the size the
    /// filesystem reports for directories and other entries.
    #[arg(short = 'p', long, value_enum)]
    policy: Option<SizePolicy>,

    /// Follow symbolic links while walking
    #[arg(short = 'L', long)]
    follow_links: bool,

    /// Maximum depth below each directory to descend into
    ///
    /// A value of 1 measures only the immediate children.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log walk progress and every skipped entry in detail
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode bytes as a hexadecimal string
    Encode(EncodeArgs),

    /// Decode a hexadecimal string back into bytes
    Decode(DecodeArgs),

    /// Measure the total size of directory trees
    Size(SizeArgs),

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser, Debug)]
#[command(name = "hexwalk")]
#[command(about = "Hex-encode and decode bytes, and measure directory sizes")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// Human-readable output (colors, spinners) is suppressed; log messages
    /// still go to stderr.
    #[arg(long, global = true)]
    json: bool,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Whether detailed logging was requested.
    ///
    /// Only the `size` command has a verbose mode; the config file can turn it on too.
    #[must_use]
    pub fn verbose(&self, config: &FileConfig) -> bool {
        match &self.command {
            Commands::Size(args) => args.verbose || config.size.verbose.unwrap_or(false),
            _ => false,
        }
    }
}

impl EncodeArgs {
    /// Resolve the letter case.
    ///
    /// The CLI flag (if set) takes priority, then the config file, then uppercase.
    #[must_use]
    pub fn letter_case(&self, config: &FileConfig) -> LetterCase {
        let lower = self.lower || config.hex.lowercase.unwrap_or(false);
        LetterCase::from_uppercase(!lower)
    }
}

impl SizeArgs {
    /// Resolve the directories to measure.
    ///
    /// Priority: CLI arguments > config file `dirs` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn directories(&self, config: &FileConfig) -> Vec<PathBuf> {
        if !self.dirs.is_empty() {
            return self.dirs.clone();
        }

        if let Some(ref dirs) = config.size.dirs
            && !dirs.is_empty()
        {
            return dirs.iter().map(|d| expand_tilde(d)).collect();
        }

        vec![PathBuf::from(".")]
    }

    /// Extract walk options from CLI args and config file.
    ///
    /// - **policy**: CLI > config > `files`
    /// - **`follow_links`**: CLI flag `||` config value `||` `false`
    /// - **`max_depth`**: CLI > config > unlimited
    #[must_use]
    pub fn walk_options(&self, config: &FileConfig) -> WalkOptions {
        let policy = self
            .policy
            .or_else(|| {
                config
                    .size
                    .policy
                    .as_ref()
                    .and_then(|s| SizePolicy::from_str(s, true).ok())
            })
            .unwrap_or_default();

        WalkOptions::default()
            .with_policy(policy)
            .with_follow_links(self.follow_links || config.size.follow_links.unwrap_or(false))
            .with_max_depth(self.max_depth.or(config.size.max_depth))
    }
}
