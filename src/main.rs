//! # hexwalk
//!
//! Command-line front end for the `hexwalk` utilities: hex-encode and decode
//! byte buffers, and measure how much data lives under a directory.
//!
//! ## Usage
//!
//! ```bash
//! # Encode text (or a file, or stdin)
//! hexwalk encode "hello"
//! hexwalk encode --file firmware.bin --lower
//!
//! # Decode back to bytes
//! hexwalk decode 68656C6C6F
//!
//! # Measure directories
//! hexwalk size ~/Projects ~/Downloads --policy files
//! ```

mod cli;

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
    process::exit,
    time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use hexwalk::{
    config::FileConfig,
    hex::{decode, encode},
    output::{JsonDecodeOutput, JsonEncodeOutput, JsonSizeOutput},
    utils::{DirSize, measure_dir},
};
use humansize::{DECIMAL, format_size};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

use cli::{Cli, Commands, ConfigCommand, DecodeArgs, EncodeArgs, SizeArgs};

/// Entry point for the hexwalk application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// # Errors
///
/// Returns errors from reading input, invalid hex input, writing output,
/// config file handling, or JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Commands::Config { command } = &args.command {
        return handle_config_command(*command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);
    let progress = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
    init_logging(args.verbose(&file_config), &progress);

    match &args.command {
        Commands::Encode(encode_args) => run_encode(encode_args, &file_config, json_mode),
        Commands::Decode(decode_args) => run_decode(decode_args, json_mode),
        Commands::Size(size_args) => run_size(size_args, &file_config, json_mode, &progress),
        Commands::Config { .. } => Ok(()),
    }
}

// ── Helper functions ────────────────────────────────────────────────────

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` in verbose mode.
/// Log lines suspend `progress` while they are written.
fn init_logging(verbose: bool, progress: &ProgressBar) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(SpinnerAwareStderr(progress.clone()))
        .with_target(false)
        .init();
}

/// Stderr writer that clears the spinner while a log line is written.
#[derive(Clone, Debug)]
struct SpinnerAwareStderr(ProgressBar);

impl Write for SpinnerAwareStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.suspend(|| io::stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.suspend(|| io::stderr().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.suspend(|| io::stderr().flush())
    }
}

impl<'a> MakeWriter<'a> for SpinnerAwareStderr {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

/// Gather the bytes to encode: TEXT, the --file contents, or stdin.
fn read_encode_input(args: &EncodeArgs) -> Result<Vec<u8>> {
    if let Some(text) = &args.text {
        return Ok(text.as_bytes().to_vec());
    }

    if let Some(path) = &args.file {
        return fs::read(path).with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

/// Run the `encode` subcommand.
fn run_encode(args: &EncodeArgs, config: &FileConfig, json_mode: bool) -> Result<()> {
    let data = read_encode_input(args)?;
    let case = args.letter_case(config);
    let hex = encode(&data, case);

    if json_mode {
        let output = JsonEncodeOutput::new(data.len(), case, hex);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{hex}");
    }

    Ok(())
}

/// Run the `decode` subcommand.
fn run_decode(args: &DecodeArgs, json_mode: bool) -> Result<()> {
    let bytes = decode(args.hex.trim())?;

    if let Some(path) = &args.output {
        fs::write(path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if json_mode {
        let output = JsonDecodeOutput::from_bytes(&bytes);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(path) = &args.output {
        println!(
            "{} {}",
            format!("Wrote {} bytes to", bytes.len()).green(),
            path.display()
        );
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&bytes)?;
        if !bytes.ends_with(b"\n") {
            writeln!(stdout)?;
        }
    }

    Ok(())
}

/// Run the `size` subcommand.
fn run_size(
    args: &SizeArgs,
    config: &FileConfig,
    json_mode: bool,
    progress: &ProgressBar,
) -> Result<()> {
    let dirs = args.directories(config);
    let options = args.walk_options(config);

    if !json_mode {
        start_spinner(progress);
    }
    let reports: Vec<DirSize> = dirs
        .iter()
        .map(|dir| {
            progress.set_message(format!("Measuring {}...", dir.display()));
            measure_dir(dir, &options)
        })
        .collect();
    progress.finish_and_clear();

    if json_mode {
        let output = JsonSizeOutput::from_reports(options.policy, &reports);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for report in &reports {
        print_report(report);
    }

    if reports.len() > 1 {
        let total: u64 = reports.iter().map(|r| r.total).sum();
        println!(
            "\n{} {} ({total} bytes)",
            "Total:".bold(),
            format_size(total, DECIMAL).bright_white()
        );
    }

    if reports.iter().all(|r| r.total == 0 && !r.is_complete()) {
        bail!("No directory could be measured");
    }

    Ok(())
}

/// Turn the hidden bar into a visible spinner on stderr.
fn start_spinner(progress: &ProgressBar) {
    progress.set_draw_target(ProgressDrawTarget::stderr());
    progress.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
}

/// Print one measured root in human-readable form.
fn print_report(report: &DirSize) {
    println!(
        "{} {} ({} bytes, {} files)",
        format!("{}:", report.root.display()).bold(),
        format_size(report.total, DECIMAL).bright_white(),
        report.total,
        report.files
    );

    if !report.is_complete() {
        println!(
            "  {}",
            format!("{} entries skipped (see warnings above)", report.issues.len()).yellow()
        );
    }
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# hexwalk configuration
# All values shown are their defaults. Uncomment and change as needed.

[hex]
# Encode with lowercase a-f instead of uppercase A-F
# lowercase = false

[size]
# Directories to measure when none are given (defaults to the current directory)
# dirs = ["."]

# Which entries count: "files" (regular files only) or "all" (directories too)
# policy = "files"

# Follow symbolic links while walking
# follow_links = false

# Maximum depth below each directory (unset = unlimited)
# max_depth = 8

# Log walk progress and every skipped entry
# verbose = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let dirs = match config.size.dirs.as_deref() {
        Some(v) if !v.is_empty() => {
            let items: Vec<String> = v.iter().map(|p| format!("\"{}\"", p.display())).collect();
            format!("[{}]", items.join(", "))
        }
        _ => "[\".\"]  (default)".to_string(),
    };

    format!(
        "\
[hex]
lowercase    = {lowercase}

[size]
dirs         = {dirs}
policy       = {policy}
follow_links = {follow_links}
max_depth    = {max_depth}
verbose      = {verbose}",
        lowercase = show_bool(config.hex.lowercase, false),
        policy = config
            .size
            .policy
            .as_deref()
            .map_or_else(|| "\"files\"  (default)".to_string(), |v| format!("\"{v}\"")),
        follow_links = show_bool(config.size.follow_links, false),
        max_depth = config
            .size
            .max_depth
            .map_or_else(|| "unlimited  (default)".to_string(), |v| v.to_string()),
        verbose = show_bool(config.size.verbose, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    write_template(&path)
}

/// Write [`CONFIG_TEMPLATE`] to `path`, leaving an existing file untouched.
fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory {}", parent.display())
        })?;
    }

    fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexwalk::config::file::FileSizeConfig;

    #[test]
    fn test_config_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();

        assert!(config.hex.lowercase.is_none());
        assert!(config.size.policy.is_none());
        assert!(config.size.dirs.is_none());
    }

    #[test]
    fn test_format_config_defaults() {
        let text = format_config(&FileConfig::default());

        assert!(text.contains("lowercase    = false  (default)"));
        assert!(text.contains("policy       = \"files\"  (default)"));
        assert!(text.contains("max_depth    = unlimited  (default)"));
    }

    #[test]
    fn test_format_config_values() {
        let config = FileConfig {
            size: FileSizeConfig {
                dirs: Some(vec!["/data".into()]),
                policy: Some("all".to_string()),
                max_depth: Some(3),
                ..FileSizeConfig::default()
            },
            ..FileConfig::default()
        };
        let text = format_config(&config);

        assert!(text.contains("dirs         = [\"/data\"]"));
        assert!(text.contains("policy       = \"all\""));
        assert!(text.contains("max_depth    = 3"));
    }

    #[test]
    fn test_spinner_aware_writer_shares_bar() {
        let progress = ProgressBar::hidden();
        let make = SpinnerAwareStderr(progress.clone());

        let mut writer = make.make_writer();
        writer.0.set_message("walking");
        assert_eq!(progress.message(), "walking");

        writer.write_all(b"").unwrap();
        writer.flush().unwrap();
    }

    #[test]
    fn test_write_template_creates_and_preserves() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        write_template(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);

        fs::write(&path, "[hex]\nlowercase = true\n").unwrap();
        write_template(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[hex]\nlowercase = true\n"
        );
    }
}
