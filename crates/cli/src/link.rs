//! `bizlink run|validate|normalize` — config-driven directory matching.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};

use bizlink_linkage::output::{to_csv, to_json};
use bizlink_linkage::{LinkConfig, LinkResult};

use crate::exit_codes::{EXIT_INVALID_CONFIG, EXIT_NO_MATCHES, EXIT_RUNTIME};
use crate::CliError;

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Match the two datasets named in a .link.toml config
    #[command(after_help = "\
Examples:
  bizlink run directory.link.toml
  bizlink run directory.link.toml --output matches.csv
  bizlink run directory.link.toml --json > report.json
  bizlink run directory.link.toml --threshold 90 --report report.json

The match CSV goes to --output, else [output].file from the config, else
stdout. With --json and no CSV file, stdout carries the JSON report only.")]
    Run {
        /// Path to the .link.toml config file
        config: PathBuf,

        /// Write match CSV to file ('-' for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the JSON run report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON run report to file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Override the config's acceptance threshold (0-100)
        #[arg(long, env = "BIZLINK_THRESHOLD")]
        threshold: Option<u8>,

        /// Exit with code 5 when no pair is accepted
        #[arg(long)]
        fail_on_empty: bool,
    },

    /// Validate a .link.toml config without running
    #[command(after_help = "\
Examples:
  bizlink validate directory.link.toml")]
    Validate {
        /// Path to the .link.toml config file
        config: PathBuf,
    },

    /// Print the normalized form of each argument (built-in abbreviations)
    #[command(after_help = "\
Examples:
  bizlink normalize '100 N. Main St.'
  bizlink normalize \"Joe's Pizza\" 'St. Louis'")]
    Normalize {
        /// Text to normalize
        #[arg(required = true)]
        text: Vec<String>,
    },
}

pub fn cmd_link(cmd: LinkCommands) -> Result<(), CliError> {
    match cmd {
        LinkCommands::Run {
            config,
            output,
            json,
            report,
            threshold,
            fail_on_empty,
        } => cmd_run(config, output, json, report, threshold, fail_on_empty),
        LinkCommands::Validate { config } => cmd_validate(config),
        LinkCommands::Normalize { text } => cmd_normalize(text),
    }
}

fn link_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn read_config(config_path: &Path) -> Result<LinkConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| link_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;
    LinkConfig::from_toml(&config_str).map_err(|e| link_err(EXIT_INVALID_CONFIG, e.to_string()))
}

fn read_input(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| link_err(EXIT_RUNTIME, format!("cannot read {}: {e}", path.display())))
}

fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|e| {
        link_err(EXIT_RUNTIME, format!("cannot write {}: {e}", path.display()))
    })?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn cmd_run(
    config_path: PathBuf,
    output: Option<PathBuf>,
    json_output: bool,
    report: Option<PathBuf>,
    threshold: Option<u8>,
    fail_on_empty: bool,
) -> Result<(), CliError> {
    let mut config = read_config(&config_path)?;
    if let Some(t) = threshold {
        config.scoring.threshold = t;
        config
            .validate()
            .map_err(|e| link_err(EXIT_INVALID_CONFIG, e.to_string()))?;
    }

    // Resolve file paths relative to config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let left_csv = read_input(&base_dir.join(&config.left.file))?;
    let right_csv = read_input(&base_dir.join(&config.right.file))?;

    let input = bizlink_linkage::load_input(&config, &left_csv, &right_csv)
        .map_err(|e| link_err(EXIT_RUNTIME, e.to_string()))?;

    let progress = scoring_progress();
    let result = bizlink_linkage::run_with_progress(&config, input, &progress)
        .map_err(|e| link_err(EXIT_RUNTIME, e.to_string()))?;
    progress.finish_and_clear();

    log_exclusions(&result);

    // Match CSV
    let csv = to_csv(&result.matches, &config.left.columns.id, &config.right.columns.id)
        .map_err(|e| link_err(EXIT_RUNTIME, e.to_string()))?;
    let csv_path = output.or_else(|| {
        config.output.file.as_deref().map(|f| {
            let path = Path::new(f);
            if is_stdout(path) {
                path.to_path_buf()
            } else {
                base_dir.join(path)
            }
        })
    });
    match csv_path {
        Some(ref path) if !is_stdout(path) => write_output(path, &csv)?,
        Some(_) => print!("{csv}"),
        None if !json_output => print!("{csv}"),
        None => {}
    }

    // JSON report
    if json_output || report.is_some() {
        let json_str = to_json(&result).map_err(|e| link_err(EXIT_RUNTIME, e.to_string()))?;
        if let Some(ref path) = report {
            write_output(path, &json_str)?;
        }
        if json_output {
            println!("{json_str}");
        }
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "{} left / {} right records: {} candidate pair(s), {} matched, {} below threshold {}",
        s.left.records,
        s.right.records,
        s.candidate_pairs,
        s.accepted,
        s.rejected,
        result.meta.threshold,
    );

    if fail_on_empty && result.matches.is_empty() {
        return Err(link_err(EXIT_NO_MATCHES, "no pair cleared the threshold"));
    }

    Ok(())
}

/// Scoring progress on stderr. Draws nothing when stderr is not a terminal.
fn scoring_progress() -> ProgressBar {
    let progress = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template(
        "  [{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} scoring candidate pairs",
    ) {
        progress.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
    }
    progress
}

/// Region exclusion is policy, reported here rather than inside the engine.
fn log_exclusions(result: &LinkResult) {
    let s = &result.summary;
    for (side, dataset) in [("left", &s.left), ("right", &s.right)] {
        if dataset.excluded_by_region > 0 {
            log::info!(
                "{side}: {} record(s) outside the region allow-list were not matched",
                dataset.excluded_by_region
            );
        }
    }
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let regions = match config.blocking.regions {
        Some(ref list) => list.join(", "),
        None => "all".into(),
    };
    let abbreviations = config
        .abbreviation_table()
        .map_err(|e| link_err(EXIT_INVALID_CONFIG, e.to_string()))?;
    eprintln!(
        "valid: '{}' blocking on {} in regions [{}], threshold {}, {} abbreviation(s)",
        config.name,
        config.blocking.key,
        regions,
        config.scoring.threshold,
        abbreviations.len(),
    );
    Ok(())
}

fn cmd_normalize(text: Vec<String>) -> Result<(), CliError> {
    for t in &text {
        println!("{}", bizlink_linkage::normalize(t));
    }
    Ok(())
}
