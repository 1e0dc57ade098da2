//! CLI definition, routing, and tracing setup.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use stima_core::{Estimate, EstimateOptions, UpdateOutcome, estimate_file};
use stima_shared::{
    AppConfig, OutputConfig, RateConfig, RenderMode, init_config, init_config_at, load_config,
    load_config_from,
};
use tracing::{debug, info, warn};

use crate::clipboard;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// stima — cost and timeline summary for markdown quotes.
#[derive(Parser, Debug)]
#[command(
    name = "stima",
    version,
    about = "Generate an estimate summary from a markdown quote file and insert it into the file.",
    long_about = None,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.stima/stima.toml).
    #[arg(long, global = true, env = "STIMA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub estimate: EstimateArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Options for the default estimate command.
#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Markdown quote file to analyze.
    #[arg(required = true)]
    pub file: Option<PathBuf>,

    /// Minimum hourly rate in euros (config default: 34).
    #[arg(short = 'm', long, value_name = "EUR")]
    pub min_hourly_rate: Option<f64>,

    /// Maximum hourly rate in euros (config default: 36).
    #[arg(short = 'M', long, value_name = "EUR")]
    pub max_hourly_rate: Option<f64>,

    /// Minimum weekly hours (config default: 12).
    #[arg(short = 'w', long, value_name = "HOURS")]
    pub min_weekly_hours: Option<f64>,

    /// Maximum weekly hours (config default: 16).
    #[arg(short = 'W', long, value_name = "HOURS")]
    pub max_weekly_hours: Option<f64>,

    /// Render the final quote with averaged values instead of ranges.
    #[arg(short = 'f', long = "final")]
    pub final_quote: bool,

    /// Write the summary to this file instead of the quote ("-" for stdout only).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not copy the summary to the clipboard.
    #[arg(short = 'c', long)]
    pub no_clipboard: bool,

    /// Do not modify the quote file in place.
    #[arg(short = 'n', long)]
    pub no_update: bool,
}

impl EstimateArgs {
    /// Overlay CLI flags on the configured rates.
    pub(crate) fn rates(&self, base: RateConfig) -> RateConfig {
        RateConfig {
            min_hourly_rate: self.min_hourly_rate.unwrap_or(base.min_hourly_rate),
            max_hourly_rate: self.max_hourly_rate.unwrap_or(base.max_hourly_rate),
            min_weekly_hours: self.min_weekly_hours.unwrap_or(base.min_weekly_hours),
            max_weekly_hours: self.max_weekly_hours.unwrap_or(base.max_weekly_hours),
        }
    }

    pub(crate) fn mode(&self) -> RenderMode {
        if self.final_quote {
            RenderMode::Final
        } else {
            RenderMode::Range
        }
    }

    /// Explicit output file, if any. `-` means stdout.
    fn output_file(&self) -> Option<&Path> {
        self.output.as_deref().filter(|p| *p != Path::new("-"))
    }

    /// The quote is rewritten only when no explicit output was requested.
    fn updates_in_place(&self) -> bool {
        self.output.is_none() && !self.no_update
    }
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout carries
/// the summary.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "stima=warn",
        1 => "stima=info",
        2 => "stima=debug",
        _ => "stima=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(cli.config.as_deref()),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        },
        None => cmd_estimate(&cli.estimate, cli.config.as_deref()),
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn cmd_estimate(args: &EstimateArgs, config_path: Option<&Path>) -> Result<()> {
    let file = args
        .file
        .as_deref()
        .ok_or_else(|| eyre!("missing markdown file to analyze"))?;

    let config = resolve_config(config_path)?;
    let opts = EstimateOptions {
        rates: args.rates(config.rates),
        mode: args.mode(),
    };

    println!("Analyzing file: {}", file.display());
    println!("Minimum hourly rate: €{}", opts.rates.min_hourly_rate);
    println!("Maximum hourly rate: €{}", opts.rates.max_hourly_rate);
    println!("Minimum weekly hours: {}", opts.rates.min_weekly_hours);
    println!("Maximum weekly hours: {}", opts.rates.max_weekly_hours);
    println!();

    let (original, estimate) = estimate_file(file, &opts)?;
    print_phases(&estimate);

    let delivery = deliver(
        args,
        file,
        &original,
        &estimate.summary,
        &config.output,
        &mut std::io::stdout().lock(),
        clipboard::copy,
    )?;
    info!(
        saved_to = ?delivery.saved_to,
        updated = delivery.update.is_ok(),
        copied = matches!(delivery.clipboard, Some(Ok(_))),
        "estimate delivered"
    );
    Ok(())
}

/// What each sink did with the summary.
#[derive(Debug)]
pub(crate) struct Delivery {
    /// Explicit output file that received the summary.
    pub saved_to: Option<PathBuf>,
    /// In-place update of the quote file.
    pub update: stima_shared::Result<UpdateOutcome>,
    /// Clipboard helper that took the summary; `None` when copying is off.
    pub clipboard: Option<stima_shared::Result<String>>,
}

/// Send the summary to stdout or the output file, the quote file, and the
/// clipboard.
///
/// Only a failed write to an explicit output file aborts. A failed in-place
/// update or clipboard copy is logged as a warning and the remaining sinks
/// still run.
pub(crate) fn deliver<W, C>(
    args: &EstimateArgs,
    file: &Path,
    original: &str,
    summary: &str,
    output: &OutputConfig,
    out: &mut W,
    copy: C,
) -> Result<Delivery>
where
    W: Write,
    C: FnOnce(&str, &[String]) -> stima_shared::Result<String>,
{
    let saved_to = match args.output_file() {
        Some(path) => {
            stima_core::write_summary(path, summary)?;
            writeln!(out, "Summary saved to: {}", path.display())?;
            Some(path.to_path_buf())
        }
        None => {
            let rule = "=".repeat(50);
            writeln!(out, "{rule}\nGENERATED SUMMARY:\n{rule}\n{summary}\n")?;
            None
        }
    };

    let no_op = !args.updates_in_place();
    let update = stima_core::update_document(file, original, summary, no_op);
    match &update {
        Ok(UpdateOutcome::Replaced) => writeln!(out, "Summary updated in: {}", file.display())?,
        Ok(UpdateOutcome::Appended) => writeln!(out, "Summary appended to: {}", file.display())?,
        Ok(UpdateOutcome::Skipped) => info!(file = %file.display(), "quote file left unchanged"),
        Err(e) => warn!(error = %e, "quote file not updated"),
    }

    let clipboard = (!args.no_clipboard && output.clipboard)
        .then(|| copy(summary, &output.clipboard_command));
    match &clipboard {
        Some(Ok(helper)) => writeln!(out, "\n✅ Summary copied to clipboard ({helper})!")?,
        Some(Err(e)) => warn!(error = %e, "summary not copied"),
        None => debug!("clipboard copy disabled"),
    }

    Ok(Delivery {
        saved_to,
        update,
        clipboard,
    })
}

fn print_phases(estimate: &Estimate) {
    println!("Found {} phases:", estimate.phases.len());
    for phase in &estimate.phases {
        println!("  - {phase}");
    }
    println!();
}

fn cmd_config_init(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => {
            init_config_at(p)?;
            p.to_path_buf()
        }
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
