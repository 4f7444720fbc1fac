//! risk-audit - Pattern-Based Risk Audit CLI
//!
//! Scans files or directories with the built-in signature registry and
//! renders findings as text, JSON, or SARIF.

use clap::{Parser, Subcommand, ValueEnum};
use risk_audit::{
    fix::{format_suggestions_as_patch, propose_fixes_for_file},
    mcp::McpServer,
    reporter::{create_reporter, BarStyle, IconSet, OutputFormat, SarifReporter, Reporter, TextReporter},
    RuleFilterConfig, RuleRegistry, ScanConfig, ScanResult, ScanStats, Scanner, Severity,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Pattern-based source code risk auditor
#[derive(Parser)]
#[command(name = "risk-audit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormatArg {
    Text,
    Json,
    Sarif,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum StyleArg {
    Ascii,
    Unicode,
}

#[derive(ValueEnum, Clone, Copy)]
enum IconsArg {
    Ascii,
    Emoji,
}

#[derive(ValueEnum, Clone, Copy)]
enum SeverityArg {
    Low,
    Medium,
    Critical,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Low => Severity::Low,
            SeverityArg::Medium => Severity::Medium,
            SeverityArg::Critical => Severity::Critical,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file or directory
    Scan {
        /// File or directory to scan
        target: PathBuf,

        /// Output format
        #[arg(short = 'f', long, default_value = "text")]
        format: OutputFormatArg,

        /// Bar style for text output
        #[arg(long, default_value = "ascii")]
        style: StyleArg,

        /// Icon set for text output
        #[arg(long, default_value = "ascii")]
        icons: IconsArg,

        /// Show rule ids in text output
        #[arg(long)]
        show_ids: bool,

        /// Disable colors in text output
        #[arg(long)]
        no_color: bool,

        /// Write findings as SARIF JSON to a file
        #[arg(long)]
        sarif: Option<PathBuf>,

        /// Print dry-run patch suggestions for quick fixes
        #[arg(long)]
        propose_fixes: bool,

        /// Minimum severity to report
        #[arg(long)]
        min_severity: Option<SeverityArg>,

        /// Rule ids to enable (restricts the registry when non-empty)
        #[arg(long)]
        enable: Vec<String>,

        /// Rule ids to disable
        #[arg(long)]
        disable: Vec<String>,

        /// Substrings a path must contain to be scanned
        #[arg(long)]
        include: Vec<String>,

        /// Substrings that exclude a path from scanning
        #[arg(long)]
        exclude: Vec<String>,
    },

    /// List the active scanning rules as JSON
    Rules,

    /// Start the MCP server over stdio
    Mcp,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 if cli.quiet => Level::ERROR,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level.to_string())),
        )
        .init();

    match cli.command {
        Commands::Scan {
            target,
            format,
            style,
            icons,
            show_ids,
            no_color,
            sarif,
            propose_fixes,
            min_severity,
            enable,
            disable,
            include,
            exclude,
        } => {
            if !target.exists() {
                anyhow::bail!("scan target not found: {}", target.display());
            }

            let root = if target.is_dir() {
                target.clone()
            } else {
                target
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            };

            // rc-file configuration, overridden by CLI flags
            let mut config = ScanConfig::discover(&root).unwrap_or_default();
            if let Some(floor) = min_severity {
                config.severity_min = Some(floor.into());
            }
            if !enable.is_empty() || !disable.is_empty() {
                let filters = config.rules.get_or_insert_with(RuleFilterConfig::default);
                filters.enable.extend(enable);
                filters.disable.extend(disable);
            }

            let scanner = Scanner::new(&root, Some(config));

            let start = Instant::now();
            let result = if target.is_dir() {
                scanner.scan_project(
                    &target,
                    (!include.is_empty()).then_some(include.as_slice()),
                    (!exclude.is_empty()).then_some(exclude.as_slice()),
                )?
            } else {
                let findings = scanner.scan_file(&target);
                ScanResult {
                    findings,
                    stats: ScanStats {
                        files_scanned: 1,
                        duration_ms: start.elapsed().as_millis() as u64,
                    },
                }
            };

            let report = match OutputFormat::from(format) {
                OutputFormat::Text => {
                    let mut reporter = TextReporter::new()
                        .with_style(match style {
                            StyleArg::Ascii => BarStyle::Ascii,
                            StyleArg::Unicode => BarStyle::Unicode,
                        })
                        .with_icons(match icons {
                            IconsArg::Ascii => IconSet::Ascii,
                            IconsArg::Emoji => IconSet::Emoji,
                        })
                        .with_rule_ids(show_ids);
                    if no_color {
                        reporter = reporter.without_colors();
                    }
                    reporter.generate(&result)
                }
                other => create_reporter(other).generate(&result),
            };
            println!("{}", report);

            if let Some(ref sarif_path) = sarif {
                let document = SarifReporter::new().generate(&result);
                std::fs::write(sarif_path, document)?;
                info!("SARIF report written to {}", sarif_path.display());
            }

            if propose_fixes {
                let suggestions = if target.is_dir() {
                    top_finding_files(&result, 5)
                        .iter()
                        .flat_map(|file| propose_fixes_for_file(Path::new(file)))
                        .collect()
                } else {
                    propose_fixes_for_file(&target)
                };
                println!("\nProposed changes (dry-run):");
                println!("{}", format_suggestions_as_patch(&suggestions));
            }

            // exit code 0 regardless of findings count; failures above are
            // the only non-zero paths
            Ok(())
        }

        Commands::Rules => {
            let registry = RuleRegistry::load(None, Vec::new());
            println!("{}", serde_json::to_string_pretty(registry.rules())?);
            Ok(())
        }

        Commands::Mcp => {
            let server = McpServer::new();
            server.run().await?;
            Ok(())
        }
    }
}

/// Files with the most findings, for targeted fix proposals.
fn top_finding_files(result: &ScanResult, limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for finding in &result.findings {
        if let Some(ref file) = finding.file {
            *counts.entry(file).or_default() += 1;
        }
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(file, _)| file.to_string())
        .collect()
}
