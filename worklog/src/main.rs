use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, debug};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use worklog::config::Config;
use worklog::core::{BlockId, Journal};
use worklog::duration::format_duration;
use worklog::reconcile::{Report, Severity, process_tasks};
use worklog::storage::{GraphDir, load_journal};

#[derive(Debug, Parser)]
#[command(
    name = "worklog",
    about = "Reconcile logged time in a Logseq daily journal",
    version
)]
struct Cli {
    /// Enable verbose logging for debugging.
    #[arg(long, global = true)]
    verbose: bool,
    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile the day's tasks and print logged time.
    Report(ReportArgs),

    /// Parse the day's journal and print its block tree.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Logseq graph directory (overrides `graph_path` from the config).
    #[arg(long)]
    graph: Option<PathBuf>,
    /// Journal date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
struct ReportArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Minutes of context switching charged per task.
    #[arg(long)]
    switching_cost: Option<u64>,
    /// Emit JSON instead of a human-readable summary.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Emit JSON instead of an indented outline.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Report(args) => handle_report(args, &config),
        Commands::Parse(args) => handle_parse(args, &config),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(err) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("warning: failed to initialise logging: {err}");
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match Config::default_path() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };
    debug!("loading config from {:?}", path);
    Config::load(&path)
}

fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let ReportArgs {
        source,
        switching_cost,
        json,
    } = args;
    let (graph, date) = resolve_source(source, config)?;
    let switching_cost = switching_cost.unwrap_or(config.switching_cost);

    let journal = load_journal(&GraphDir::new(graph), date)?;
    let report = process_tasks(journal, switching_cost);

    if json {
        let output = serde_json::to_string_pretty(&report.summary())
            .context("serializing report to JSON")?;
        println!("{output}");
    } else {
        print!("{}", render_report(&report));
    }

    if report.has_errors() {
        anyhow::bail!(
            "{} task error(s) found in journal for {date}",
            report.errors().count()
        );
    }
    Ok(())
}

fn handle_parse(args: ParseArgs, config: &Config) -> Result<()> {
    let ParseArgs { source, json } = args;
    let (graph, date) = resolve_source(source, config)?;
    let journal = load_journal(&GraphDir::new(graph), date)?;

    if json {
        let output =
            serde_json::to_string_pretty(&journal).context("serializing journal to JSON")?;
        println!("{output}");
    } else {
        print!("{}", render_tree(&journal));
    }
    Ok(())
}

/// Flags win over config; the date defaults to today.
fn resolve_source(source: SourceArgs, config: &Config) -> Result<(PathBuf, NaiveDate)> {
    let graph = match source.graph.or_else(|| config.graph_path.clone()) {
        Some(graph) => graph,
        None => {
            anyhow::bail!("no graph directory given: pass --graph or set graph_path in the config")
        }
    };
    let date = source.date.unwrap_or_else(|| Local::now().date_naive());
    Ok((graph, date))
}

fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Journal {}", report.journal().date());
    for task in report.tasks() {
        let _ = writeln!(
            out,
            "  {:<12} {:>10}  {}",
            task.task.task_id.as_deref().unwrap_or("-"),
            format_duration(task.duration()),
            task.task.description
        );
    }
    let _ = writeln!(
        out,
        "Switching cost: {}",
        format_duration(report.total_switching_cost)
    );
    let _ = writeln!(out, "Total: {}", format_duration(report.total_duration));
    for diagnostic in &report.log {
        let label = match diagnostic.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        let _ = writeln!(out, "{label}: {}", diagnostic.message);
    }
    out
}

fn render_tree(journal: &Journal) -> String {
    let mut out = String::new();
    for line in journal.root().extra_lines() {
        let _ = writeln!(out, "{line}");
    }
    for id in journal.descendants(BlockId::ROOT) {
        let depth = journal.ancestors(id).count() - 1;
        let indent = "\t".repeat(depth);
        let block = journal.block(id);
        let _ = writeln!(out, "{indent}- {}", block.content());
        for (key, value) in block.properties() {
            let _ = writeln!(out, "{indent}  {key}:: {value}");
        }
        if let Some(task) = block.task() {
            for entry in &task.logbook {
                let _ = writeln!(out, "{indent}  {entry}");
            }
        }
        for line in block.extra_lines() {
            let _ = writeln!(out, "{indent}  {line}");
        }
    }
    out
}
