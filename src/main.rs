// Mon Oct 19 2026 - Alex

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use heapgraph::{
    config::{Config, DemanglerKind},
    graph::render_png,
    pipeline::{self, PipelineOutput},
    symbol::SymbolSource,
    utils::{self, LoggingUtils},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Turns a heap profile into a call graph of in-use memory", long_about = None)]
#[command(override_usage = "heapgraph [OPTIONS] [BINARY] <PROFILE>")]
struct Args {
    /// Executable to read symbols from, followed by the heap profile
    #[arg(required = true, num_args = 1..=2, value_name = "FILES")]
    inputs: Vec<PathBuf>,

    /// Symbol map file ("<hex addr> <decimal size> <name>" per line) instead of a binary
    #[arg(long, value_name = "MAP")]
    syms: Option<PathBuf>,

    /// Write DOT here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also render the graph to a PNG through the rasterizer
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// Write per-node sizes and graph counts as JSON
    #[arg(long, value_name = "FILE")]
    sizes_json: Option<PathBuf>,

    /// How many of the largest nodes to keep
    #[arg(long)]
    nodes: Option<usize>,

    /// Drop extra edges lighter than this many kilobytes
    #[arg(long)]
    min_edge_kb: Option<u64>,

    #[arg(long, value_enum)]
    demangler: Option<DemanglerKind>,

    /// Show undecoded trailing text after demangled names
    #[arg(long)]
    leftover: bool,

    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn symbol_source(&self) -> Result<(SymbolSource, PathBuf)> {
        match (&self.syms, self.inputs.as_slice()) {
            (Some(map), [profile]) => Ok((SymbolSource::MapFile(map.clone()), profile.clone())),
            (None, [binary, profile]) => Ok((SymbolSource::Binary(binary.clone()), profile.clone())),
            (Some(_), _) => bail!("with --syms, pass only the profile"),
            (None, _) => bail!("expected a binary and a profile (or --syms MAP and a profile)"),
        }
    }

    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(nodes) = self.nodes {
            config = config.with_keep_count(nodes);
        }
        if let Some(kb) = self.min_edge_kb {
            config = config.with_min_edge_kb(kb);
        }
        if let Some(kind) = self.demangler {
            config = config.with_demangler(kind);
        }
        if self.leftover {
            config = config.with_leftover(true);
        }

        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }
}

fn main() {
    let args = Args::parse();

    LoggingUtils::init(LoggingUtils::resolve_level(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let (source, profile_path) = args.symbol_source()?;
    let config = args.config()?;

    status(args, &format!("Profile: {}", profile_path.display()));
    status(args, &format!("Symbols: {}", source.path().display()));

    let spinner = spinner(args);
    spinner.set_message("Loading profile and symbols...");

    let (result, elapsed) = utils::measure_time(|| -> Result<PipelineOutput> {
        let (profile, symbols) = pipeline::load_inputs(&profile_path, &source)?;
        spinner.set_message("Building call graph...");
        pipeline::run_with(&config, profile, &symbols)
    });
    spinner.finish_and_clear();
    let output = result?;

    write_dot(args, &output.dot)?;

    if let Some(png) = &args.png {
        render_png(&output.dot, png, &config.rasterizer_program)
            .with_context(|| format!("Failed to render {}", png.display()))?;
        done(args, &format!("PNG written to: {}", png.display()));
    }

    if let Some(path) = &args.sizes_json {
        output
            .stats
            .write_json(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        done(args, &format!("Node sizes written to: {}", path.display()));
    }

    print_summary(args, &output, elapsed);
    Ok(())
}

fn write_dot(args: &Args, dot: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writer.write_all(dot.as_bytes())?;
            writer.flush()?;
            done(args, &format!("Graph written to: {}", path.display()));
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(dot.as_bytes())?;
            lock.flush()?;
        }
    }
    Ok(())
}

fn spinner(args: &Args) -> ProgressBar {
    if args.quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn status(args: &Args, message: &str) {
    if !args.quiet {
        eprintln!("{} {}", "[*]".blue(), message);
    }
}

fn done(args: &Args, message: &str) {
    if !args.quiet {
        eprintln!("{} {}", "[+]".green(), message);
    }
}

fn print_summary(args: &Args, output: &PipelineOutput, elapsed: Duration) {
    if args.quiet {
        return;
    }
    let report = &output.report;

    eprintln!("{}", "-".repeat(40).cyan());
    done(
        args,
        &format!(
            "{} over {} ({} referenced)",
            utils::pluralize(report.stack_count, "stack", "stacks"),
            utils::pluralize(report.symbol_count, "symbol", "symbols"),
            report.resolved_symbols
        ),
    );
    done(
        args,
        &format!(
            "Graph: {}, {}; drawn: {}, {}",
            utils::pluralize(report.node_count, "node", "nodes"),
            utils::pluralize(report.edge_count, "edge", "edges"),
            report.shown_nodes,
            report.shown_edges
        ),
    );
    done(
        args,
        &format!(
            "Shown {} ({:.1}% of total), not shown {}",
            utils::format_kilobytes(report.shown_bytes),
            utils::percentage(report.shown_bytes, report.total_bytes),
            utils::format_kilobytes(report.missing_bytes)
        ),
    );
    if report.missing_bytes > 0 {
        eprintln!(
            "{} {} of kept nodes had no edges and were left out",
            "[!]".yellow(),
            utils::format_kilobytes(report.missing_bytes)
        );
    }
    done(args, &format!("Done in {}", utils::format_duration(elapsed)));
}
