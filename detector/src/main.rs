use anyhow::Context;
use clap::{Parser, Subcommand};
use detectcore::report::{DetectionReport, FileHandle};
use detectcore::session::{AnalysisSession, PendingSelection};
use detectcore::ReportRenderer;
use generator::PlaceholderProducer;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use workflow::{AnalysisRunner, WorkflowConfig};

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "AI photo detector: analyze an image and export a PDF report")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory the report is written to
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze the first image among FILES and export its report
    Analyze {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Seed the placeholder scorer for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated analysis latency in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Also save the report as JSON next to the PDF
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Re-render a report previously saved as JSON
    Render {
        #[arg(long)]
        report: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = match &args.config {
        Some(path) => WorkflowConfig::load(path)?,
        None => WorkflowConfig::default(),
    };

    match args.command {
        Command::Analyze {
            files,
            seed,
            delay_ms,
            json,
        } => {
            let config = workflow_config.with_overrides(seed, delay_ms, args.out);
            let renderer =
                ReportRenderer::new(config.layout.clone()).context("validating layout config")?;
            let runtime = TokioBuilder::new_multi_thread()
                .enable_all()
                .build()
                .context("creating runtime for analysis")?;
            runtime.block_on(analyze(&config, &renderer, &files, json))
        }
        Command::Render {
            report: report_path,
        } => {
            let config = workflow_config.with_overrides(None, None, args.out);
            let renderer =
                ReportRenderer::new(config.layout.clone()).context("validating layout config")?;
            let report = DetectionReport::load(&report_path)
                .with_context(|| format!("loading report {}", report_path.display()))?;
            export(&config.output_dir, &renderer, &report, false)
        }
    }
}

async fn analyze(
    config: &WorkflowConfig,
    renderer: &ReportRenderer,
    paths: &[PathBuf],
    json: bool,
) -> anyhow::Result<()> {
    // Only names and metadata here; contents are read for the analyzed file alone.
    let handles = paths.iter().filter_map(|path| match FileHandle::probe(path) {
        Ok(handle) => Some(handle),
        Err(err) => {
            warn!("skipping {}: {}", path.display(), err);
            None
        }
    });

    let mut selection = PendingSelection::new();
    if selection.select(handles) == 0 {
        anyhow::bail!("none of the selected files is a readable image");
    }
    let file = selection
        .take_first()
        .context("selection emptied before analysis")?;
    let name = file.name.clone();
    let file = file.load().with_context(|| format!("reading {name}"))?;

    let producer = Arc::new(PlaceholderProducer::new(&config.generator));
    let runner = AnalysisRunner::new(producer, config.generator.delay());
    println!("Analyzing {}... (Ctrl+C to cancel)", file.name);
    let mut task = runner.start(file)?;
    let outcome = tokio::select! {
        result = task.wait() => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };
    let report = match outcome {
        Some(result) => result?,
        None => {
            println!("Cancelling analysis...");
            task.cancel();
            task.wait().await?
        }
    };

    let mut session = AnalysisSession::new();
    session.replace(report)?;
    let current = session.current().context("no current result after analysis")?;
    export(&config.output_dir, renderer, current, json)
}

fn export(
    output_dir: &Path,
    renderer: &ReportRenderer,
    report: &DetectionReport,
    json: bool,
) -> anyhow::Result<()> {
    let document = renderer
        .render(report)
        .with_context(|| format!("rendering report for {}", report.file_name()))?;
    let path = document
        .write_to(output_dir)
        .with_context(|| format!("writing report to {}", output_dir.display()))?;

    println!(
        "{} -> {} ({:.1}% confidence), {} page(s) written to {}",
        report.file_name(),
        report.verdict_label(),
        report.confidence_percent(),
        document.page_count(),
        path.display()
    );

    if json {
        let json_path = path.with_extension("json");
        fs::write(&json_path, report.to_json()?)
            .with_context(|| format!("writing {}", json_path.display()))?;
        println!("Report data saved to {}", json_path.display());
    }

    Ok(())
}
