//! Analysis Pipeline
//! Runs preparation, cleaning, exploration and visualization in order and
//! stops at the first stage that fails.

use crate::charts::{ChartData, ChartError, StaticChartRenderer};
use crate::config::AnalysisConfig;
use crate::data::{
    ensure_dir, write_csv, write_text, CleanerError, CleaningSummary, DataCleaner, DataLoader,
    Dataset, ExportError, LoaderError,
};
use crate::menu::{ConsoleMenu, MenuError, ReadLine};
use crate::report::{banner, ReportWriter};
use crate::stats::{AggregateReport, StatsCalculator, StatsError};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

/// Lines of the report echoed to the console before the save prompt.
const REPORT_PREVIEW_LINES: usize = 50;
const SAMPLE_ROWS: usize = 3;

/// One step of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preparation,
    Cleaning,
    Exploration,
    Visualization,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Preparation => "DATA PREPARATION",
            Stage::Cleaning => "DATA CLEANING",
            Stage::Exploration => "DATA EXPLORATION",
            Stage::Visualization => "DATA VISUALIZATION",
        }
    }

    /// Hints printed when the stage fails.
    pub fn troubleshooting_tips(self) -> &'static [&'static str] {
        match self {
            Stage::Preparation => &[
                "Check that the input path is correct",
                "Ensure netflix_data.csv exists in the input folder",
                "Verify you have read/write permissions",
            ],
            Stage::Cleaning => &[
                "Verify the input data structure hasn't changed",
                "Check for unexpected null values",
            ],
            Stage::Exploration => &[
                "Verify the cleaned data structure",
                "Check for unexpected values in key columns",
            ],
            Stage::Visualization => &[
                "Check that a sans-serif system font is installed",
                "Verify the data contains expected columns",
                "Make sure the output folder is writable",
            ],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Underlying cause of a stage failure.
#[derive(Error, Debug)]
pub enum StageFailure {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] CleanerError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Menu(#[from] MenuError),
}

#[derive(Error, Debug)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: StageFailure,
}

impl StageError {
    fn tag<E: Into<StageFailure>>(stage: Stage) -> impl FnOnce(E) -> StageError {
        move |e| StageError {
            stage,
            source: e.into(),
        }
    }

    /// Console diagnostic with the stage's troubleshooting tips.
    pub fn diagnostic(&self) -> String {
        let mut out = banner(&format!("{} ERROR", self.stage));
        out.push_str(&format!("\n\nError occurred: {}\n", self.source));
        out.push_str("\nTroubleshooting tips:\n");
        for tip in self.stage.troubleshooting_tips() {
            out.push_str(&format!("- {tip}\n"));
        }
        out
    }
}

/// Answers the yes/no questions asked between stages.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Fixed answer for every question.
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _question: &str) -> bool {
        self.0
    }
}

/// Asks on the console; only "yes" or "y" count as yes.
pub struct ConsoleConfirm<R, W> {
    input: R,
    output: W,
}

impl ConsoleConfirm<io::Stdin, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: ReadLine, W: Write> ConsoleConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: ReadLine, W: Write> Confirm for ConsoleConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if write!(self.output, "\n{question} (yes/no): ")
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"),
            Err(e) => {
                warn!(error = %e, "could not read answer, assuming no");
                false
            }
        }
    }
}

/// Asks for a folder on the console; an empty answer takes the fallback.
pub struct PathPrompt<R, W> {
    input: R,
    output: W,
}

impl PathPrompt<io::Stdin, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: ReadLine, W: Write> PathPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn ask(&mut self, question: &str, fallback: &Path) -> io::Result<PathBuf> {
        write!(self.output, "{question} [{}]: ", fallback.display())?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        match answer.trim() {
            "" => Ok(fallback.to_path_buf()),
            path => Ok(PathBuf::from(path)),
        }
    }
}

/// How the visualization stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// No charts.
    Skip,
    /// Write all six charts without a menu.
    SaveAll,
    /// Ask first, then run the genre and rating menus.
    Interactive,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// CSV file, or a folder holding the configured input file.
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub charts: ChartMode,
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: usize,
    pub cleaning: CleaningSummary,
    pub report: AggregateReport,
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
}

pub struct Pipeline<'a> {
    config: AnalysisConfig,
    options: RunOptions,
    confirm: &'a mut dyn Confirm,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: AnalysisConfig, options: RunOptions, confirm: &'a mut dyn Confirm) -> Self {
        Self {
            config,
            options,
            confirm,
        }
    }

    /// Run every stage; the first failure is logged and returned.
    pub fn run(&mut self) -> Result<RunSummary, StageError> {
        self.run_stages().map_err(|e| {
            error!(stage = %e.stage, error = %e.source, "stage failed");
            e
        })
    }

    fn run_stages(&mut self) -> Result<RunSummary, StageError> {
        let mut written = Vec::new();

        println!("\nSTEP 1: DATA PREPARATION");
        let mut dataset = self
            .prepare(&mut written)
            .map_err(StageError::tag(Stage::Preparation))?;

        println!("\nSTEP 2: DATA CLEANING");
        let cleaning = self
            .clean(&mut dataset, &mut written)
            .map_err(StageError::tag(Stage::Cleaning))?;

        println!("\nSTEP 3: DATA EXPLORATION");
        let report = self
            .explore(&dataset, &mut written)
            .map_err(StageError::tag(Stage::Exploration))?;

        self.visualize(&report, &mut written)
            .map_err(StageError::tag(Stage::Visualization))?;

        Ok(RunSummary {
            records: dataset.len(),
            cleaning,
            report,
            written,
        })
    }

    fn output_path(&self, name: &str) -> PathBuf {
        self.options.output_dir.join(name)
    }

    fn prepare(&mut self, written: &mut Vec<PathBuf>) -> Result<Dataset, StageFailure> {
        println!("{}", banner("DATA PREPARATION PHASE"));

        if !self.options.output_dir.exists() {
            ensure_dir(&self.options.output_dir)?;
            println!("\nCreated output folder at: {}", self.options.output_dir.display());
        }

        let loader = DataLoader::new(self.config.outputs.input_file.clone());
        let input = loader.resolve_path(&self.options.input)?;
        println!("\nLoading Netflix data from: {}", input.display());
        let dataset = loader.load_csv(&input)?;
        info!(records = dataset.len(), columns = dataset.field_names().len(), "data loaded");

        if self
            .confirm
            .confirm("Would you like to save the renamed version of the data?")
        {
            let path = self.output_path(&self.config.outputs.raw_copy);
            write_csv(&dataset, &path)?;
            println!("\nSuccessfully saved renamed data to:\n  {}", path.display());
            written.push(path);
        }

        println!("\nSample of the loaded data (first {SAMPLE_ROWS} rows):");
        println!("{}", dataset.head(SAMPLE_ROWS));
        Ok(dataset)
    }

    fn clean(
        &mut self,
        dataset: &mut Dataset,
        written: &mut Vec<PathBuf>,
    ) -> Result<CleaningSummary, StageFailure> {
        println!("{}", banner("DATA CLEANING PHASE"));

        println!("\nMissing values per column:");
        let missing: Vec<(String, usize)> = dataset
            .null_counts()
            .into_iter()
            .filter(|(_, n)| *n > 0)
            .collect();
        if missing.is_empty() {
            println!("  (none)");
        }
        for (column, nulls) in &missing {
            println!("  {column:<15} {nulls}");
        }

        let cleaner = DataCleaner::new(self.config.sentinels.clone());
        let summary = cleaner.clean(dataset)?;

        println!("\nCompleted cleaning operations:");
        for field in &summary.fields {
            println!(
                "- {}: filled {} missing value(s) with '{}'",
                field.field,
                field.before - field.after,
                field.sentinel
            );
        }
        info!(filled = summary.total_filled(), "missing values imputed");

        println!("\nMissing values after cleaning:");
        for (column, nulls) in dataset.null_counts() {
            println!("  {column:<15} {nulls}");
        }

        if self.confirm.confirm("Would you like to save the cleaned data?") {
            let path = self.output_path(&self.config.outputs.cleaned_copy);
            write_csv(dataset, &path)?;
            println!("\nSuccessfully saved cleaned data to:\n  {}", path.display());
            written.push(path);
        }

        println!("\nSample of cleaned data (first {SAMPLE_ROWS} rows):");
        println!("{}", dataset.head(SAMPLE_ROWS));
        Ok(summary)
    }

    fn explore(
        &mut self,
        dataset: &Dataset,
        written: &mut Vec<PathBuf>,
    ) -> Result<AggregateReport, StageFailure> {
        println!("{}", banner("DATA EXPLORATION PHASE"));

        let report = StatsCalculator::compute_report(dataset, &self.config)?;
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let text = ReportWriter::render(&report, &generated_at);

        println!();
        for line in text.lines().take(REPORT_PREVIEW_LINES) {
            println!("{line}");
        }
        if text.lines().count() > REPORT_PREVIEW_LINES {
            println!("\n... (additional report content available in saved file) ...");
        }

        if self
            .confirm
            .confirm("Would you like to save the full analysis report?")
        {
            let path = self.output_path(&self.config.outputs.report);
            write_text(&text, &path)?;
            println!("\nSuccessfully saved analysis report to:\n  {}", path.display());
            written.push(path);
        }

        Ok(report)
    }

    fn visualize(
        &mut self,
        report: &AggregateReport,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), StageFailure> {
        let viz_dir = self.output_path(&self.config.outputs.visualizations_dir);
        let charts = [ChartData::genres(report), ChartData::ratings(report)];

        match self.options.charts {
            ChartMode::Skip => {
                info!("chart stage skipped");
                return Ok(());
            }
            ChartMode::SaveAll => {
                println!("\nSTEP 4: DATA VISUALIZATION");
                ensure_dir(&viz_dir)?;
                for data in &charts {
                    written.extend(StaticChartRenderer::render_all(data, &viz_dir)?);
                }
            }
            ChartMode::Interactive => {
                if !self
                    .confirm
                    .confirm("Would you like to create visualizations?")
                {
                    return Ok(());
                }
                println!("\nSTEP 4: DATA VISUALIZATION");
                let mut menu = ConsoleMenu::stdio(&viz_dir);
                let last = charts.len() - 1;
                for (i, data) in charts.iter().enumerate() {
                    let outcome = menu.run(data, i == last)?;
                    written.extend(outcome.saved);
                }
            }
        }

        println!("\n{}", banner("VISUALIZATION COMPLETE"));
        println!("\nFiles saved to: {}", viz_dir.display());
        Ok(())
    }
}

/// Resolve `--output`, defaulting to the input's folder.
pub fn default_output_dir(input: &Path) -> PathBuf {
    if input.is_dir() {
        input.to_path_buf()
    } else {
        input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
