//! CLI definition and pipeline orchestration.
//!
//! With no arguments the run compares NVDA against the S&P 500 over the
//! trailing five years and writes `Project1_NVDA_Analysis.xlsx`.

use chrono::{Local, NaiveDate};
use clap::Parser;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::xlsx_report_adapter::XlsxReportAdapter;
use crate::adapters::yahoo_adapter::{DEFAULT_BASE_URL, YahooAdapter};
use crate::domain::analysis::{
    AnalysisConfig, ComparisonTable, DEFAULT_BENCHMARK, DEFAULT_BENCHMARK_LABEL, DEFAULT_STOCK,
    TrailingWindow,
};
use crate::domain::chart::ChartSpec;
use crate::domain::config_validation::{
    self, validate_analysis_config, validate_source_config,
};
use crate::domain::error::StockbenchError;
use crate::domain::metrics::SummaryStats;
use crate::domain::price_bar::PriceField;
use crate::domain::price_series::{PriceSeries, align};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug, Default)]
#[command(
    name = "stockbench",
    about = "Compare a stock's growth against a benchmark index and export it to Excel"
)]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Stock ticker
    #[arg(long)]
    pub stock: Option<String>,
    /// Benchmark ticker
    #[arg(long)]
    pub benchmark: Option<String>,
    /// Benchmark display name used in the chart title
    #[arg(long)]
    pub benchmark_label: Option<String>,
    /// Trailing window length in years
    #[arg(long)]
    pub years: Option<u32>,
    /// Price field: adjusted or close
    #[arg(long)]
    pub price_field: Option<String>,
    /// Read prices from <SYMBOL>.csv files in this directory instead of Yahoo
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Output workbook path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Validate configuration and print the plan without fetching
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Command-line values keyed by `(section, key)`, shadowing the INI file.
    pub fn overrides(&self) -> HashMap<(String, String), String> {
        let mut map = HashMap::new();
        let mut set = |section: &str, key: &str, value: String| {
            map.insert((section.to_string(), key.to_string()), value);
        };

        if let Some(v) = &self.stock {
            set("analysis", "stock", v.clone());
        }
        if let Some(v) = &self.benchmark {
            set("analysis", "benchmark", v.clone());
        }
        if let Some(v) = &self.benchmark_label {
            set("analysis", "benchmark_label", v.clone());
        }
        if let Some(v) = self.years {
            set("analysis", "years", v.to_string());
        }
        if let Some(v) = &self.price_field {
            set("analysis", "price_field", v.clone());
        }
        if let Some(dir) = &self.data_dir {
            set("source", "provider", "csv".to_string());
            set("source", "data_dir", dir.display().to_string());
        }
        if let Some(path) = &self.output {
            set("output", "path", path.display().to_string());
        }
        map
    }
}

/// A [`ConfigPort`] whose explicit values shadow a base configuration.
pub struct LayeredConfig<'a> {
    base: &'a dyn ConfigPort,
    overrides: HashMap<(String, String), String>,
}

impl<'a> LayeredConfig<'a> {
    pub fn new(base: &'a dyn ConfigPort, overrides: HashMap<(String, String), String>) -> Self {
        Self { base, overrides }
    }

    fn lookup(&self, section: &str, key: &str) -> Option<&String> {
        self.overrides.get(&(section.to_string(), key.to_string()))
    }
}

impl ConfigPort for LayeredConfig<'_> {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.lookup(section, key)
            .cloned()
            .or_else(|| self.base.get_string(section, key))
    }
}

/// Where daily prices come from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Yahoo { base_url: String, timeout: Duration },
    Csv { data_dir: PathBuf },
}

impl DataSource {
    pub fn name(&self) -> &'static str {
        match self {
            DataSource::Yahoo { .. } => "yahoo",
            DataSource::Csv { .. } => "csv",
        }
    }

    pub fn connect(&self) -> Result<Box<dyn PriceDataPort>, StockbenchError> {
        let port: Box<dyn PriceDataPort> = match self {
            DataSource::Yahoo { base_url, timeout } => {
                Box::new(YahooAdapter::new(base_url, *timeout)?)
            }
            DataSource::Csv { data_dir } => Box::new(CsvAdapter::new(data_dir.clone())),
        };
        Ok(port)
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Resolve configuration and run either the dry-run plan or the full pipeline.
pub fn execute(cli: &Cli) -> Result<(), StockbenchError> {
    let base = load_config(cli.config.as_ref())?;
    let config = LayeredConfig::new(&base, cli.overrides());

    validate_analysis_config(&config)?;
    validate_source_config(&config)?;

    let analysis = build_analysis_config(&config)?;
    let source = build_data_source(&config)?;
    let today = Local::now().date_naive();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.dry_run {
        write!(out, "{}", format_plan(&analysis, &source, today))?;
        return Ok(());
    }

    let data_port = source.connect()?;
    run_pipeline(
        data_port.as_ref(),
        &XlsxReportAdapter::new(),
        &analysis,
        today,
        &mut out,
    )?;
    Ok(())
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, StockbenchError> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| StockbenchError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Resolve the analysis parameters. Expects a configuration that already
/// passed [`validate_analysis_config`].
pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, StockbenchError> {
    let stock = config
        .get_string_or("analysis", "stock", DEFAULT_STOCK)
        .to_uppercase();
    let benchmark = config
        .get_string_or("analysis", "benchmark", DEFAULT_BENCHMARK)
        .to_uppercase();
    let benchmark_label =
        config.get_string_or("analysis", "benchmark_label", DEFAULT_BENCHMARK_LABEL);

    let years = config_validation::years(config)?;

    let price_field = match config.get_string("analysis", "price_field") {
        Some(raw) => raw
            .parse::<PriceField>()
            .map_err(|reason| StockbenchError::invalid("analysis", "price_field", reason))?,
        None => PriceField::default(),
    };

    let output_path = config
        .get_string("output", "path")
        .map(|p| PathBuf::from(p.trim()))
        .unwrap_or_else(|| AnalysisConfig::default_output_path(&stock));

    Ok(AnalysisConfig {
        stock,
        benchmark,
        benchmark_label,
        window: TrailingWindow::new(years),
        price_field,
        output_path,
    })
}

pub fn build_data_source(config: &dyn ConfigPort) -> Result<DataSource, StockbenchError> {
    let provider = config.get_string_or("source", "provider", "yahoo");
    if provider.eq_ignore_ascii_case("csv") {
        return Ok(DataSource::Csv {
            data_dir: PathBuf::from(config.get_string_or("source", "data_dir", ".")),
        });
    }
    Ok(DataSource::Yahoo {
        base_url: config.get_string_or("source", "base_url", DEFAULT_BASE_URL),
        timeout: Duration::from_secs(config_validation::timeout_secs(config)?),
    })
}

pub fn format_plan(analysis: &AnalysisConfig, source: &DataSource, today: NaiveDate) -> String {
    let (start, end) = analysis.window.resolve(today);
    let mut plan = String::new();
    plan.push_str(&format!("Stock:      {}\n", analysis.stock));
    plan.push_str(&format!(
        "Benchmark:  {} ({})\n",
        analysis.benchmark, analysis.benchmark_label
    ));
    plan.push_str(&format!(
        "Window:     {} to {} ({} years)\n",
        start, end, analysis.window.years
    ));
    plan.push_str(&format!("Prices:     {}\n", analysis.price_field));
    let location = match source {
        DataSource::Yahoo { base_url, .. } => base_url.clone(),
        DataSource::Csv { data_dir } => data_dir.display().to_string(),
    };
    plan.push_str(&format!("Provider:   {} ({location})\n", source.name()));
    plan.push_str(&format!("Output:     {}\n", analysis.output_path.display()));
    plan
}

/// Everything a run produced besides the workbook itself.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub table: ComparisonTable,
    pub stock_summary: SummaryStats,
    pub benchmark_summary: SummaryStats,
    pub output_path: PathBuf,
}

pub fn format_summary(
    analysis: &AnalysisConfig,
    stock: &SummaryStats,
    benchmark: &SummaryStats,
) -> String {
    format!(
        "\n--- {}-YEAR PERFORMANCE SUMMARY ---\n{}\n{}\n",
        analysis.window.years,
        stock.format_line(&analysis.stock),
        benchmark.format_line("Benchmark"),
    )
}

/// Fetch, compute, report, export. The summary goes to `out`; progress
/// goes to the log.
pub fn run_pipeline(
    data_port: &dyn PriceDataPort,
    report_port: &dyn ReportPort,
    analysis: &AnalysisConfig,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<AnalysisOutcome, StockbenchError> {
    // Stage 1: acquisition
    let (start, end) = analysis.window.resolve(today);
    info!(
        "Downloading {} years of data for {} and {} from {}...",
        analysis.window.years,
        analysis.stock,
        analysis.benchmark,
        data_port.name()
    );

    let stock_bars = data_port.fetch_daily(&analysis.stock, start, end)?;
    let bench_bars = data_port.fetch_daily(&analysis.benchmark, start, end)?;
    info!(
        "Fetched {} bars for {}, {} bars for {}",
        stock_bars.len(),
        analysis.stock,
        bench_bars.len(),
        analysis.benchmark
    );

    let stock = PriceSeries::from_bars(&analysis.stock, &stock_bars, analysis.price_field);
    let benchmark = PriceSeries::from_bars(&analysis.benchmark, &bench_bars, analysis.price_field);
    let pair = align(&stock, &benchmark)?;
    if pair.dropped > 0 {
        warn!(
            "Dropped {} dates not traded by both {} and {}",
            pair.dropped, analysis.stock, analysis.benchmark
        );
    }

    // Stage 2: returns and growth
    let table = ComparisonTable::build(&pair);

    // Stage 3: summary
    let stock_summary = table.stock.summary();
    let benchmark_summary = table.benchmark.summary();
    write!(
        out,
        "{}",
        format_summary(analysis, &stock_summary, &benchmark_summary)
    )?;

    // Stage 4: export
    info!(
        "Generating {} with native Excel chart",
        analysis.output_path.display()
    );
    let chart = ChartSpec::growth_comparison(&table, &analysis.benchmark_label);
    report_port.write(&table, &chart, &analysis.output_path)?;
    info!(
        "Complete: {} rows written to {}",
        table.row_count(),
        analysis.output_path.display()
    );

    Ok(AnalysisOutcome {
        table,
        stock_summary,
        benchmark_summary,
        output_path: analysis.output_path.clone(),
    })
}
