//! Compare command implementation
//!
//! Prices the European, Asian and barrier options of a scenario three ways
//! and reports NPV and wall time for each:
//!
//! - `reference`: closed form at the frozen parameters (none for the
//!   average-strike Asian option)
//! - `non constant`: Monte Carlo on the term-structure process
//! - `constant`: Monte Carlo on the frozen process
//!
//! With `--csv` one row `step,sample,c_err,c_npv,c_time,err,npv,time` is
//! appended for the recorded instrument, where the `err` columns are the
//! absolute distance to the reference price.

use std::fs::OpenOptions;
use std::path::Path;
use std::time::Instant;

use clap::ValueEnum;
use pricer_models::analytical::{AnalyticBarrierEngine, AnalyticEuropeanEngine};
use pricer_models::instruments::{Instrument, PricingEngine, PricingResults};
use pricer_models::models::{freeze_process, BlackScholesProcess, FreezePolicy};
use pricer_pricing::McEngineBuilder;
use serde::Serialize;
use tracing::info;

use crate::config::{Scenario, SimulationConfig};
use crate::market::Market;
use crate::{CliError, Result};

/// Report layout on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Instrument whose results are appended to the CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Recorded {
    /// European option
    European,
    /// Barrier option
    Barrier,
}

/// One priced column of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timed {
    /// Net present value
    pub npv: f64,
    /// Monte Carlo standard error, when available
    pub error_estimate: Option<f64>,
    /// Wall time in seconds
    pub seconds: f64,
}

impl Timed {
    fn measure(f: impl FnOnce() -> Result<PricingResults>) -> Result<Self> {
        let start = Instant::now();
        let results = f()?;
        Ok(Self {
            npv: results.value,
            error_estimate: results.error_estimate,
            seconds: start.elapsed().as_secs_f64(),
        })
    }
}

/// Reference, term-structure and constant results for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Instrument label
    pub kind: &'static str,
    /// Closed-form price at the frozen parameters
    pub reference: Option<Timed>,
    /// Term-structure process
    pub non_constant: Timed,
    /// Frozen process
    pub constant: Timed,
}

/// Full comparison output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// UTC timestamp of the run
    pub generated_at: String,
    /// Time steps of the European and barrier engines
    pub steps: usize,
    /// Samples per engine
    pub samples: usize,
    /// Random seed
    pub seed: u64,
    /// One row per instrument
    pub rows: Vec<ComparisonRow>,
}

impl Report {
    fn row(&self, kind: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.kind == kind)
    }
}

/// CSV record; field order is the file header.
#[derive(Debug, Serialize)]
struct CsvRow {
    step: usize,
    sample: usize,
    c_err: f64,
    c_npv: f64,
    c_time: f64,
    err: f64,
    npv: f64,
    time: f64,
}

fn builder(
    process: &BlackScholesProcess,
    simulation: &SimulationConfig,
    constant: bool,
) -> McEngineBuilder {
    let mut builder = McEngineBuilder::new(process.clone())
        .with_samples(simulation.samples)
        .with_seed(simulation.seed)
        .with_antithetic_variate(simulation.antithetic)
        .with_parallel(simulation.parallel)
        .with_constant_parameters(constant);
    if let Some(chunk_size) = simulation.chunk_size {
        builder = builder.with_chunk_size(chunk_size);
    }
    builder
}

fn price_european(market: &Market, simulation: &SimulationConfig) -> Result<ComparisonRow> {
    let option = &market.european;
    let mc = |constant: bool| -> Result<PricingResults> {
        let engine = builder(&market.process, simulation, constant)
            .with_steps(simulation.steps)
            .build_european()?;
        Ok(engine.calculate(option)?)
    };
    let reference = Timed::measure(|| {
        let frozen = freeze_process(
            &market.process,
            option.maturity(),
            option.payoff().strike(),
            FreezePolicy::default(),
        )?;
        Ok(AnalyticEuropeanEngine::new(frozen).calculate(option)?)
    })?;
    Ok(ComparisonRow {
        kind: "European",
        reference: Some(reference),
        non_constant: Timed::measure(|| mc(false))?,
        constant: Timed::measure(|| mc(true))?,
    })
}

fn price_asian(market: &Market, simulation: &SimulationConfig) -> Result<ComparisonRow> {
    let option = &market.asian;
    let mc = |constant: bool| -> Result<PricingResults> {
        let mut engine = builder(&market.process, simulation, constant);
        if let Some(steps) = simulation.asian_steps {
            engine = engine.with_steps(steps);
        }
        Ok(engine.build_asian()?.calculate(option)?)
    };
    Ok(ComparisonRow {
        kind: "Asian",
        reference: None,
        non_constant: Timed::measure(|| mc(false))?,
        constant: Timed::measure(|| mc(true))?,
    })
}

fn price_barrier(market: &Market, simulation: &SimulationConfig) -> Result<ComparisonRow> {
    let option = &market.barrier;
    let mc = |constant: bool| -> Result<PricingResults> {
        let engine = builder(&market.process, simulation, constant)
            .with_steps(simulation.steps)
            .build_barrier()?;
        Ok(engine.calculate(option)?)
    };
    let reference = Timed::measure(|| {
        let frozen = freeze_process(
            &market.process,
            option.maturity(),
            option.payoff().strike(),
            FreezePolicy::AtMaturity,
        )?;
        Ok(AnalyticBarrierEngine::new(frozen).calculate(option)?)
    })?;
    Ok(ComparisonRow {
        kind: "Barrier",
        reference: Some(reference),
        non_constant: Timed::measure(|| mc(false))?,
        constant: Timed::measure(|| mc(true))?,
    })
}

/// Run the comparison for `scenario`.
pub fn compare(scenario: &Scenario) -> Result<Report> {
    let market = Market::from_scenario(scenario)?;
    let simulation = &scenario.simulation;
    info!(
        steps = simulation.steps,
        samples = simulation.samples,
        seed = simulation.seed,
        parallel = simulation.parallel,
        "starting comparison"
    );

    let mut rows = Vec::with_capacity(3);
    for price in [price_european, price_asian, price_barrier] {
        let row = price(&market, simulation)?;
        info!(
            kind = row.kind,
            non_constant = row.non_constant.npv,
            constant = row.constant.npv,
            speedup = row.non_constant.seconds / row.constant.seconds.max(f64::EPSILON),
            "priced"
        );
        rows.push(row);
    }

    Ok(Report {
        generated_at: chrono::Utc::now().to_rfc3339(),
        steps: simulation.steps,
        samples: simulation.samples,
        seed: simulation.seed,
        rows,
    })
}

/// Render the report as a fixed-width table.
pub fn render_table(report: &Report) -> String {
    let width = 15;
    let mut out = String::new();
    out.push_str(&format!(
        "{:>40}{:>30}{:>30}\n",
        "reference", "non constant", "constant"
    ));
    out.push_str(&format!(
        "{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}{:>w$}\n",
        "kind",
        "NPV",
        "time [s]",
        "NPV",
        "time [s]",
        "NPV",
        "time [s]",
        w = width
    ));
    out.push_str(&format!("{}{}\n", " ".repeat(5), "-".repeat(100)));
    for row in &report.rows {
        let (npv, time) = match row.reference {
            Some(r) => (format!("{:.6}", r.npv), format!("{:.6}", r.seconds)),
            None => ("-".to_string(), "-".to_string()),
        };
        out.push_str(&format!(
            "{:>w$}{:>w$}{:>w$}{:>w$.6}{:>w$.6}{:>w$.6}{:>w$.6}\n",
            row.kind,
            npv,
            time,
            row.non_constant.npv,
            row.non_constant.seconds,
            row.constant.npv,
            row.constant.seconds,
            w = width
        ));
    }
    out
}

/// Append the recorded instrument's results to `path`, writing the header
/// first when the file is new or empty.
pub fn append_csv(path: &Path, report: &Report, recorded: Recorded) -> Result<()> {
    let kind = match recorded {
        Recorded::European => "European",
        Recorded::Barrier => "Barrier",
    };
    let row = report
        .row(kind)
        .ok_or_else(|| CliError::InvalidArgument(format!("no {} row in report", kind)))?;
    let reference = row.reference.map(|r| r.npv).ok_or_else(|| {
        CliError::InvalidArgument(format!("{} row has no reference price", kind))
    })?;

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let empty = file.metadata()?.len() == 0;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(empty)
        .from_writer(file);
    writer.serialize(CsvRow {
        step: report.steps,
        sample: report.samples,
        c_err: (row.constant.npv - reference).abs(),
        c_npv: row.constant.npv,
        c_time: row.constant.seconds,
        err: (row.non_constant.npv - reference).abs(),
        npv: row.non_constant.npv,
        time: row.non_constant.seconds,
    })?;
    writer.flush()?;
    Ok(())
}

/// Run the compare command
pub fn run(
    scenario: &Scenario,
    format: OutputFormat,
    csv_path: Option<&Path>,
    recorded: Recorded,
) -> Result<()> {
    let report = compare(scenario)?;
    match format {
        OutputFormat::Table => println!("{}", render_table(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    if let Some(path) = csv_path {
        append_csv(path, &report, recorded)?;
        info!(path = %path.display(), "results appended");
    }
    Ok(())
}
