//! Compare lump-sum and DCA outcomes for a set of tickers
//!
//! Usage: cargo run --bin compare_etfs -- prices/VTI.csv prices/QQQ.csv
//!
//! Each argument is a CSV of monthly closes; the ticker is taken from
//! the file stem. Outputs a side-by-side console table and a summary CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;

use investment_calc::etf::{self, ContributionMethod, PriceSeries, SimulationRequest};

const SIMULATION_AMOUNT: f64 = 10_000.0;
const SIMULATION_MONTHS: u32 = 60;

fn main() -> Result<()> {
    env_logger::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        return Err(anyhow!("usage: compare_etfs <prices.csv> [<prices.csv> ...]"));
    }

    let start = Instant::now();
    let mut series_list = Vec::new();
    for path in &paths {
        let ticker = Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("cannot derive ticker from {:?}", path))?
            .to_uppercase();
        let series = etf::loader::load_price_series(&ticker, path)
            .map_err(|e| anyhow!("failed to load {}: {}", path, e))?;
        series_list.push(series);
    }
    log::info!("loaded {} tickers in {:?}", series_list.len(), start.elapsed());

    let lump = SimulationRequest {
        total_amount: SIMULATION_AMOUNT,
        method: ContributionMethod::LumpSum,
        duration_months: SIMULATION_MONTHS,
        drip: false,
    };
    let dca = SimulationRequest {
        method: ContributionMethod::MonthlyDca,
        ..lump.clone()
    };

    // One row per ticker, both methods; par_iter keeps input order
    let rows: Vec<ComparisonRow> = series_list
        .par_iter()
        .map(|series| ComparisonRow::build(series, &lump, &dca))
        .collect();

    println!(
        "ETF Comparison: ${:.2} over {} months",
        SIMULATION_AMOUNT, SIMULATION_MONTHS
    );
    println!(
        "{:>8} {:>16} {:>10} {:>16} {:>10}",
        "Ticker", "LumpSum Value", "ROI %", "DCA Value", "ROI %"
    );
    println!("{}", "-".repeat(64));

    for row in &rows {
        match &row.note {
            Some(note) => println!("{:>8} {}", row.ticker, note),
            None => println!(
                "{:>8} {:>16.2} {:>10.2} {:>16.2} {:>10.2}",
                row.ticker, row.lump_value, row.lump_roi, row.dca_value, row.dca_roi
            ),
        }
    }

    let output_path = "etf_comparison.csv";
    let mut file = File::create(output_path).context("unable to create output file")?;
    writeln!(file, "Ticker,LumpSumValue,LumpSumRoiPct,DcaValue,DcaRoiPct")?;
    for row in rows.iter().filter(|r| r.note.is_none()) {
        writeln!(
            file,
            "{},{:.2},{:.2},{:.2},{:.2}",
            row.ticker, row.lump_value, row.lump_roi, row.dca_value, row.dca_roi
        )?;
    }
    println!("\nSummary written to: {}", output_path);

    Ok(())
}

struct ComparisonRow {
    ticker: String,
    lump_value: f64,
    lump_roi: f64,
    dca_value: f64,
    dca_roi: f64,
    /// Set when the ticker could not be simulated
    note: Option<String>,
}

impl ComparisonRow {
    fn build(series: &PriceSeries, lump: &SimulationRequest, dca: &SimulationRequest) -> Self {
        match (etf::simulate(series, lump), etf::simulate(series, dca)) {
            (Ok(l), Ok(d)) => Self {
                ticker: series.ticker.clone(),
                lump_value: l.final_value,
                lump_roi: l.roi_pct,
                dca_value: d.final_value,
                dca_roi: d.roi_pct,
                note: None,
            },
            (Err(e), _) | (_, Err(e)) => Self {
                ticker: series.ticker.clone(),
                lump_value: 0.0,
                lump_roi: 0.0,
                dca_value: 0.0,
                dca_roi: 0.0,
                note: Some(e.to_string()),
            },
        }
    }
}
