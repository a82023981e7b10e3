//! Investment Calc CLI
//!
//! Command-line interface for running personal-finance projections

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};

use investment_calc::etf::{self, ContributionMethod, SimulationRequest};
use investment_calc::fire::{fire_projection, FireRequest};
use investment_calc::loan::{loan_payoff, LoanRequest};
use investment_calc::returns::{dividend_income, roi};
use investment_calc::schedule::{
    compound_schedule, sip_schedule, CompoundRequest, Frequency, GrowthSchedule, SipRequest,
};

#[derive(Parser)]
#[command(name = "investment_calc", version, about = "Personal-finance projection engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compound-interest accumulation schedule, one row per year
    Compound(CompoundArgs),
    /// Monthly DCA/SIP accumulation schedule
    Sip(SipArgs),
    /// Loan payoff schedule with optional extra payments
    Loan(LoanArgs),
    /// Years until financial independence
    Fire(FireArgs),
    /// Cumulative return on an investment
    Roi(RoiArgs),
    /// Dividend income at a stated yield
    Dividend(DividendArgs),
    /// ETF backtest over historical price CSVs
    Etf(EtfArgs),
}

#[derive(Args)]
struct CompoundArgs {
    #[arg(long, default_value_t = 20_000.0)]
    principal: f64,
    #[arg(long, default_value_t = 12_000.0)]
    contribution: f64,
    #[arg(long, default_value_t = 8.0)]
    rate: f64,
    #[arg(long, default_value_t = 10)]
    years: u32,
    /// Compounding periods per year (1, 4, 12, or 365)
    #[arg(long, default_value_t = 1)]
    frequency: u32,
    /// Write the full schedule to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Args)]
struct SipArgs {
    #[arg(long, default_value_t = 0.0)]
    principal: f64,
    #[arg(long, default_value_t = 500.0)]
    monthly: f64,
    #[arg(long, default_value_t = 8.0)]
    rate: f64,
    #[arg(long, default_value_t = 10)]
    years: u32,
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Args)]
struct LoanArgs {
    #[arg(long)]
    principal: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    payment: f64,
    #[arg(long, default_value_t = 0.0)]
    extra: f64,
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Args)]
struct FireArgs {
    #[arg(long)]
    income: f64,
    #[arg(long)]
    expenses: f64,
    #[arg(long, default_value_t = 7.0)]
    return_rate: f64,
    #[arg(long, default_value_t = 4.0)]
    withdrawal_rate: f64,
}

#[derive(Args)]
struct RoiArgs {
    #[arg(long)]
    initial: f64,
    #[arg(long)]
    final_value: f64,
    #[arg(long, default_value_t = 1.0)]
    years: f64,
}

#[derive(Args)]
struct DividendArgs {
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    yield_pct: f64,
}

#[derive(Args)]
struct EtfArgs {
    #[arg(long, default_value_t = 10_000.0)]
    amount: f64,
    #[arg(long, default_value_t = 12)]
    months: u32,
    /// Contribution method: lump_sum or dca
    #[arg(long, default_value = "lump_sum")]
    method: String,
    /// Price history as TICKER=path/to.csv, repeatable
    #[arg(long = "prices", required = true)]
    prices: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Compound(args) => run_compound(args),
        Command::Sip(args) => run_sip(args),
        Command::Loan(args) => run_loan(args),
        Command::Fire(args) => run_fire(args),
        Command::Roi(args) => run_roi(args),
        Command::Dividend(args) => run_dividend(args),
        Command::Etf(args) => run_etf(args),
    }
}

fn run_compound(args: CompoundArgs) -> Result<()> {
    let request = CompoundRequest {
        principal: args.principal,
        annual_contribution: args.contribution,
        annual_rate_pct: args.rate,
        years: args.years,
        frequency: Frequency::from_per_year(args.frequency)?,
    };
    let schedule = compound_schedule(&request)?;

    println!("Compound Interest Schedule");
    print_schedule("Year", &schedule);

    if let Some(path) = args.csv {
        write_schedule_csv(&path, "Year", &schedule)?;
        println!("\nFull schedule written to: {}", path.display());
    }
    Ok(())
}

fn run_sip(args: SipArgs) -> Result<()> {
    let request = SipRequest {
        starting_principal: args.principal,
        monthly_contribution: args.monthly,
        annual_rate_pct: args.rate,
        years: args.years,
    };
    let schedule = sip_schedule(&request)?;

    println!("SIP Schedule ({} months)", schedule.rows.len());
    print_schedule("Month", &schedule);

    if let Some(path) = args.csv {
        write_schedule_csv(&path, "Month", &schedule)?;
        println!("\nFull schedule written to: {}", path.display());
    }
    Ok(())
}

fn print_schedule(period_label: &str, schedule: &GrowthSchedule) {
    println!(
        "{:>6} {:>16} {:>16} {:>16}",
        period_label, "Contribution", "Interest", "Balance"
    );
    println!("{}", "-".repeat(58));

    // Long monthly schedules get elided in the middle
    let rows = &schedule.rows;
    let shown = 24;
    for row in rows.iter().take(shown) {
        println!(
            "{:>6} {:>16.2} {:>16.2} {:>16.2}",
            row.period, row.contribution, row.interest, row.ending_balance
        );
    }
    if rows.len() > shown {
        println!("... ({} more periods)", rows.len() - shown);
    }

    let summary = schedule.summary();
    println!("\nSummary:");
    println!("  Total Contributed: ${:.2}", summary.total_contributed);
    println!("  Total Interest:    ${:.2}", summary.total_interest);
    println!("  Final Balance:     ${:.2}", summary.final_balance);
}

fn write_schedule_csv(path: &PathBuf, period_label: &str, schedule: &GrowthSchedule) -> Result<()> {
    let mut file = File::create(path).context("unable to create CSV file")?;
    writeln!(file, "{},Contribution,Interest,EndingBalance", period_label)?;
    for row in &schedule.rows {
        writeln!(
            file,
            "{},{:.2},{:.2},{:.2}",
            row.period, row.contribution, row.interest, row.ending_balance
        )?;
    }
    Ok(())
}

fn run_loan(args: LoanArgs) -> Result<()> {
    let request = LoanRequest {
        principal: args.principal,
        annual_rate_pct: args.rate,
        monthly_payment: args.payment,
        extra_payment: args.extra,
    };
    let schedule = loan_payoff(&request)?;

    println!("Loan Payoff Schedule");
    println!(
        "{:>6} {:>14} {:>14} {:>16}",
        "Month", "Interest", "Principal", "Balance"
    );
    println!("{}", "-".repeat(54));
    for row in schedule.rows.iter().take(24) {
        println!(
            "{:>6} {:>14.2} {:>14.2} {:>16.2}",
            row.month, row.interest, row.principal, row.balance
        );
    }
    if schedule.rows.len() > 24 {
        println!("... ({} more months)", schedule.rows.len() - 24);
    }

    println!("\nSummary:");
    println!("  Months to Payoff: {}", schedule.months_to_payoff());
    println!("  Total Interest:   ${:.2}", schedule.total_interest());
    println!("  Total Paid:       ${:.2}", schedule.total_paid());

    if let Some(path) = args.csv {
        let mut file = File::create(&path).context("unable to create CSV file")?;
        writeln!(file, "Month,Interest,Principal,Balance")?;
        for row in &schedule.rows {
            writeln!(
                file,
                "{},{:.2},{:.2},{:.2}",
                row.month, row.interest, row.principal, row.balance
            )?;
        }
        println!("\nFull schedule written to: {}", path.display());
    }
    Ok(())
}

fn run_fire(args: FireArgs) -> Result<()> {
    let request = FireRequest {
        annual_income: args.income,
        annual_expenses: args.expenses,
        annual_return_pct: args.return_rate,
        withdrawal_rate_pct: args.withdrawal_rate,
    };
    let projection = fire_projection(&request)?;

    println!("FIRE Projection");
    println!("  Savings Rate:     {:.1}%", projection.savings_rate * 100.0);
    println!("  Target Net Worth: ${:.2}", projection.target_net_worth);
    println!();
    println!("{:>6} {:>18}", "Year", "Savings");
    println!("{}", "-".repeat(26));
    for row in &projection.rows {
        println!("{:>6} {:>18.2}", row.year, row.savings);
    }
    println!(
        "\nFinancial independence in {} years",
        projection.years_to_independence()
    );
    Ok(())
}

fn run_roi(args: RoiArgs) -> Result<()> {
    let summary = roi(args.initial, args.final_value, args.years)?;
    println!("ROI over {} years (cumulative):", summary.holding_years);
    println!("  Profit: ${:.2}", summary.profit);
    println!("  ROI:    {:.2}%", summary.roi_pct);
    Ok(())
}

fn run_dividend(args: DividendArgs) -> Result<()> {
    let income = dividend_income(args.amount, args.yield_pct)?;
    println!("Dividend income at {:.2}% yield:", args.yield_pct);
    println!("  Annual:  ${:.2}", income.annual);
    println!("  Monthly: ${:.2}", income.monthly);
    Ok(())
}

fn run_etf(args: EtfArgs) -> Result<()> {
    let method = match args.method.as_str() {
        "lump_sum" => ContributionMethod::LumpSum,
        "dca" | "monthly_dca" => ContributionMethod::MonthlyDca,
        other => return Err(anyhow!("unknown method {:?} (expected lump_sum or dca)", other)),
    };
    let request = SimulationRequest {
        total_amount: args.amount,
        method,
        duration_months: args.months,
        drip: false,
    };

    let mut series_list = Vec::new();
    for entry in &args.prices {
        let (ticker, path) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("expected TICKER=PATH, got {:?}", entry))?;
        let series = etf::loader::load_price_series(ticker, path)
            .map_err(|e| anyhow!("failed to load {}: {}", path, e))?;
        series_list.push(series);
    }

    println!(
        "ETF Simulation ({} months, ${:.2}, {:?})",
        args.months, args.amount, method
    );
    println!(
        "{:>8} {:>14} {:>14} {:>10}",
        "Ticker", "Final Value", "Profit", "ROI %"
    );
    println!("{}", "-".repeat(50));

    for outcome in etf::simulate_batch(&series_list, &request) {
        match outcome.result {
            Ok(result) => println!(
                "{:>8} {:>14.2} {:>14.2} {:>10.2}",
                result.ticker, result.final_value, result.profit, result.roi_pct
            ),
            Err(err) => println!("{:>8} {}", outcome.ticker, err),
        }
    }
    Ok(())
}
