//! roi-cli — Command-line front end for the AP savings calculator.
//!
//! Opens a calculator session on a page URL (optionally carrying a shared
//! query string), applies per-field overrides, and prints the savings report,
//! the normalized inputs, or a share link.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use roi_calc::SavingsEngine;
use roi_core::constants::{
    Benchmarks, ANNUAL_PAYABLES_SPEND, DAYS_TO_PROCESS, MANUAL_INTERVENTION_PCT,
    NON_PO_INVOICE_VOLUME, PO_INVOICE_VOLUME,
};
use roi_core::report::touchless_benchmark_line;
use roi_core::traits::SavingsCalculator;
use roi_core::types::Currency;
use roi_session::{
    encode, CalculatorSession, LeadCapture, LeadForm, LeadState, LeadTiming, LoggingLeadSink,
    MemoryClipboard, MemoryLocation,
};
use serde_json::json;
use tracing::{info, warn};
use url::Url;

const DEFAULT_PAGE_URL: &str = "http://localhost:8080/roi-calculator";

type Session = CalculatorSession<MemoryLocation, SavingsEngine>;

/// Accounts-payable automation savings calculator.
#[derive(Parser)]
#[command(name = "roi-cli")]
#[command(version, about = "Estimate accounts-payable automation savings.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the savings report.
    Report(ReportArgs),
    /// Print a share link for the inputs.
    Share(InputArgs),
    /// Print the normalized inputs and their canonical query string.
    Decode(InputArgs),
    /// Submit a report request for the inputs.
    Lead(LeadArgs),
    /// Print benchmarks, currencies and input ranges.
    Benchmarks,
}

#[derive(Args)]
struct InputArgs {
    /// Calculator page URL, optionally with a shared query string.
    #[arg(short, long, default_value = DEFAULT_PAGE_URL)]
    url: String,

    /// Currency code (USD, EUR, GBP, CAD, AUD, CHF, JPY, SEK, NOK).
    #[arg(short, long)]
    currency: Option<String>,

    /// Annual PO invoice volume.
    #[arg(long)]
    po: Option<i64>,

    /// Annual non-PO invoice volume.
    #[arg(long)]
    npo: Option<i64>,

    /// Current days to process an invoice.
    #[arg(long)]
    days: Option<f64>,

    /// Percentage of PO invoices requiring manual intervention.
    #[arg(long)]
    manual: Option<i64>,

    /// Annual payables spend.
    #[arg(long)]
    spend: Option<i64>,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LeadArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Work email.
    #[arg(short, long)]
    email: String,

    /// Full name.
    #[arg(short, long, default_value = "")]
    name: String,

    /// Company.
    #[arg(long, default_value = "")]
    company: String,

    /// Simulated submission delay in milliseconds.
    #[arg(long, default_value = "1000")]
    submit_delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => report(args),
        Commands::Share(args) => share(args),
        Commands::Decode(args) => decode(args),
        Commands::Lead(args) => lead(args).await,
        Commands::Benchmarks => benchmarks(),
    }
}

/// Open a session on `--url`, then apply the per-field flags through the
/// same clamping setters the UI controls use.
fn open_session(args: &InputArgs) -> Result<Session> {
    let url = Url::parse(&args.url).with_context(|| format!("invalid page URL: {}", args.url))?;
    let mut session = CalculatorSession::open(MemoryLocation::new(url), SavingsEngine::new());

    if let Some(code) = &args.currency {
        if !session.set_currency_code(code) {
            warn!(%code, "Unknown currency code, keeping {}", session.inputs().currency);
        }
    }
    if let Some(v) = args.po {
        session.set_po_invoice_volume(v);
    }
    if let Some(v) = args.npo {
        session.set_non_po_invoice_volume(v);
    }
    if let Some(v) = args.days {
        session.set_current_days_to_process(v);
    }
    if let Some(v) = args.manual {
        session.set_po_manual_intervention_pct(v);
    }
    if let Some(v) = args.spend {
        session.set_annual_payables_spend(v);
    }
    Ok(session)
}

fn report(args: ReportArgs) -> Result<()> {
    let session = open_session(&args.input)?;
    let report = session.report();

    if args.json {
        let out = json!({
            "inputs": session.inputs(),
            "metrics": session.metrics(),
            "report": report,
            "url": session.share_link().as_str(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let i = &report.inputs;
    println!("Inputs");
    println!("  Currency:                 {}", i.currency);
    println!("  PO invoices / year:       {}", i.po_invoice_volume);
    println!("  Non-PO invoices / year:   {}", i.non_po_invoice_volume);
    println!("  Days to process:          {}", i.current_days_to_process);
    println!(
        "  Manual intervention (PO): {} (touchless {})",
        i.po_manual_intervention_pct, i.current_touchless_rate
    );
    println!("  Annual payables spend:    {}", i.annual_payables_spend);
    println!();
    println!("Estimated savings");
    println!("  PO cycle time saved:      {}", report.po_cycle_time);
    println!("  Non-PO cycle time saved:  {}", report.non_po_cycle_time);
    println!("  Additional touchless:     {}", report.touchless_additional);
    println!("  Total touchless:          {} invoices", report.touchless_total);
    println!("  Payment savings / year:   {}", report.payment_savings);
    println!();
    println!("Share: {}", session.share_link());
    Ok(())
}

fn share(args: InputArgs) -> Result<()> {
    let session = open_session(&args)?;
    let mut clipboard = MemoryClipboard::new();
    let link = session.share(&mut clipboard).context("Failed to copy share link")?;
    println!("{link}");
    Ok(())
}

fn decode(args: InputArgs) -> Result<()> {
    let session = open_session(&args)?;
    let out = json!({
        "inputs": session.inputs(),
        "query": encode(session.inputs()),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

async fn lead(args: LeadArgs) -> Result<()> {
    let session = open_session(&args.input)?;
    let (inputs, metrics) = session.snapshot();

    let timing = LeadTiming {
        submit_delay: Duration::from_millis(args.submit_delay_ms),
        close_delay: Duration::ZERO,
    };
    let mut capture = LeadCapture::new(Arc::new(LoggingLeadSink), timing);
    capture.fill(LeadForm {
        email: args.email,
        name: args.name,
        company: args.company,
    });

    info!("Submitting report request...");
    capture
        .submit(&inputs, &metrics)
        .context("Report request rejected")?;
    capture.finished().await;

    match capture.state() {
        LeadState::Closed | LeadState::Submitted => {
            println!("Thank you! Your personalized ROI report is on its way.");
            println!("Estimated savings: {}/year", session.report().payment_savings);
            Ok(())
        }
        LeadState::Failed(reason) => bail!("Report request failed: {reason}"),
        other => bail!("Report request ended in unexpected state {other:?}"),
    }
}

fn benchmarks() -> Result<()> {
    let engine = SavingsEngine::new();
    let b: &Benchmarks = engine.benchmarks();
    let currencies: Vec<_> = Currency::ALL
        .iter()
        .map(|c| json!({ "code": c.code(), "symbol": c.symbol(), "name": c.name() }))
        .collect();

    let out = json!({
        "benchmarks": b,
        "touchlessBenchmark": touchless_benchmark_line(b.touchless_rate.average, b.touchless_rate.best),
        "currencies": currencies,
        "domains": {
            "po": PO_INVOICE_VOLUME,
            "npo": NON_PO_INVOICE_VOLUME,
            "days": DAYS_TO_PROCESS,
            "manual": MANUAL_INTERVENTION_PCT,
            "spend": ANNUAL_PAYABLES_SPEND,
        },
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
