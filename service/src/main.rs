#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use parceltrace::{
    config::Config,
    tracking::{carriers, summarize, HttpTraceClient, TraceQuery, TraceSummary},
};
use tracing_subscriber::EnvFilter;

/// Look up parcel trace histories through the KDNiao API.
#[derive(Debug, Parser)]
#[command(name = "parceltrace", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "config.yaml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Query the trace history of one parcel.
    Trace {
        /// Carrier code, e.g. SF or ZTO (see `parceltrace carriers`).
        #[arg(long)]
        carrier: String,

        /// Tracking number issued by the carrier.
        #[arg(long)]
        number: String,

        /// Merchant-side order code.
        #[arg(long, default_value = "")]
        order_code: String,

        /// Customer name (SF expects the last four digits of the phone number).
        #[arg(long, default_value = "")]
        customer_name: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List commonly used carrier codes.
    Carriers,
}

fn print_summary(summary: &TraceSummary) {
    println!(
        "{} {}: {} ({})",
        summary.carrier_code, summary.tracking_number, summary.status, summary.status_label
    );
    if !summary.order_code.is_empty() {
        println!("order: {}", summary.order_code);
    }
    for entry in &summary.entries {
        if entry.remark.is_empty() {
            println!("  {}  {}", entry.accept_time, entry.accept_station);
        } else {
            println!(
                "  {}  {}  [{}]",
                entry.accept_time, entry.accept_station, entry.remark
            );
        }
    }
}

fn print_carriers() {
    for carrier in carriers::CARRIERS {
        println!("{:<6} {}", carrier.code, carrier.name);
    }
}

async fn run_trace(config_path: &str, query: TraceQuery, json: bool) -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load_from(config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    if config.kdn.is_sandbox() {
        tracing::info!("using vendor sandbox endpoint");
    }
    if carriers::find(&query.carrier_code).is_none() {
        tracing::info!(
            carrier_code = %query.carrier_code,
            "carrier code not in the known table, sending as-is"
        );
    }

    let client = HttpTraceClient::from_config(&config.kdn)?;
    let summary = summarize(&client, &query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    match cli.command {
        Command::Carriers => {
            print_carriers();
            Ok(())
        }
        Command::Trace {
            carrier,
            number,
            order_code,
            customer_name,
            json,
        } => {
            let query = TraceQuery::new(carrier, number)
                .with_order_code(order_code)
                .with_customer_name(customer_name);
            run_trace(&cli.config, query, json).await
        }
    }
}
