use std::error::Error;

use clap::{Parser, Subcommand};

use api_types::admin::PlatformCounters;
use funding::Money;

#[derive(Parser, Debug)]
#[command(name = "hoperaise_admin")]
#[command(about = "Admin utilities for HopeRaise (platform counters)")]
struct Cli {
    /// Backend base URL (also read from `HOPERAISE_API_URL`).
    #[arg(long, env = "HOPERAISE_API_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the aggregate platform counters.
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hoperaise_admin=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Stats => {
            let counters = fetch_counters(&cli.base_url).await?;
            print_counters(&counters);
        }
    }

    Ok(())
}

/// The four counter endpoints each return a bare JSON number.
async fn fetch_counters(
    base_url: &str,
) -> Result<PlatformCounters, Box<dyn Error + Send + Sync>> {
    let client = reqwest::Client::new();

    let donors = fetch_number(&client, base_url, "admin/donorcount").await? as i64;
    let creators = fetch_number(&client, base_url, "admin/creatorcount").await? as i64;
    let campaigns = fetch_number(&client, base_url, "admin/campaigncount").await? as i64;
    let donation_total = fetch_number(&client, base_url, "admin/donationsummary").await?;

    Ok(PlatformCounters {
        donors,
        creators,
        campaigns,
        donation_total,
    })
}

async fn fetch_number(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
) -> Result<f64, Box<dyn Error + Send + Sync>> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), path);
    tracing::info!("fetching {url}");

    let res = client.get(&url).send().await?;
    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        tracing::error!("{path} returned {status}: {body}");
        return Err(format!("{path} returned {status}").into());
    }

    Ok(res.json::<f64>().await?)
}

fn print_counters(counters: &PlatformCounters) {
    let total = Money::try_from_major(counters.donation_total)
        .map(|m| m.to_string())
        .unwrap_or_else(|_| counters.donation_total.to_string());

    println!("Donors:          {}", counters.donors);
    println!("Creators:        {}", counters.creators);
    println!("Campaigns:       {}", counters.campaigns);
    println!("Total donations: {total}");
}
