use anyhow::{Context, Result};
use clap::Parser;
use envelope_v1::{ApiFetch, ApiResponse, RequestOptions};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod report;

use config::{ensure_config, API_ENV_VAR};
use report::render_view;

#[derive(Debug, Parser)]
#[command(about = "Calls the demo endpoints and prints their response envelopes")]
struct Args {
    /// Probe config (created with defaults when missing)
    #[arg(long, default_value = "configs/probe-config.yaml")]
    config: PathBuf,

    /// Only run probes whose label contains this text
    #[arg(long)]
    only: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    println!();
    println!("========================================");
    println!(" API Response Envelope Probe");
    println!("========================================");
    println!();

    let cfg = ensure_config(&args.config)?;
    let api_base = cfg.api_base_url(std::env::var(API_ENV_VAR).ok());
    println!("API base        : {}", api_base);
    println!("Timeout         : {}s", cfg.timeout_secs);
    println!();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .build()
        .context("Could not build HTTP client")?;
    let fetch = ApiFetch::with_client(client);

    for spec in &cfg.probes {
        if let Some(filter) = &args.only {
            if !spec.label.contains(filter.as_str()) {
                continue;
            }
        }

        let url = format!("{}{}", api_base, spec.path);
        let options = spec.method.clone().map(RequestOptions::method);
        debug!(%url, label = %spec.label, "probing");

        let resp: ApiResponse<Value> = fetch.fetch(&url, options).await;

        println!("── {} ({})", spec.label, spec.path);
        println!("Response:");
        println!("{}", serde_json::to_string_pretty(&resp)?);
        let (title, lines) = render_view(spec, &resp);
        println!("{title}:");
        for line in lines {
            println!("  {line}");
        }
        println!();
    }

    Ok(())
}
