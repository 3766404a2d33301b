use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use futures::future::join_all;
use og_fetch::{FetchResult, OpenGraphData, OpenGraphDataDownloader, SessionConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "og-fetch", version, about = "Fetch Open Graph metadata for URLs")]
struct Cli {
    /// URLs to fetch
    #[arg(required = true)]
    urls: Vec<String>,

    /// Seconds to wait for response data before giving up
    #[arg(long, default_value_t = 30)]
    request_timeout: u64,

    /// Seconds allowed for a whole transfer
    #[arg(long, default_value_t = 60)]
    resource_timeout: u64,

    #[arg(long)]
    user_agent: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn print_data(data: &OpenGraphData, json: bool) {
    if json {
        match serde_json::to_string_pretty(data) {
            Ok(out) => println!("{}", out),
            Err(e) => tracing::error!(error = %e, "failed to serialize result"),
        }
        return;
    }

    println!("{}", data.source_url);
    let fields = [
        ("title", &data.page_title),
        ("description", &data.page_description),
        ("type", &data.page_type),
        ("site", &data.site_name),
        ("image", &data.image_url),
        ("url", &data.url),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {:<12} {}", label, value);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("og_fetch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SessionConfig {
        request_timeout: Duration::from_secs(cli.request_timeout),
        resource_timeout: Duration::from_secs(cli.resource_timeout),
        ..Default::default()
    };
    if let Some(user_agent) = cli.user_agent {
        config.user_agent = user_agent;
    }

    let downloader = match OpenGraphDataDownloader::new(config) {
        Ok(downloader) => downloader,
        Err(e) => {
            tracing::error!(error = %e, "failed to start");
            return ExitCode::FAILURE;
        }
    };

    let pending = cli.urls.iter().map(|url| {
        let (_task, rx) = downloader.fetch_channel(url);
        async move { (url, rx.await) }
    });

    let mut failed = false;
    for (url, result) in join_all(pending).await {
        match result {
            Ok(FetchResult::Success { data, .. }) => print_data(&data, cli.json),
            Ok(FetchResult::Failure { error, .. }) => {
                failed = true;
                tracing::error!(url = %url, error = %error, "fetch failed");
            }
            Err(_) => {
                failed = true;
                tracing::error!(url = %url, "fetch dropped without a result");
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
