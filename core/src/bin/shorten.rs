use std::process::ExitCode;

use clap::Parser;
use shortener_core::{ShortenerConfig, ShortenerProxy};
use tracing_subscriber::EnvFilter;

/// Shorten a URL through a Chhoto-URL compatible service.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The URL to shorten.
    longlink: String,

    /// Base address of the shortening service.
    #[arg(long, env = "API_BASE_URL")]
    api_base_url: String,

    /// API key sent as `X-API-Key`.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ShortenerConfig::new(args.api_base_url, args.api_key);
    let proxy = ShortenerProxy::new(&config, &args.longlink);

    if proxy.is_error() {
        eprintln!("{}", proxy.error());
        return ExitCode::FAILURE;
    }
    println!("{}", proxy.url());
    ExitCode::SUCCESS
}
