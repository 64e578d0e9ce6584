//! The `httpclient` command.
//!
//! - `httpclient URL` - GET the URL
//! - `httpclient METHOD URL` - `POST` posts, any other method name GETs
//!
//! The raw response is written to stdout. Logs go to stderr.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use httpclient_core::{ClientConfig, HttpClient};

#[derive(Parser)]
#[command(name = "httpclient", version, about = "Plain HTTP/1.1 GET and POST over raw sockets")]
struct Cli {
    /// Method (GET or POST) when two arguments are given, otherwise the URL
    #[arg(value_name = "METHOD|URL")]
    first: String,

    /// URL to request
    #[arg(value_name = "URL")]
    second: Option<String>,

    /// Form field to send as key=value (repeatable)
    #[arg(short, long = "data", value_name = "KEY=VALUE", value_parser = parse_field)]
    data: Vec<(String, String)>,

    /// Seconds to wait for the TCP handshake
    #[arg(long = "connect-timeout", default_value_t = 30)]
    connect_timeout: u64,

    /// Seconds to wait on each read; waits for the server to close when unset
    #[arg(long = "read-timeout")]
    read_timeout: Option<u64>,

    /// Also print the parsed response as JSON
    #[arg(long)]
    json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// `(method, url)`; a lone argument is the URL.
    fn method_and_url(&self) -> (&str, &str) {
        match &self.second {
            Some(url) => (self.first.as_str(), url.as_str()),
            None => ("GET", self.first.as_str()),
        }
    }
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not install logger: {e}");
    }

    let config = ClientConfig::default()
        .with_connect_timeout(Duration::from_secs(cli.connect_timeout))
        .with_read_timeout(cli.read_timeout.map(Duration::from_secs));
    let client = HttpClient::new(config);

    let (method, url) = cli.method_and_url();
    let form = (!cli.data.is_empty()).then_some(cli.data.as_slice());

    match client.command(url, method, form) {
        Ok(response) => {
            if cli.json {
                match serde_json::to_string_pretty(&response) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        error!(cause = %e, "could not serialize response");
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(cause = %e, url, "request failed");
            ExitCode::FAILURE
        }
    }
}
