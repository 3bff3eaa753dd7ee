//! Demo client: writes a timestamp to a running timestore and reads it back.

use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use tracing_subscriber::FmtSubscriber;

use timestore::codec::{self, WireFormat};
use timestore::state::Timestamp;

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "timestore-client")]
#[command(about = "Set a time on a timestore server and read it back", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the server
    #[arg(long, env = "TIMESTORE_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Body format the server is configured with (text or json)
    #[arg(long, default_value = "text")]
    format: WireFormat,

    /// Seconds since the Unix epoch to store (default: now)
    #[arg(long, allow_negative_numbers = true)]
    time: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let cli = Cli::parse();
    let base = cli.url.trim_end_matches('/');

    let value = match cli.time {
        Some(secs) => Timestamp::from_unix_seconds(secs)
            .with_context(|| format!("{secs} is not a representable time"))?,
        None => Timestamp::now(),
    };

    let client = Client::new();

    tracing::info!("Setting time on {base} to {value}");
    let res = client
        .post(format!("{base}/setTime"))
        .header(CONTENT_TYPE, cli.format.content_type())
        .body(codec::encode(cli.format, value))
        .send()
        .await
        .context("setTime request failed")?;
    let status = res.status();
    expect_ok("setTime", status, res.text().await.unwrap_or_default())?;

    let res = client
        .get(format!("{base}/getTime"))
        .send()
        .await
        .context("getTime request failed")?;
    let status = res.status();
    let body = res.bytes().await.context("failed to read getTime body")?;
    expect_ok("getTime", status, String::from_utf8_lossy(&body).into_owned())?;

    let stored = codec::decode(cli.format, &body)?
        .context("server returned a body without a time value")?;
    tracing::info!("Server reports time {stored}");

    if stored.truncate_to_seconds() != value.truncate_to_seconds() {
        bail!("time read back ({stored}) differs from time written ({value})");
    }

    tracing::info!("Round trip OK");
    Ok(())
}

fn expect_ok(op: &str, status: StatusCode, body: String) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        bail!("{op} returned {status}: {body}")
    }
}
