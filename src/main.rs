mod cloudflare;
mod config;
mod error;
mod ip;
#[cfg(test)]
mod testserver;

use clap::{App, Arg};
use log::{debug, info};
use std::path::Path;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::error::Error;

// An external scheduler is expected to re-run us around this often;
// History.NextVerify records the deadline but nothing in-process reads it.
const VERIFY_INTERVAL_SECS: i64 = 14 * 60;

#[tokio::main]
async fn main() {
    env_logger::init();

    let matches = App::new("cfupdate")
        .version("0.1.0")
        .about("Updates CloudFlare DNS records when the public address of the machine changes")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("location of the config file")
                .takes_value(true),
        )
        .get_matches();

    let result = match matches.value_of("config") {
        Some(path) => {
            run(
                Path::new(path),
                ip::PUBLIC_IP_ENDPOINT,
                cloudflare::API_ENDPOINT,
            )
            .await
        }
        None => Err(Error::Config(
            "no config file specified; use --config or -c".to_string(),
        )),
    };

    if let Err(err) = result {
        println!("error: {}", err);
        process::exit(1);
    }
}

async fn run(config_path: &Path, ip_endpoint: &str, api_endpoint: &str) -> Result<(), Error> {
    let mut config = Config::load(config_path)?;

    let client = reqwest::Client::new();
    let public_ip = ip::resolve_public_address(&client, ip_endpoint).await?;

    // Exact string comparison: the last pushed address is stored verbatim.
    if public_ip == config.history.last_ip {
        debug!(target: "cfupdate", "Public address unchanged, nothing to do");
        return Ok(());
    }

    info!(
        target: "cfupdate",
        "Public address changed from {:?} to {:?}, updating {} record(s)",
        config.history.last_ip,
        public_ip,
        config.records.len()
    );
    cloudflare::update_records(&client, api_endpoint, &config, &public_ip).await?;

    // Only reached when every record took the new address; a failure above
    // leaves LastIP stale on disk even if some records were already edited.
    let now = unix_now();
    config.history.last_ip = public_ip;
    config.history.last_set = now;
    config.history.next_verify = now + VERIFY_INTERVAL_SECS;
    config.save(config_path)?;

    Ok(())
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
