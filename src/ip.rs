use log::debug;
use reqwest::Client;

use crate::error::Error;

pub const PUBLIC_IP_ENDPOINT: &str = "http://myip.dnsomatic.com/";

/// Looks up the current public IPv4 address of the machine. If the machine
/// is behind NAT, this is the internet-routable address. The echo service
/// responds with a bare IPv4 literal; the body is returned verbatim.
pub async fn resolve_public_address(client: &Client, endpoint: &str) -> Result<String, Error> {
    debug!(target: "cfupdate", "Querying public address: GET {}", endpoint);
    let response = client.get(endpoint).send().await?;
    let body = response.text().await?;
    debug!(target: "cfupdate", "Public address is {}", body);
    Ok(body)
}
