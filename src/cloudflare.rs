use log::info;
use reqwest::Client;

use crate::config::Config;
use crate::error::Error;

pub const API_ENDPOINT: &str = "https://www.cloudflare.com/api_json.html";

/// Pushes `new_ip` to every configured record via the legacy form API, in
/// order. The first record whose request fails aborts the loop, so records
/// after it are left untouched for this run. The API answers 200 with a JSON
/// body even for failed edits; the body is logged but not inspected.
pub async fn update_records(
    client: &Client,
    endpoint: &str,
    config: &Config,
    new_ip: &str,
) -> Result<(), Error> {
    for record in &config.records {
        let form = [
            ("a", "rec_edit"),
            ("tkn", config.token.as_str()),
            ("email", config.email.as_str()),
            ("z", config.zone.as_str()),
            ("id", record.id.as_str()),
            ("name", record.hostname.as_str()),
            ("type", "A"),
            ("ttl", "1"),
            ("content", new_ip),
        ];

        let response = client.post(endpoint).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        info!(target: "cfupdate", "{}: {} {}", record.hostname, status, body);
    }

    Ok(())
}
