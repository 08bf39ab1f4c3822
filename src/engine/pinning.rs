// Icon upload to the pinning service (Pinata).
// One multipart POST with a bearer JWT from configuration; the returned
// content hash becomes a gateway URL.

use std::time::Duration;

use log::info;

use crate::atoms::constants::{PINATA_API_URL, PINATA_GATEWAY_URL};
use crate::atoms::error::{LaunchError, LaunchResult};
use crate::engine::config::LaunchConfig;

/// Pin an icon file and return its content-addressed gateway URL.
pub async fn upload_icon(
    config: &LaunchConfig,
    file_name: &str,
    bytes: Vec<u8>,
) -> LaunchResult<String> {
    let client = reqwest::Client::new();

    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("file", part);

    let resp = client
        .post(PINATA_API_URL)
        .bearer_auth(&config.pinata_jwt)
        .multipart(form)
        .timeout(Duration::from_secs(60))
        .send()
        .await
        .map_err(|e| LaunchError::Upload(format!("Failed to upload image: {}", e)))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(LaunchError::Upload(format!(
            "Failed to upload image ({}): {}",
            status, body
        )));
    }

    let json: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| LaunchError::Upload(format!("Failed to upload image: {}", e)))?;

    let hash = json
        .get("IpfsHash")
        .and_then(|v| v.as_str())
        .ok_or_else(|| LaunchError::Upload("Failed to upload image: missing IpfsHash".into()))?;

    let url = gateway_url(hash);
    info!("[pin] Icon pinned: {} → {}", file_name, url);
    Ok(url)
}

fn gateway_url(hash: &str) -> String {
    format!("{}/{}", PINATA_GATEWAY_URL, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_url_shape() {
        assert_eq!(
            gateway_url("QmYwAPJzv5CZsnAzt8auVZRn1pfejP3U6U4CsDukmFJqJZ"),
            "https://gateway.pinata.cloud/ipfs/QmYwAPJzv5CZsnAzt8auVZRn1pfejP3U6U4CsDukmFJqJZ"
        );
    }
}
