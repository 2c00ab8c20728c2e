use anyhow::Result;
use comidita_core::gateways::PhotoStorageGateway;
use std::time::Duration;

pub const DEFAULT_BUCKET: &str = "review-photos";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Seconds
const CACHE_CONTROL: &str = "3600";

/// Photo storage backed by the REST API of a hosted object store bucket.
#[derive(Debug, Clone)]
pub struct ObjectStorage {
    pub base_url: String,
    pub bucket: String,
    pub api_key: String,
}

impl ObjectStorage {
    fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn upload_url(&self, file_name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{file_name}",
            self.base_url(),
            self.bucket
        )
    }

    pub fn public_url(&self, file_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{file_name}",
            self.base_url(),
            self.bucket
        )
    }
}

#[derive(Debug, serde::Deserialize, thiserror::Error)]
#[error("{message}")]
struct JsonError {
    message: String,
}

impl PhotoStorageGateway for ObjectStorage {
    fn upload(&self, file_name: &str, content_type: &str, data: &[u8]) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = client
            .post(self.upload_url(file_name))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .header(reqwest::header::CACHE_CONTROL, CACHE_CONTROL)
            .body(data.to_vec())
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let err = match response.json::<JsonError>() {
                Ok(json_error) => anyhow::anyhow!("Upload of {file_name} failed ({status}): {json_error}"),
                Err(_) => anyhow::anyhow!("Upload of {file_name} failed ({status})"),
            };
            return Err(err);
        }
        log::debug!("Uploaded {} bytes to {}", data.len(), self.upload_url(file_name));
        Ok(self.public_url(file_name))
    }
}
