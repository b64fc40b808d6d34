use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::PinningConfig;
use crate::error::MintError;
use crate::interfaces::PinningService;
use crate::state::UploadReceipt;
use crate::util::constants::{PIN_JSON_PATH, UPLOAD_PATH};

/// Pinata-compatible pinning client.
///
/// Neither upload retries: a repeated request could pin the same content
/// twice, so failures go straight back to the caller.
#[derive(Debug, Clone)]
pub struct PinataClient {
    http: Client,
    config: PinningConfig,
}

impl PinataClient {
    pub fn new(config: PinningConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    async fn into_receipt(&self, response: Response) -> Result<UploadReceipt, MintError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        parse_receipt(status, &body, &self.config.gateway_url)
    }
}

impl PinningService for PinataClient {
    async fn upload_binary(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        file_name: &str,
    ) -> Result<UploadReceipt, MintError> {
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(transport_error)?;
        let form = Form::new().part("file", part);

        debug!(file_name, size, content_type, "uploading image");
        let response = self
            .http
            .post(self.endpoint(UPLOAD_PATH))
            .bearer_auth(&self.config.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let receipt = self.into_receipt(response).await?;
        info!(cid = %receipt.cid, "image pinned");
        Ok(receipt)
    }

    async fn upload_json(&self, document: &Value, name: &str) -> Result<UploadReceipt, MintError> {
        let body = json!({
            "pinataContent": document,
            "pinataMetadata": { "name": name },
        });

        debug!(name, "uploading metadata document");
        let response = self
            .http
            .post(self.endpoint(PIN_JSON_PATH))
            .bearer_auth(&self.config.jwt)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let receipt = self.into_receipt(response).await?;
        info!(cid = %receipt.cid, "metadata pinned");
        Ok(receipt)
    }
}

/// Turn a pinning response into a receipt.
///
/// Accepts `IpfsHash` (pinJSONToIPFS), `cid` and `data.cid` (file upload
/// API). Anything else, or a non-2xx status, is an `Upload` error carrying
/// the raw body.
pub fn parse_receipt(status: u16, body: &str, gateway: &str) -> Result<UploadReceipt, MintError> {
    let failure = || MintError::Upload {
        status,
        body: body.to_string(),
    };

    if !(200..300).contains(&status) {
        return Err(failure());
    }

    let value: Value = serde_json::from_str(body).map_err(|_| failure())?;
    let cid = value
        .get("IpfsHash")
        .or_else(|| value.get("cid"))
        .or_else(|| value.get("data").and_then(|data| data.get("cid")))
        .and_then(Value::as_str)
        .filter(|cid| !cid.is_empty())
        .ok_or_else(failure)?;

    Ok(UploadReceipt::new(cid, gateway))
}

fn transport_error(err: reqwest::Error) -> MintError {
    MintError::Upload {
        status: err.status().map(|s| s.as_u16()).unwrap_or(0),
        body: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GATEWAY: &str = "https://gateway.pinata.cloud";

    #[test]
    fn parses_pin_json_response() {
        let body = r#"{"IpfsHash":"QmHash","PinSize":120,"Timestamp":"2024-01-01T00:00:00Z"}"#;
        let receipt = parse_receipt(200, body, GATEWAY).unwrap();
        assert_eq!(receipt.cid, "QmHash");
        assert_eq!(receipt.url, "https://gateway.pinata.cloud/ipfs/QmHash");
    }

    #[test]
    fn parses_flat_and_nested_cid() {
        assert_eq!(parse_receipt(200, r#"{"cid":"bafyA"}"#, GATEWAY).unwrap().cid, "bafyA");
        assert_eq!(
            parse_receipt(201, r#"{"data":{"id":"1","cid":"bafyB"}}"#, GATEWAY).unwrap().cid,
            "bafyB"
        );
    }

    #[test]
    fn server_error_keeps_status_and_body() {
        let err = parse_receipt(500, "boom", GATEWAY).unwrap_err();
        assert_eq!(
            err,
            MintError::Upload {
                status: 500,
                body: "boom".into()
            }
        );
    }

    #[test]
    fn missing_cid_is_upload_error() {
        for body in [r#"{"PinSize":1}"#, r#"{"cid":""}"#, "not json", r#"{"cid":7}"#] {
            let err = parse_receipt(200, body, GATEWAY).unwrap_err();
            assert!(matches!(err, MintError::Upload { status: 200, .. }), "{body}");
        }
    }
}
