use serde::{Deserialize, Serialize};

/// Result of pinning a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Content identifier assigned by the pinning service
    pub cid: String,
    /// Gateway URL the content can be fetched from
    pub url: String,
}

impl UploadReceipt {
    pub fn new(cid: impl Into<String>, gateway: &str) -> Self {
        let cid = cid.into();
        let url = format!("{}/ipfs/{}", gateway.trim_end_matches('/'), cid);
        Self { cid, url }
    }
}
