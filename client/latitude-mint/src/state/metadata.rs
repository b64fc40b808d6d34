use serde::{Deserialize, Serialize};

/// Off-chain token metadata document, following the Metaplex JSON standard
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NftMetadata {
    /// NFT name
    pub name: String,
    /// NFT symbol
    pub symbol: String,
    /// Human readable description, embeds the geotag
    pub description: String,
    /// Gateway URL of the pinned image
    pub image: String,
    /// Latitude then Longitude
    pub attributes: Vec<Attribute>,
    pub properties: Properties,
    pub creators: Vec<Creator>,
}

/// Numeric trait shown by marketplaces
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Attribute {
    pub trait_type: String,
    pub value: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Properties {
    pub files: Vec<MetadataFile>,
    pub category: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MetadataFile {
    pub uri: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Creator entry of the document. Creators are unverified until they sign
/// a verification on-chain, so the document carries no `verified` flag.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Creator {
    /// Creator's wallet address
    pub address: String,
    /// Percentage share (0-100)
    pub share: u8,
}

impl NftMetadata {
    /// True when the attributes and file list agree with `image`.
    pub fn is_consistent(&self) -> bool {
        self.attributes.len() == 2
            && self.properties.files.len() == 1
            && self.properties.files[0].uri == self.image
    }
}
