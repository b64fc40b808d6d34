use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MintError;
use crate::util::constants::{LOCATION_MAXIMUM_AGE, LOCATION_TIMEOUT};

/// Device position attached to a photo before minting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTag {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoTag {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Reject non-finite or out-of-range coordinates.
    pub fn validate(&self) -> Result<(), MintError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(MintError::invalid_input(format!(
                "latitude {} out of range",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(MintError::invalid_input(format!(
                "longitude {} out of range",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Accuracy and freshness requested from the geolocation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the collaborator may return
    pub maximum_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: LOCATION_TIMEOUT,
            maximum_age: LOCATION_MAXIMUM_AGE,
        }
    }
}

/// A photo read from local storage, ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAsset {
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    /// Hex SHA-256 of `bytes`
    pub digest: String,
}
