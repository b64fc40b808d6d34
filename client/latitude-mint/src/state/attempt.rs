use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::error::MintError;
use crate::state::{GeoTag, MintInstructionSet, NftMetadata, PhotoAsset, UploadReceipt};

/// Lifecycle of a single mint attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MintPhase {
    Idle,
    Encoding,
    UploadingImage,
    UploadingMetadata,
    BuildingTransaction,
    Signing,
    Submitting,
    Confirming,
    Succeeded,
    Failed,
}

impl MintPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, MintPhase::Succeeded | MintPhase::Failed)
    }

    /// A new attempt may replace the current one only from these phases.
    pub fn accepts_new_attempt(self) -> bool {
        matches!(self, MintPhase::Idle | MintPhase::Succeeded | MintPhase::Failed)
    }

    /// Forward-only transitions, plus the way back to Signing used by the
    /// blockhash retry.
    pub fn can_advance_to(self, next: MintPhase) -> bool {
        use MintPhase::*;
        match (self, next) {
            (current, Failed) => !current.is_terminal(),
            (Idle, Encoding)
            | (Encoding, UploadingImage)
            | (UploadingImage, UploadingMetadata)
            | (UploadingMetadata, BuildingTransaction)
            | (BuildingTransaction, Signing)
            | (Signing, Submitting)
            | (Submitting, Confirming)
            | (Confirming, Succeeded) => true,
            (Submitting, Signing) | (Confirming, Signing) => true,
            _ => false,
        }
    }
}

/// Process-local record of one pipeline run
#[derive(Debug, Clone)]
pub struct MintAttempt {
    pub id: u64,
    /// Address of the fresh mint keypair generated for this attempt
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub photo_path: PathBuf,
    pub geo_tag: GeoTag,
    pub photo: Option<Arc<PhotoAsset>>,
    pub image_receipt: Option<UploadReceipt>,
    pub metadata: Option<NftMetadata>,
    pub metadata_receipt: Option<UploadReceipt>,
    pub instruction_set: Option<MintInstructionSet>,
    pub signature: Option<Signature>,
    pub error: Option<MintError>,
    phase: MintPhase,
    history: Vec<MintPhase>,
}

impl MintAttempt {
    pub fn new(id: u64, mint: Pubkey, owner: Pubkey, photo_path: PathBuf, geo_tag: GeoTag) -> Self {
        Self {
            id,
            mint,
            owner,
            photo_path,
            geo_tag,
            photo: None,
            image_receipt: None,
            metadata: None,
            metadata_receipt: None,
            instruction_set: None,
            signature: None,
            error: None,
            phase: MintPhase::Idle,
            history: vec![MintPhase::Idle],
        }
    }

    pub fn phase(&self) -> MintPhase {
        self.phase
    }

    /// Every phase entered so far, starting with Idle.
    pub fn history(&self) -> &[MintPhase] {
        &self.history
    }

    /// Number of times the transaction was signed.
    pub fn signing_rounds(&self) -> usize {
        self.history.iter().filter(|p| **p == MintPhase::Signing).count()
    }

    pub fn is_active(&self) -> bool {
        !self.phase.accepts_new_attempt()
    }

    pub(crate) fn advance(&mut self, next: MintPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal mint phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
        self.history.push(next);
    }

    pub(crate) fn succeed(&mut self, signature: Signature) {
        self.signature = Some(signature);
        self.advance(MintPhase::Succeeded);
    }

    pub(crate) fn fail(&mut self, error: MintError) {
        if let MintError::ConfirmationTimeout { signature } = &error {
            self.signature = Some(*signature);
        }
        self.error = Some(error);
        self.advance(MintPhase::Failed);
    }
}

/// Outcome of a successful mint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintReport {
    pub attempt_id: u64,
    #[serde(with = "display")]
    pub mint: Pubkey,
    #[serde(with = "display")]
    pub token_account: Pubkey,
    #[serde(with = "display")]
    pub metadata_account: Pubkey,
    pub image_uri: String,
    pub metadata_uri: String,
    #[serde(with = "display")]
    pub signature: Signature,
}

mod display {
    use std::fmt::Display;

    use serde::Serializer;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }
}
