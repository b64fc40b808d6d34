use serde::Serialize;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::{error, info, warn};

use crate::error::MintError;
use crate::state::MintPhase;

/// NFT lifecycle events
#[derive(Debug, Clone, Serialize)]
pub struct NftMinted {
    pub attempt_id: u64,
    /// The mint account of the newly created NFT
    pub mint: String,
    /// NFT owner
    pub owner: String,
    /// Metadata URI
    pub uri: String,
    pub signature: String,
}

impl NftMinted {
    pub fn new(attempt_id: u64, mint: &Pubkey, owner: &Pubkey, uri: &str, signature: &Signature) -> Self {
        Self {
            attempt_id,
            mint: mint.to_string(),
            owner: owner.to_string(),
            uri: uri.to_string(),
            signature: signature.to_string(),
        }
    }

    pub fn emit(&self) {
        info!(
            attempt = self.attempt_id,
            mint = %self.mint,
            owner = %self.owner,
            uri = %self.uri,
            signature = %self.signature,
            "nft minted"
        );
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MintFailed {
    pub attempt_id: u64,
    pub mint: String,
    /// Phase the attempt was in when it failed
    pub phase: MintPhase,
    pub reason: String,
    /// The transaction may still land
    pub outcome_unknown: bool,
}

impl MintFailed {
    pub fn new(attempt_id: u64, mint: &Pubkey, phase: MintPhase, error: &MintError) -> Self {
        Self {
            attempt_id,
            mint: mint.to_string(),
            phase,
            reason: error.to_string(),
            outcome_unknown: error.is_outcome_unknown(),
        }
    }

    pub fn emit(&self) {
        if self.outcome_unknown {
            warn!(
                attempt = self.attempt_id,
                mint = %self.mint,
                phase = ?self.phase,
                reason = %self.reason,
                "mint outcome unknown"
            );
        } else {
            error!(
                attempt = self.attempt_id,
                mint = %self.mint,
                phase = ?self.phase,
                reason = %self.reason,
                "mint failed"
            );
        }
    }
}
