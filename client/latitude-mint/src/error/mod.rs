use solana_sdk::signature::Signature;
use thiserror::Error;

/// Errors that end a mint attempt.
///
/// Every variant is local to one attempt: the pipeline attaches it to the
/// attempt as its terminal failure and hands it back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintError {
    // ========== ASSET ERRORS ==========
    #[error("could not read photo {path}: {reason}")]
    AssetRead { path: String, reason: String },

    // ========== PINNING ERRORS ==========
    /// Non-success HTTP status, transport failure (status 0) or a response
    /// without a content identifier.
    #[error("upload failed with status {status}: {body}")]
    Upload { status: u16, body: String },

    // ========== INPUT VALIDATION ERRORS ==========
    #[error("invalid metadata input: {0}")]
    InvalidMetadataInput(String),

    // ========== LEDGER ERRORS ==========
    #[error("ledger query failed: {0}")]
    LedgerQuery(String),

    // ========== WALLET ERRORS ==========
    #[error("signing rejected: {0}")]
    SigningRejected(String),

    #[error("wallet session error: {0}")]
    WalletSession(String),

    // ========== SUBMISSION ERRORS ==========
    #[error("transaction submission failed: {reason}")]
    Submission { reason: String },

    /// The transaction was broadcast but not seen as confirmed in time. It
    /// may still land.
    #[error("transaction {signature} not confirmed in time; outcome unknown")]
    ConfirmationTimeout { signature: Signature },

    #[error("blockhash expired before the transaction landed")]
    StaleBlockhash,

    // ========== PIPELINE ERRORS ==========
    #[error("a mint attempt is already in progress")]
    ConcurrentAttemptRejected,

    #[error("mint attempt abandoned before completion")]
    Abandoned,
}

impl MintError {
    /// True when the transaction may or may not have landed.
    pub fn is_outcome_unknown(&self) -> bool {
        matches!(self, MintError::ConfirmationTimeout { .. })
    }

    /// True only for the error the submitter retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MintError::StaleBlockhash)
    }

    pub(crate) fn asset_read(path: impl Into<String>, reason: impl ToString) -> Self {
        MintError::AssetRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        MintError::InvalidMetadataInput(reason.into())
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
