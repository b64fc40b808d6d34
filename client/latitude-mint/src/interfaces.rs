//! Collaborators the mint pipeline talks to.
//!
//! Each trait is the boundary to a remote service or a device capability.
//! The crate ships one production implementation per trait (`PinataClient`,
//! `RpcLedger`, `KeypairWallet`, `FixedLocation`); hosts and tests supply
//! their own.

use std::future::Future;

use serde_json::Value;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};

use crate::error::MintError;
use crate::state::{GeoTag, LocationOptions, UploadReceipt};

/// Content-addressed storage for the image and its metadata document
pub trait PinningService: Send + Sync {
    fn upload_binary(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        file_name: &str,
    ) -> impl Future<Output = Result<UploadReceipt, MintError>> + Send;

    fn upload_json(
        &self,
        document: &Value,
        name: &str,
    ) -> impl Future<Output = Result<UploadReceipt, MintError>> + Send;
}

/// Read and write access to chain state
pub trait LedgerClient: Send + Sync {
    fn balance(&self, owner: &Pubkey) -> impl Future<Output = Result<u64, MintError>> + Send;

    fn minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> impl Future<Output = Result<u64, MintError>> + Send;

    fn latest_blockhash(&self) -> impl Future<Output = Result<Hash, MintError>> + Send;

    fn is_blockhash_valid(&self, blockhash: &Hash) -> impl Future<Output = Result<bool, MintError>> + Send;

    /// Broadcast a fully signed transaction. An expired blockhash is
    /// reported as `MintError::StaleBlockhash`.
    fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> impl Future<Output = Result<Signature, MintError>> + Send;

    /// `None` while the ledger has not seen the transaction at the
    /// configured commitment.
    fn signature_status(
        &self,
        signature: &Signature,
    ) -> impl Future<Output = Result<Option<Result<(), TransactionError>>, MintError>> + Send;

    fn request_airdrop(
        &self,
        owner: &Pubkey,
        lamports: u64,
    ) -> impl Future<Output = Result<Signature, MintError>> + Send;
}

/// Opens signing sessions with the user's wallet
pub trait WalletAdapter: Send + Sync {
    type Session: WalletSession;

    fn open_session(&self) -> impl Future<Output = Result<Self::Session, MintError>> + Send;
}

/// One transacting session. `release` must be safe to call more than once.
pub trait WalletSession: Send {
    fn authorize(&mut self) -> impl Future<Output = Result<Pubkey, MintError>> + Send;

    fn sign_transactions(
        &mut self,
        transactions: Vec<Transaction>,
    ) -> impl Future<Output = Result<Vec<Transaction>, MintError>> + Send;

    fn release(&mut self);
}

/// Source of the device position
pub trait GeoLocator: Send + Sync {
    fn current_position(
        &self,
        options: LocationOptions,
    ) -> impl Future<Output = Result<GeoTag, MintError>> + Send;
}

/// Location source that always reports the same coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub GeoTag);

impl GeoLocator for FixedLocation {
    async fn current_position(&self, _options: LocationOptions) -> Result<GeoTag, MintError> {
        self.0.validate()?;
        Ok(self.0)
    }
}
