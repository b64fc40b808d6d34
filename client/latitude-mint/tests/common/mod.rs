#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use latitude_mint::interfaces::{LedgerClient, PinningService, WalletAdapter, WalletSession};
use latitude_mint::{MintError, MintPipeline, PipelineConfig, UploadReceipt};
use serde_json::Value;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use tokio::sync::Notify;

pub const GATEWAY: &str = "https://gateway.test";
pub const RENT: u64 = 1_461_600;

pub type TestPipeline<W> = MintPipeline<MockPinning, MockLedger, W>;

pub fn fast_config() -> PipelineConfig {
    PipelineConfig {
        confirm_timeout: Duration::from_millis(50),
        poll_interval: Duration::from_millis(5),
        ..PipelineConfig::default()
    }
}

static FIXTURES: AtomicUsize = AtomicUsize::new(0);

/// Write a small JPEG-looking file under a unique name and return its path.
pub fn photo_fixture(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "latitude-mint-{}-{name}-{}.jpg",
        std::process::id(),
        FIXTURES.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'])
        .unwrap();
    path
}

#[derive(Default)]
struct PinningLog {
    binary_calls: AtomicUsize,
    documents: Mutex<Vec<(String, Value)>>,
}

/// In-memory pinning service. Clones share the same call log.
#[derive(Clone, Default)]
pub struct MockPinning {
    log: Arc<PinningLog>,
    image_failure: Option<MintError>,
    gate: Option<Arc<Notify>>,
}

impl MockPinning {
    pub fn failing_image(error: MintError) -> Self {
        Self {
            image_failure: Some(error),
            ..Self::default()
        }
    }

    /// Image uploads wait until the gate is notified.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn binary_calls(&self) -> usize {
        self.log.binary_calls.load(Ordering::SeqCst)
    }

    pub fn documents(&self) -> Vec<(String, Value)> {
        self.log.documents.lock().unwrap().clone()
    }
}

impl PinningService for MockPinning {
    async fn upload_binary(
        &self,
        bytes: Vec<u8>,
        _content_type: &str,
        _file_name: &str,
    ) -> Result<UploadReceipt, MintError> {
        let call = self.log.binary_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(error) = &self.image_failure {
            return Err(error.clone());
        }
        assert!(!bytes.is_empty());
        Ok(UploadReceipt::new(format!("QmImage{call}"), GATEWAY))
    }

    async fn upload_json(&self, document: &Value, name: &str) -> Result<UploadReceipt, MintError> {
        let mut documents = self.log.documents.lock().unwrap();
        documents.push((name.to_string(), document.clone()));
        Ok(UploadReceipt::new(format!("QmMeta{}", documents.len()), GATEWAY))
    }
}

/// Scripted ledger. Every blockhash handed out is recorded, and sends fail
/// with the queued errors before succeeding.
pub struct MockLedger {
    rent: u64,
    /// Status poll from which the transaction shows as confirmed
    lands_on_poll: Option<usize>,
    blockhash_expired: bool,
    status_polls: AtomicUsize,
    blockhashes: Mutex<Vec<Hash>>,
    send_failures: Mutex<VecDeque<MintError>>,
    sent: Mutex<Vec<Transaction>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            rent: RENT,
            lands_on_poll: Some(0),
            blockhash_expired: false,
            status_polls: AtomicUsize::new(0),
            blockhashes: Mutex::new(Vec::new()),
            send_failures: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Transactions are accepted but never show up as confirmed.
    pub fn never_lands() -> Self {
        Self {
            lands_on_poll: None,
            ..Self::new()
        }
    }

    /// Blockhashes expire right away and transactions never land.
    pub fn expiring() -> Self {
        Self {
            lands_on_poll: None,
            blockhash_expired: true,
            ..Self::new()
        }
    }

    /// The transaction first shows up in the slot that expires its blockhash.
    pub fn lands_as_blockhash_expires() -> Self {
        Self {
            lands_on_poll: Some(1),
            blockhash_expired: true,
            ..Self::new()
        }
    }

    pub fn failing_sends(errors: impl IntoIterator<Item = MintError>) -> Self {
        let ledger = Self::new();
        ledger.send_failures.lock().unwrap().extend(errors);
        ledger
    }

    pub fn blockhashes(&self) -> Vec<Hash> {
        self.blockhashes.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }
}

impl LedgerClient for MockLedger {
    async fn balance(&self, _owner: &Pubkey) -> Result<u64, MintError> {
        Ok(5_000_000_000)
    }

    async fn minimum_balance_for_rent_exemption(&self, _data_len: usize) -> Result<u64, MintError> {
        Ok(self.rent)
    }

    async fn latest_blockhash(&self) -> Result<Hash, MintError> {
        let blockhash = Hash::new_unique();
        self.blockhashes.lock().unwrap().push(blockhash);
        Ok(blockhash)
    }

    async fn is_blockhash_valid(&self, _blockhash: &Hash) -> Result<bool, MintError> {
        Ok(!self.blockhash_expired)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, MintError> {
        if let Some(error) = self.send_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        transaction
            .verify()
            .map_err(|e| MintError::Submission { reason: e.to_string() })?;
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn signature_status(
        &self,
        _signature: &Signature,
    ) -> Result<Option<Result<(), TransactionError>>, MintError> {
        let poll = self.status_polls.fetch_add(1, Ordering::SeqCst);
        let landed = self.lands_on_poll.is_some_and(|first| poll >= first);
        Ok(landed.then_some(Ok(())))
    }

    async fn request_airdrop(&self, _owner: &Pubkey, _lamports: u64) -> Result<Signature, MintError> {
        Ok(Signature::new_unique())
    }
}

/// Wallet whose user declines every signing request.
pub struct RejectingWallet {
    pub pubkey: Pubkey,
    pub released: Arc<AtomicUsize>,
}

impl RejectingWallet {
    pub fn new(pubkey: Pubkey) -> Self {
        Self {
            pubkey,
            released: Arc::new(AtomicUsize::new(0)),
        }
    }
}

pub struct RejectingSession {
    pubkey: Pubkey,
    released: Arc<AtomicUsize>,
}

impl WalletAdapter for RejectingWallet {
    type Session = RejectingSession;

    async fn open_session(&self) -> Result<RejectingSession, MintError> {
        Ok(RejectingSession {
            pubkey: self.pubkey,
            released: Arc::clone(&self.released),
        })
    }
}

impl WalletSession for RejectingSession {
    async fn authorize(&mut self) -> Result<Pubkey, MintError> {
        Ok(self.pubkey)
    }

    async fn sign_transactions(
        &mut self,
        _transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>, MintError> {
        Err(MintError::SigningRejected("user declined".to_string()))
    }

    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
