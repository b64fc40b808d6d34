//! Mint pipeline orchestrator.
//!
//! Drives one attempt through encode, upload, build, sign, submit and
//! confirm, strictly in sequence. At most one attempt runs at a time; the
//! busy flag lives on the pipeline instance and is cleared only when the
//! attempt reaches Succeeded or Failed, including when the caller drops the
//! mint future part way through.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::MintError;
use crate::event::{MintFailed, NftMinted};
use crate::interfaces::{LedgerClient, PinningService, WalletAdapter};
use crate::operations::{build_metadata, build_mint_instructions, read_photo, TransactionSubmitter};
use crate::state::{GeoTag, MintAttempt, MintPhase, MintReport};

/// What the host screen hands over when the user presses "Mint"
#[derive(Debug, Clone, PartialEq)]
pub struct MintRequest {
    /// Path or `file://` URI from the camera collaborator
    pub photo: PathBuf,
    pub geo_tag: Option<GeoTag>,
    /// Connected wallet account
    pub owner: Pubkey,
}

impl MintRequest {
    pub fn new(photo: impl Into<PathBuf>, owner: Pubkey) -> Self {
        Self {
            photo: photo.into(),
            geo_tag: None,
            owner,
        }
    }

    pub fn with_geo_tag(mut self, geo_tag: GeoTag) -> Self {
        self.geo_tag = Some(geo_tag);
        self
    }

    /// Minting stays disabled until a position fix has arrived.
    pub fn is_ready(&self) -> bool {
        self.geo_tag.is_some()
    }
}

#[derive(Debug, Default)]
struct PipelineState {
    busy: bool,
    next_id: u64,
    current: Option<MintAttempt>,
}

fn lock(state: &Mutex<PipelineState>) -> MutexGuard<'_, PipelineState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct MintPipeline<P, L, W> {
    config: PipelineConfig,
    pinning: P,
    ledger: L,
    wallet: W,
    state: Mutex<PipelineState>,
}

impl<P, L, W> MintPipeline<P, L, W>
where
    P: PinningService,
    L: LedgerClient,
    W: WalletAdapter,
{
    pub fn new(config: PipelineConfig, pinning: P, ledger: L, wallet: W) -> Self {
        Self {
            config,
            pinning,
            ledger,
            wallet,
            state: Mutex::new(PipelineState::default()),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).busy
    }

    /// Phase of the current attempt, Idle when there is none.
    pub fn phase(&self) -> MintPhase {
        lock(&self.state)
            .current
            .as_ref()
            .map_or(MintPhase::Idle, MintAttempt::phase)
    }

    /// Snapshot of the current attempt.
    pub fn current_attempt(&self) -> Option<MintAttempt> {
        lock(&self.state).current.clone()
    }

    /// Discard a finished attempt once its outcome has been shown. Returns
    /// false, and changes nothing, while an attempt is still running.
    pub fn acknowledge(&self) -> bool {
        let mut state = lock(&self.state);
        if state.busy {
            return false;
        }
        state.current = None;
        true
    }

    pub async fn wallet_balance(&self, owner: &Pubkey) -> Result<u64, MintError> {
        self.ledger.balance(owner).await
    }

    /// Run a complete mint attempt.
    ///
    /// Returns `ConcurrentAttemptRejected` without touching the running
    /// attempt when another one is in flight. The geotag and the configured
    /// name and symbol are checked before any attempt is created, so an
    /// invalid request never pins anything. Every attempt uses a freshly
    /// generated mint keypair, so retrying after a failure never collides
    /// with a mint that was partially submitted.
    pub async fn mint(&self, request: MintRequest) -> Result<MintReport, MintError> {
        let mint_keypair = Keypair::new();
        let in_flight = self.begin(&request, mint_keypair.pubkey())?;

        let result = self.run(&request, &mint_keypair).await;
        in_flight.complete(&result);
        result
    }

    fn begin(&self, request: &MintRequest, mint: Pubkey) -> Result<InFlight<'_>, MintError> {
        let mut state = lock(&self.state);
        if state.busy {
            debug!(%mint, "mint trigger ignored, attempt already running");
            return Err(MintError::ConcurrentAttemptRejected);
        }
        let Some(geo_tag) = request.geo_tag else {
            return Err(MintError::invalid_input("geotag is missing"));
        };
        geo_tag.validate()?;
        self.config.validate_labels()?;

        state.next_id += 1;
        let id = state.next_id;
        state.current = Some(MintAttempt::new(
            id,
            mint,
            request.owner,
            request.photo.clone(),
            geo_tag,
        ));
        state.busy = true;
        info!(attempt = id, %mint, owner = %request.owner, "mint attempt started");

        Ok(InFlight {
            state: &self.state,
            done: false,
        })
    }

    async fn run(&self, request: &MintRequest, mint_keypair: &Keypair) -> Result<MintReport, MintError> {
        let owner = request.owner;
        let mint = mint_keypair.pubkey();

        self.advance(MintPhase::Encoding);
        let photo = Arc::new(read_photo(&request.photo).await?);
        self.record(|attempt| attempt.photo = Some(Arc::clone(&photo)));

        self.advance(MintPhase::UploadingImage);
        let image = self
            .pinning
            .upload_binary(photo.bytes.clone(), photo.content_type, &photo.file_name)
            .await?;
        self.record(|attempt| attempt.image_receipt = Some(image.clone()));

        self.advance(MintPhase::UploadingMetadata);
        let metadata = build_metadata(
            &image.url,
            photo.content_type,
            request.geo_tag.as_ref(),
            &owner.to_string(),
            &self.config.nft_name,
            &self.config.nft_symbol,
        )?;
        self.record(|attempt| attempt.metadata = Some(metadata.clone()));
        if !metadata.is_consistent() {
            return Err(MintError::invalid_input("metadata files do not match the image"));
        }
        let document = serde_json::to_value(&metadata)
            .map_err(|e| MintError::invalid_input(format!("metadata not serializable: {e}")))?;
        let metadata_receipt = self
            .pinning
            .upload_json(&document, &format!("{mint}.json"))
            .await?;
        self.record(|attempt| attempt.metadata_receipt = Some(metadata_receipt.clone()));

        self.advance(MintPhase::BuildingTransaction);
        let instruction_set =
            build_mint_instructions(&self.ledger, &mint, &owner, &metadata_receipt.url, &metadata).await?;
        self.record(|attempt| attempt.instruction_set = Some(instruction_set.clone()));

        let submitter = TransactionSubmitter::new(&self.ledger, &self.config);
        let signature = submitter
            .submit(&instruction_set, mint_keypair, &self.wallet, |phase| {
                self.advance(phase)
            })
            .await?;

        Ok(MintReport {
            attempt_id: self.attempt_id(),
            mint,
            token_account: instruction_set.token_account(),
            metadata_account: instruction_set.metadata_account(),
            image_uri: image.url,
            metadata_uri: metadata_receipt.url,
            signature,
        })
    }

    fn advance(&self, phase: MintPhase) {
        let mut state = lock(&self.state);
        if let Some(attempt) = state.current.as_mut() {
            attempt.advance(phase);
            info!(attempt = attempt.id, ?phase, "mint phase");
        }
    }

    fn record(&self, update: impl FnOnce(&mut MintAttempt)) {
        if let Some(attempt) = lock(&self.state).current.as_mut() {
            update(attempt);
        }
    }

    fn attempt_id(&self) -> u64 {
        lock(&self.state).current.as_ref().map_or(0, |attempt| attempt.id)
    }
}

/// Marks the running attempt finished. If dropped before `complete`, the
/// attempt is recorded as abandoned and the busy flag cleared.
struct InFlight<'a> {
    state: &'a Mutex<PipelineState>,
    done: bool,
}

impl InFlight<'_> {
    fn complete(mut self, result: &Result<MintReport, MintError>) {
        self.done = true;
        let mut state = lock(self.state);
        state.busy = false;
        let Some(attempt) = state.current.as_mut() else {
            return;
        };
        match result {
            Ok(report) => {
                attempt.succeed(report.signature);
                NftMinted::new(
                    attempt.id,
                    &report.mint,
                    &attempt.owner,
                    &report.metadata_uri,
                    &report.signature,
                )
                .emit();
            }
            Err(error) => {
                let phase = attempt.phase();
                attempt.fail(error.clone());
                MintFailed::new(attempt.id, &attempt.mint, phase, error).emit();
            }
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut state = lock(self.state);
        state.busy = false;
        if let Some(attempt) = state.current.as_mut() {
            if !attempt.phase().is_terminal() {
                let phase = attempt.phase();
                attempt.fail(MintError::Abandoned);
                MintFailed::new(attempt.id, &attempt.mint, phase, &MintError::Abandoned).emit();
            }
        }
    }
}
