use std::time::Duration;

use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::MintError;
use crate::interfaces::{LedgerClient, WalletAdapter, WalletSession};
use crate::state::{MintInstructionSet, MintPhase};
use crate::util::constants::MAX_BLOCKHASH_RETRIES;
use crate::wallet::SigningScope;

/// Signs, broadcasts and confirms a mint transaction.
pub struct TransactionSubmitter<'a, L> {
    ledger: &'a L,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl<'a, L: LedgerClient> TransactionSubmitter<'a, L> {
    pub fn new(ledger: &'a L, config: &PipelineConfig) -> Self {
        Self {
            ledger,
            confirm_timeout: config.confirm_timeout,
            poll_interval: config.poll_interval,
        }
    }

    /// Submit the instruction set and wait for confirmation.
    ///
    /// The instruction set's owner pays the fee. An expired blockhash is
    /// retried once with a fresh blockhash and new signatures; every other
    /// failure is returned as-is. `on_phase` is told when signing, submission
    /// and confirmation begin.
    pub async fn submit<W, F>(
        &self,
        instruction_set: &MintInstructionSet,
        mint_keypair: &Keypair,
        wallet: &W,
        mut on_phase: F,
    ) -> Result<Signature, MintError>
    where
        W: WalletAdapter,
        F: FnMut(MintPhase),
    {
        let mut retries = 0;
        loop {
            let result = self
                .submit_once(instruction_set, mint_keypair, wallet, &mut on_phase)
                .await;
            match result {
                Err(ref err) if err.is_retryable() && retries < MAX_BLOCKHASH_RETRIES => {
                    retries += 1;
                    warn!(mint = %instruction_set.mint(), retries, "blockhash expired, resubmitting");
                }
                other => return other,
            }
        }
    }

    async fn submit_once<W, F>(
        &self,
        instruction_set: &MintInstructionSet,
        mint_keypair: &Keypair,
        wallet: &W,
        on_phase: &mut F,
    ) -> Result<Signature, MintError>
    where
        W: WalletAdapter,
        F: FnMut(MintPhase),
    {
        let fee_payer = instruction_set.owner();
        on_phase(MintPhase::Signing);
        let blockhash = self.ledger.latest_blockhash().await?;
        let transaction = assemble_transaction(instruction_set, &fee_payer, mint_keypair, blockhash)?;
        let signed = sign_with_wallet(wallet, transaction, &fee_payer).await?;

        on_phase(MintPhase::Submitting);
        let signature = self.ledger.send_transaction(&signed).await?;
        info!(%signature, %blockhash, "mint transaction sent");

        on_phase(MintPhase::Confirming);
        self.confirm(&signature, &blockhash).await?;
        Ok(signature)
    }

    /// Poll until the signature is confirmed, fails, its blockhash expires,
    /// or the confirmation timeout passes.
    async fn confirm(&self, signature: &Signature, blockhash: &Hash) -> Result<(), MintError> {
        let deadline = Instant::now() + self.confirm_timeout;
        loop {
            if self.landed(signature).await? {
                info!(%signature, "mint transaction confirmed");
                return Ok(());
            }

            if let Ok(false) = self.ledger.is_blockhash_valid(blockhash).await {
                // the transaction can still land in the slot that expired it
                if self.landed(signature).await? {
                    return Ok(());
                }
                return Err(MintError::StaleBlockhash);
            }

            if Instant::now() >= deadline {
                return Err(MintError::ConfirmationTimeout {
                    signature: *signature,
                });
            }
            sleep(self.poll_interval).await;
        }
    }

    /// Query errors count as "not seen yet" so polling can carry on.
    async fn landed(&self, signature: &Signature) -> Result<bool, MintError> {
        match self.ledger.signature_status(signature).await {
            Ok(Some(Ok(()))) => Ok(true),
            Ok(Some(Err(err))) => Err(MintError::Submission {
                reason: format!("transaction {signature} failed: {err}"),
            }),
            Ok(None) => Ok(false),
            Err(err) => {
                debug!(%signature, %err, "status query failed, will poll again");
                Ok(false)
            }
        }
    }
}

/// Build the transaction with the wallet as fee payer and co-sign it with
/// the mint keypair, which never leaves this process.
pub fn assemble_transaction(
    instruction_set: &MintInstructionSet,
    fee_payer: &Pubkey,
    mint_keypair: &Keypair,
    blockhash: Hash,
) -> Result<Transaction, MintError> {
    let mut transaction = Transaction::new_with_payer(instruction_set.instructions(), Some(fee_payer));
    transaction
        .try_partial_sign(&[mint_keypair], blockhash)
        .map_err(|e| MintError::Submission {
            reason: format!("mint keypair could not co-sign: {e}"),
        })?;
    Ok(transaction)
}

/// Ask the wallet for its signature inside a scoped session. The session is
/// released on every path out of this function.
pub async fn sign_with_wallet<W: WalletAdapter>(
    wallet: &W,
    transaction: Transaction,
    fee_payer: &Pubkey,
) -> Result<Transaction, MintError> {
    let mut scope = SigningScope::acquire(wallet).await?;

    let authorized = scope.authorize().await?;
    if authorized != *fee_payer {
        return Err(MintError::WalletSession(format!(
            "wallet authorized {authorized}, expected {fee_payer}"
        )));
    }

    let mut signed = scope.sign_transactions(vec![transaction]).await?;
    drop(scope);

    if signed.len() != 1 {
        return Err(MintError::WalletSession(format!(
            "wallet returned {} transactions, expected 1",
            signed.len()
        )));
    }
    let transaction = signed.remove(0);
    transaction.verify().map_err(|e| {
        MintError::WalletSession(format!("wallet returned an incompletely signed transaction: {e}"))
    })?;
    Ok(transaction)
}
