use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::Arc;

use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
    transaction::Transaction,
};
use tracing::debug;

use crate::error::MintError;
use crate::interfaces::{WalletAdapter, WalletSession};

/// Open wallet session that is released when dropped.
///
/// Covers early returns, errors, panics and a cancelled future alike.
pub struct SigningScope<S: WalletSession> {
    session: S,
}

impl<S: WalletSession> SigningScope<S> {
    pub async fn acquire<W>(wallet: &W) -> Result<Self, MintError>
    where
        W: WalletAdapter<Session = S>,
    {
        let session = wallet.open_session().await?;
        debug!("wallet session opened");
        Ok(Self { session })
    }
}

impl<S: WalletSession> Deref for SigningScope<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: WalletSession> DerefMut for SigningScope<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: WalletSession> Drop for SigningScope<S> {
    fn drop(&mut self) {
        self.session.release();
        debug!("wallet session released");
    }
}

/// Wallet backed by a keypair held in this process
#[derive(Clone)]
pub struct KeypairWallet {
    keypair: Arc<Keypair>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair: Arc::new(keypair),
        }
    }

    /// Load a keypair file in the Solana CLI JSON format.
    pub fn from_file(path: &Path) -> Result<Self, MintError> {
        let keypair = read_keypair_file(path).map_err(|e| {
            MintError::WalletSession(format!("cannot load keypair {}: {e}", path.display()))
        })?;
        Ok(Self::new(keypair))
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

impl WalletAdapter for KeypairWallet {
    type Session = KeypairSession;

    async fn open_session(&self) -> Result<KeypairSession, MintError> {
        Ok(KeypairSession {
            keypair: Some(Arc::clone(&self.keypair)),
        })
    }
}

/// Session over a [`KeypairWallet`]; signing after release is refused.
pub struct KeypairSession {
    keypair: Option<Arc<Keypair>>,
}

impl KeypairSession {
    fn keypair(&self) -> Result<&Keypair, MintError> {
        self.keypair
            .as_deref()
            .ok_or_else(|| MintError::WalletSession("session already released".to_string()))
    }
}

impl WalletSession for KeypairSession {
    async fn authorize(&mut self) -> Result<Pubkey, MintError> {
        Ok(self.keypair()?.pubkey())
    }

    async fn sign_transactions(
        &mut self,
        mut transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>, MintError> {
        let keypair = self.keypair()?;
        for transaction in transactions.iter_mut() {
            let blockhash = transaction.message.recent_blockhash;
            transaction
                .try_partial_sign(&[keypair], blockhash)
                .map_err(|e| MintError::SigningRejected(e.to_string()))?;
        }
        Ok(transactions)
    }

    fn release(&mut self) {
        self.keypair = None;
    }
}
