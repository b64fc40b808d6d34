use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};

use crate::error::MintError;
use crate::interfaces::LedgerClient;

/// Ledger collaborator over Solana JSON-RPC
pub struct RpcLedger {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcLedger {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self::with_commitment(rpc_url, CommitmentConfig::confirmed())
    }

    pub fn with_commitment(rpc_url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url.into(), commitment),
            commitment,
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

impl LedgerClient for RpcLedger {
    async fn balance(&self, owner: &Pubkey) -> Result<u64, MintError> {
        self.client.get_balance(owner).await.map_err(query_error)
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, MintError> {
        self.client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(query_error)
    }

    async fn latest_blockhash(&self) -> Result<Hash, MintError> {
        self.client.get_latest_blockhash().await.map_err(query_error)
    }

    async fn is_blockhash_valid(&self, blockhash: &Hash) -> Result<bool, MintError> {
        self.client
            .is_blockhash_valid(blockhash, self.commitment)
            .await
            .map_err(query_error)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, MintError> {
        self.client
            .send_transaction(transaction)
            .await
            .map_err(send_error)
    }

    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<Result<(), TransactionError>>, MintError> {
        self.client
            .get_signature_status(signature)
            .await
            .map_err(query_error)
    }

    async fn request_airdrop(&self, owner: &Pubkey, lamports: u64) -> Result<Signature, MintError> {
        self.client
            .request_airdrop(owner, lamports)
            .await
            .map_err(query_error)
    }
}

fn query_error(err: ClientError) -> MintError {
    MintError::LedgerQuery(err.to_string())
}

/// Separate an expired blockhash from other rejections.
fn send_error(err: ClientError) -> MintError {
    match err.get_transaction_error() {
        Some(TransactionError::BlockhashNotFound) => MintError::StaleBlockhash,
        _ => MintError::Submission {
            reason: err.to_string(),
        },
    }
}
