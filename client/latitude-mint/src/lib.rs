//! Mint geotagged photos as Solana NFTs.
//!
//! A photo is read from local storage, pinned to IPFS together with a
//! Metaplex metadata document carrying its coordinates, and minted in a
//! single transaction that creates the mint, the owner's token account, the
//! one token unit and the metadata account. [`MintPipeline`] sequences the
//! steps and owns the state of the attempt in flight.

pub mod config;
pub mod error;
pub mod event;
pub mod interfaces;
pub mod ledger;
pub mod operations;
pub mod pipeline;
pub mod state;
pub mod util;
pub mod wallet;

pub use config::{AppConfig, PinningConfig, PipelineConfig};
pub use error::{ConfigError, MintError};
pub use interfaces::{FixedLocation, GeoLocator, LedgerClient, PinningService, WalletAdapter, WalletSession};
pub use ledger::RpcLedger;
pub use operations::PinataClient;
pub use pipeline::{MintPipeline, MintRequest};
pub use state::{GeoTag, MintAttempt, MintPhase, MintReport, NftMetadata, UploadReceipt};
pub use wallet::{KeypairWallet, SigningScope};
