use std::time::Duration;

use solana_sdk::pubkey::Pubkey;

// ========== METADATA LIMITS ==========
/// Maximum length for NFT metadata URI
pub const MAX_URI_LENGTH: usize = 200;

/// Maximum length for NFT name
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum length for NFT symbol
pub const MAX_SYMBOL_LENGTH: usize = 10;

// ========== PDA SEEDS ==========
/// Seed for metadata account
pub const METADATA_SEED: &[u8] = b"metadata";

// ========== METAPLEX INTEGRATION ==========
/// Metaplex Token Metadata Program ID
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey = mpl_token_metadata::ID;

/// Seller fee basis points (0 = no royalties)
pub const DEFAULT_SELLER_FEE_BASIS_POINTS: u16 = 0;

/// Is mutable flag for metadata
pub const DEFAULT_IS_MUTABLE: bool = true;

/// Share of the single creator entry
pub const CREATOR_SHARE: u8 = 100;

/// NFTs carry no fractional units
pub const NFT_DECIMALS: u8 = 0;

/// Units minted into the owner's token account
pub const NFT_SUPPLY: u64 = 1;

// ========== METADATA DOCUMENT ==========
pub const LATITUDE_TRAIT: &str = "Latitude";
pub const LONGITUDE_TRAIT: &str = "Longitude";
pub const IMAGE_CATEGORY: &str = "image";
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

pub const DEFAULT_NFT_NAME: &str = "Latitude Mint";
pub const DEFAULT_NFT_SYMBOL: &str = "LAT";

// ========== PINNING SERVICE ==========
pub const DEFAULT_PINNING_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_PINNING_GATEWAY_URL: &str = "https://gateway.pinata.cloud";
pub const UPLOAD_PATH: &str = "/upload";
pub const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

// ========== LEDGER ==========
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Automatic resubmissions after an expired blockhash
pub const MAX_BLOCKHASH_RETRIES: u32 = 1;

pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

// ========== GEOLOCATION ==========
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(15);
pub const LOCATION_MAXIMUM_AGE: Duration = Duration::from_secs(10);
