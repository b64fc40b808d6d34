use mpl_token_metadata::instructions::CreateMetadataAccountV3Builder;
use mpl_token_metadata::types::{Creator, DataV2};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::util::constants::{
    DEFAULT_IS_MUTABLE, DEFAULT_SELLER_FEE_BASIS_POINTS, METADATA_SEED, TOKEN_METADATA_PROGRAM_ID,
};

/// Derive the metadata account PDA for a mint.
///
/// Seeds are `["metadata", metadata_program_id, mint]` under the metadata
/// program, with the canonical bump.
pub fn find_metadata_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

/// Build the CreateMetadataAccountV3 instruction for a wallet-owned mint.
///
/// The wallet is mint authority, payer and update authority at once.
pub fn create_metadata_account_v3_ix(
    metadata: &Pubkey,
    mint: &Pubkey,
    wallet: &Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
    creators: Vec<Creator>,
) -> Instruction {
    let data = DataV2 {
        name: name.to_string(),
        symbol: symbol.to_string(),
        uri: uri.to_string(),
        seller_fee_basis_points: DEFAULT_SELLER_FEE_BASIS_POINTS,
        creators: Some(creators),
        collection: None,
        uses: None,
    };

    CreateMetadataAccountV3Builder::new()
        .metadata(*metadata)
        .mint(*mint)
        .mint_authority(*wallet)
        .payer(*wallet)
        .update_authority(*wallet, true)
        .data(data)
        .is_mutable(DEFAULT_IS_MUTABLE)
        .instruction()
}
