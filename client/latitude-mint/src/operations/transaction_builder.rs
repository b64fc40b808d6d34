use std::str::FromStr;

use mpl_token_metadata::types::Creator as OnChainCreator;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use tracing::debug;

use crate::error::MintError;
use crate::interfaces::LedgerClient;
use crate::state::{MintInstructionSet, NftMetadata};
use crate::util::constants::MAX_URI_LENGTH;
use crate::util::{
    create_associated_token_account_ix, create_metadata_account_v3_ix, create_mint_account_ix,
    find_metadata_pda, initialize_nft_mint_ix, mint_single_unit_ix, MINT_ACCOUNT_SIZE,
};

/// Query the rent-exempt minimum for the mint account and build the five
/// mint instructions. A failed query aborts without returning a partial set.
pub async fn build_mint_instructions<L: LedgerClient>(
    ledger: &L,
    mint: &Pubkey,
    wallet: &Pubkey,
    metadata_uri: &str,
    metadata: &NftMetadata,
) -> Result<MintInstructionSet, MintError> {
    let rent_lamports = ledger
        .minimum_balance_for_rent_exemption(MINT_ACCOUNT_SIZE)
        .await?;
    assemble_mint_instructions(mint, wallet, rent_lamports, metadata_uri, metadata)
}

/// Build the instruction set from already-known chain values.
pub fn assemble_mint_instructions(
    mint: &Pubkey,
    wallet: &Pubkey,
    rent_lamports: u64,
    metadata_uri: &str,
    metadata: &NftMetadata,
) -> Result<MintInstructionSet, MintError> {
    if metadata_uri.is_empty() || metadata_uri.len() > MAX_URI_LENGTH {
        return Err(MintError::invalid_input(format!(
            "metadata uri must be 1..={MAX_URI_LENGTH} bytes"
        )));
    }
    let creators = on_chain_creators(metadata)?;

    let token_account = get_associated_token_address(wallet, mint);
    let (metadata_account, _bump) = find_metadata_pda(mint);

    let instructions = [
        create_mint_account_ix(wallet, mint, rent_lamports),
        initialize_nft_mint_ix(mint, wallet)?,
        create_associated_token_account_ix(wallet, wallet, mint),
        mint_single_unit_ix(mint, &token_account, wallet)?,
        create_metadata_account_v3_ix(
            &metadata_account,
            mint,
            wallet,
            &metadata.name,
            &metadata.symbol,
            metadata_uri,
            creators,
        ),
    ];

    let set = MintInstructionSet::new(*mint, *wallet, token_account, metadata_account, instructions);
    for (step, ix) in set.steps() {
        debug!(?step, program = %ix.program_id, accounts = ix.accounts.len(), "mint instruction");
    }
    debug!(
        %mint,
        %token_account,
        %metadata_account,
        rent_lamports,
        "mint instructions assembled"
    );
    Ok(set)
}

/// Creators as written on-chain: unverified until they sign a verification.
fn on_chain_creators(metadata: &NftMetadata) -> Result<Vec<OnChainCreator>, MintError> {
    metadata
        .creators
        .iter()
        .map(|creator| {
            let address = Pubkey::from_str(&creator.address).map_err(|_| {
                MintError::invalid_input(format!("creator {} is not a public key", creator.address))
            })?;
            Ok(OnChainCreator {
                address,
                verified: false,
                share: creator.share,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::build_metadata;
    use crate::state::{GeoTag, MintStep};
    use crate::util::constants::TOKEN_METADATA_PROGRAM_ID;
    use solana_sdk::system_program;

    const URI: &str = "https://gateway.pinata.cloud/ipfs/QmMetadata";

    fn metadata_for(wallet: &Pubkey) -> NftMetadata {
        build_metadata(
            "https://gateway.pinata.cloud/ipfs/QmImage",
            "image/jpeg",
            Some(&GeoTag::new(1.23, 4.56)),
            &wallet.to_string(),
            "Latitude Mint",
            "LAT",
        )
        .unwrap()
    }

    #[test]
    fn five_instructions_in_fixed_order() {
        for _ in 0..4 {
            let mint = Pubkey::new_unique();
            let wallet = Pubkey::new_unique();
            let set = assemble_mint_instructions(&mint, &wallet, 1_461_600, URI, &metadata_for(&wallet))
                .unwrap();

            let programs: Vec<Pubkey> = set.instructions().iter().map(|ix| ix.program_id).collect();
            assert_eq!(
                programs,
                vec![
                    system_program::id(),
                    spl_token::id(),
                    spl_associated_token_account::id(),
                    spl_token::id(),
                    TOKEN_METADATA_PROGRAM_ID,
                ]
            );
            assert_eq!(set.instructions().len(), 5);
        }
    }

    #[test]
    fn instruction_payloads_describe_a_single_unit_nft() {
        let mint = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let set = assemble_mint_instructions(&mint, &wallet, 1_461_600, URI, &metadata_for(&wallet))
            .unwrap();

        let create = set.instruction(MintStep::CreateMintAccount);
        assert_eq!(create.accounts[0].pubkey, wallet);
        assert_eq!(create.accounts[1].pubkey, mint);
        assert!(create.accounts[1].is_signer, "mint keypair co-signs account creation");

        // InitializeMint2: tag 20, decimals 0
        let init = set.instruction(MintStep::InitializeMint);
        assert_eq!(init.data[0], 20);
        assert_eq!(init.data[1], 0);

        // CreateIdempotent
        let ata = set.instruction(MintStep::CreateTokenAccount);
        assert_eq!(ata.data, vec![1]);
        assert_eq!(ata.accounts[1].pubkey, set.token_account());

        // MintTo: tag 7, amount 1
        let mint_to = set.instruction(MintStep::MintOne);
        assert_eq!(mint_to.data[0], 7);
        assert_eq!(u64::from_le_bytes(mint_to.data[1..9].try_into().unwrap()), 1);
        assert_eq!(mint_to.accounts[1].pubkey, set.token_account());

        let metadata = set.instruction(MintStep::CreateMetadata);
        assert_eq!(metadata.accounts[0].pubkey, set.metadata_account());
        assert_eq!(set.token_account(), get_associated_token_address(&wallet, &mint));
    }

    #[test]
    fn rejects_overlong_uri() {
        let wallet = Pubkey::new_unique();
        let uri = format!("https://example.com/{}", "x".repeat(MAX_URI_LENGTH));
        let result =
            assemble_mint_instructions(&Pubkey::new_unique(), &wallet, 1, &uri, &metadata_for(&wallet));
        assert!(matches!(result, Err(MintError::InvalidMetadataInput(_))));
    }

    #[test]
    fn rejects_creator_that_is_not_a_key() {
        let wallet = Pubkey::new_unique();
        let mut metadata = metadata_for(&wallet);
        metadata.creators[0].address = "ABC...XYZ".to_string();
        let result = assemble_mint_instructions(&Pubkey::new_unique(), &wallet, 1, URI, &metadata);
        assert!(matches!(result, Err(MintError::InvalidMetadataInput(_))));
    }
}
