use solana_sdk::{instruction::Instruction, program_pack::Pack, pubkey::Pubkey, system_instruction};
use spl_token::state::Mint;

use crate::error::MintError;
use crate::util::constants::{NFT_DECIMALS, NFT_SUPPLY};

/// Space required by an SPL Token mint account
pub const MINT_ACCOUNT_SIZE: usize = Mint::LEN;

/// Allocate the mint account, funded to be rent exempt and owned by SPL Token.
pub fn create_mint_account_ix(payer: &Pubkey, mint: &Pubkey, rent_lamports: u64) -> Instruction {
    system_instruction::create_account(
        payer,
        mint,
        rent_lamports,
        MINT_ACCOUNT_SIZE as u64,
        &spl_token::id(),
    )
}

/// Initialize a zero-decimal mint with the wallet as mint and freeze authority.
pub fn initialize_nft_mint_ix(mint: &Pubkey, authority: &Pubkey) -> Result<Instruction, MintError> {
    spl_token::instruction::initialize_mint2(
        &spl_token::id(),
        mint,
        authority,
        Some(authority),
        NFT_DECIMALS,
    )
    .map_err(|e| MintError::invalid_input(format!("initialize mint: {e}")))
}

/// Create the owner's associated token account for the mint if it is absent.
pub fn create_associated_token_account_ix(payer: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Instruction {
    spl_associated_token_account::instruction::create_associated_token_account_idempotent(
        payer,
        owner,
        mint,
        &spl_token::id(),
    )
}

/// Mint the single NFT unit into the owner's token account.
pub fn mint_single_unit_ix(
    mint: &Pubkey,
    token_account: &Pubkey,
    authority: &Pubkey,
) -> Result<Instruction, MintError> {
    spl_token::instruction::mint_to(
        &spl_token::id(),
        mint,
        token_account,
        authority,
        &[],
        NFT_SUPPLY,
    )
    .map_err(|e| MintError::invalid_input(format!("mint to: {e}")))
}
