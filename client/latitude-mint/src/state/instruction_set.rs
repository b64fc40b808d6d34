use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

/// Position of an instruction inside a mint transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MintStep {
    CreateMintAccount,
    InitializeMint,
    CreateTokenAccount,
    MintOne,
    CreateMetadata,
}

impl MintStep {
    /// Later steps reference accounts created by earlier ones.
    pub const ORDER: [MintStep; 5] = [
        MintStep::CreateMintAccount,
        MintStep::InitializeMint,
        MintStep::CreateTokenAccount,
        MintStep::MintOne,
        MintStep::CreateMetadata,
    ];
}

/// The five instructions that create and describe one NFT, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintInstructionSet {
    mint: Pubkey,
    owner: Pubkey,
    token_account: Pubkey,
    metadata_account: Pubkey,
    instructions: [Instruction; 5],
}

impl MintInstructionSet {
    pub(crate) fn new(
        mint: Pubkey,
        owner: Pubkey,
        token_account: Pubkey,
        metadata_account: Pubkey,
        instructions: [Instruction; 5],
    ) -> Self {
        Self {
            mint,
            owner,
            token_account,
            metadata_account,
            instructions,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn steps(&self) -> impl Iterator<Item = (MintStep, &Instruction)> {
        MintStep::ORDER.into_iter().zip(self.instructions.iter())
    }

    pub fn instruction(&self, step: MintStep) -> &Instruction {
        &self.instructions[step as usize]
    }

    pub fn mint(&self) -> Pubkey {
        self.mint
    }

    pub fn owner(&self) -> Pubkey {
        self.owner
    }

    pub fn token_account(&self) -> Pubkey {
        self.token_account
    }

    pub fn metadata_account(&self) -> Pubkey {
        self.metadata_account
    }
}
