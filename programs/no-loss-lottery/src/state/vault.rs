use anchor_lang::prelude::*;

use crate::constants::VAULT_SIGNER_SEED;
use crate::error::ErrorCode;

/// The two custody token accounts of a round. Both are associated token
/// accounts whose authority is the vault signer PDA.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct VaultPair {
    pub liquidity_mint: Pubkey,
    pub collateral_mint: Pubkey,
    pub liquidity_vault: Pubkey,
    pub collateral_vault: Pubkey,
}

/// Authorization handle for moving custodied funds.
///
/// Only the round can mint one (from its stored bump). The seeds never leave
/// this type; callers hand a closure to [`VaultSigner::sign`] and receive the
/// signer seeds for the duration of a single CPI.
pub struct VaultSigner {
    bump: [u8; 1],
}

impl VaultSigner {
    pub(crate) fn new(bump: u8) -> Self {
        Self { bump: [bump] }
    }

    pub fn sign<R>(&self, f: impl FnOnce(&[&[&[u8]]]) -> R) -> R {
        let seeds: &[&[u8]] = &[VAULT_SIGNER_SEED, &self.bump];
        let signer_seeds: &[&[&[u8]]] = &[seeds];
        f(signer_seeds)
    }
}

/// Amount owed to the winner once the reserve has returned `redeemed`.
///
/// Every other entrant is owed exactly `entry_fee`; the winner takes whatever
/// is left, so the liquidity vault drains to zero.
pub fn winner_payout(redeemed: u64, entry_fee: u64, participants: usize) -> Result<u64> {
    let others = (participants as u64)
        .checked_sub(1)
        .ok_or(ErrorCode::NoParticipants)?;
    let owed_to_others = entry_fee
        .checked_mul(others)
        .ok_or(ErrorCode::MathOverflow)?;
    let payout = redeemed
        .checked_sub(owed_to_others)
        .ok_or(ErrorCode::InsufficientRedeemedLiquidity)?;
    Ok(payout)
}
