use anchor_lang::prelude::*;

/// Seed of the singleton `LotteryRound` PDA.
#[constant]
pub const LOTTERY_INFO_SEED: &[u8] = b"lottery_info";

/// Seed of the program-derived signer that owns both vaults.
#[constant]
pub const VAULT_SIGNER_SEED: &[u8] = b"vault_signer";

/// Upper bound on `max_participants`; sizes the registry inside the round account.
#[constant]
pub const MAX_PARTICIPANTS: u32 = 32;

/// Fixed point scale used by `ExchangeRate`.
pub const WAD: u128 = 1_000_000_000_000_000_000;

