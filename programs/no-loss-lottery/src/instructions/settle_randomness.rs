use anchor_lang::prelude::*;

use crate::constants::LOTTERY_INFO_SEED;
use crate::error::ErrorCode;
use crate::events::RandomnessSettled;
use crate::oracle;
use crate::state::{value_from_revealed, LotteryRound};

/// Accounts required to deliver the revealed value to the round.
/// Anyone may crank this once the oracle has revealed.
#[derive(Accounts)]
pub struct SettleRandomness<'info> {
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_INFO_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, LotteryRound>>,

    /// The randomness oracle account bound by `request_randomness`.
    /// CHECK: Key matched against the pending request; owner checked by `oracle::revealed_value`.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_settle_randomness(ctx: Context<SettleRandomness>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = ctx.accounts;

    let randomness_key = accounts.lottery.pending_randomness_account()?;
    require_keys_eq!(
        accounts.randomness_account_data.key(),
        randomness_key,
        ErrorCode::InvalidRandomnessAccount
    );

    let revealed_random_value = oracle::revealed_value(
        &accounts.randomness_account_data,
        &accounts.lottery.oracle,
        &clock,
    )?;
    let value = value_from_revealed(&revealed_random_value);

    accounts.lottery.fulfill_randomness(value, clock.slot)?;

    msg!("Randomness result: {}", value);

    emit!(RandomnessSettled {
        randomness_account: randomness_key,
        value,
        slot: clock.slot,
    });

    Ok(())
}
