use anchor_lang::prelude::*;

use crate::constants::LOTTERY_INFO_SEED;
use crate::error::ErrorCode;
use crate::events::RandomnessRequested;
use crate::oracle;
use crate::state::LotteryRound;

/// Accounts required to bind a randomness account to the round.
///
/// Ensures:
/// 1. Only the authority of the lottery can request the draw.
/// 2. The randomness account is owned by the configured Switchboard program,
///    sits on the configured queue and was committed in the previous slot,
///    so its value is not known yet.
#[derive(Accounts)]
pub struct RequestRandomness<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_INFO_SEED],
        bump = lottery.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub lottery: Box<Account<'info, LotteryRound>>,

    /// Randomness account from Switchboard.
    /// CHECK: Owner, queue and seed slot are validated by `oracle::check_commitment`.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_request_randomness(ctx: Context<RequestRandomness>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = ctx.accounts;
    accounts.lottery.ensure_can_request_randomness()?;

    let randomness_key = accounts.randomness_account_data.key();
    oracle::check_commitment(
        &accounts.randomness_account_data,
        &accounts.lottery.oracle,
        &clock,
    )?;

    accounts
        .lottery
        .request_randomness(randomness_key, clock.slot)?;

    msg!("Randomness account: {}", randomness_key);

    emit!(RandomnessRequested {
        randomness_account: randomness_key,
        slot: clock.slot,
    });

    Ok(())
}
