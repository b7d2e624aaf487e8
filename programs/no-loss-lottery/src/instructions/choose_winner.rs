use anchor_lang::prelude::*;

use crate::constants::LOTTERY_INFO_SEED;
use crate::events::WinnerChosen;
use crate::state::LotteryRound;

/// Accounts required to choose a lottery winner.
///
/// The round itself enforces that:
/// 1. A randomness request is outstanding and has been fulfilled.
/// 2. The fulfilled value has not been consumed.
/// 3. A winner hasn't already been chosen.
#[derive(Accounts)]
pub struct ChooseWinner<'info> {
    /// Account paying for any transaction fees.
    pub payer: Signer<'info>,

    /// The main lottery state account.
    #[account(
        mut,
        seeds = [LOTTERY_INFO_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, LotteryRound>>,
}

pub fn process_choose_winner(ctx: Context<ChooseWinner>) -> Result<()> {
    let lottery = &mut ctx.accounts.lottery;

    msg!("Participants: {}", lottery.participant_count());

    let winner = lottery.choose_winner()?;

    msg!("Winner: {}", winner);

    emit!(WinnerChosen {
        winner,
        participant_count: lottery.participant_count() as u32,
    });

    Ok(())
}
