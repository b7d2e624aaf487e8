use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::constants::LOTTERY_INFO_SEED;
use crate::events::LotteryEntered;
use crate::state::LotteryRound;

/// Accounts required to enter the lottery.
#[derive(Accounts)]
pub struct EnterLottery<'info> {
    /// The entrant paying the fee.
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_INFO_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, LotteryRound>>,

    #[account(address = lottery.vaults.liquidity_mint)]
    pub liquidity_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Entrant's token account the fee is taken from.
    #[account(
        mut,
        token::mint = liquidity_mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = lottery.vaults.liquidity_vault)]
    pub liquidity_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Enters the caller into the round.
///
/// Steps performed:
/// 1. Check the round is open, the amount equals the entry fee, the caller is
///    new and there is room left.
/// 2. Register the caller.
/// 3. Transfer the fee into the liquidity vault.
///
/// # Arguments
/// * `ctx` - Context containing EnterLottery accounts
/// * `amount` - Must equal the round's entry fee
pub fn process_enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
    let accounts = ctx.accounts;
    let user = accounts.user.key();

    accounts.lottery.enter(user, amount)?;

    transfer_checked(
        CpiContext::new(
            accounts.token_program.to_account_info(),
            TransferChecked {
                from: accounts.user_token_account.to_account_info(),
                mint: accounts.liquidity_mint.to_account_info(),
                to: accounts.liquidity_vault.to_account_info(),
                authority: accounts.user.to_account_info(),
            },
        ),
        amount,
        accounts.liquidity_mint.decimals,
    )?;

    let participant_count = accounts.lottery.participant_count() as u32;
    msg!("Participant: {}", user);
    msg!("Participants: {}/{}", participant_count, accounts.lottery.max_participants);

    emit!(LotteryEntered {
        participant: user,
        amount,
        participant_count,
    });

    Ok(())
}
