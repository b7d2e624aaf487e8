use anchor_lang::prelude::*;
use anchor_spl::token::Token;
use anchor_spl::token_interface::TokenAccount;

use crate::constants::{LOTTERY_INFO_SEED, VAULT_SIGNER_SEED};
use crate::error::ErrorCode;
use crate::events::FundsRedeemed;
use crate::lending::{self, ExchangeRate};
use crate::state::LotteryRound;

use super::reserve_accounts::*;

/// Accounts required to pull the pool back out of the lending reserve.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_INFO_SEED],
        bump = lottery.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub lottery: Box<Account<'info, LotteryRound>>,

    /// CHECK: PDA with no data; only signs for the vaults.
    #[account(seeds = [VAULT_SIGNER_SEED], bump = lottery.vault_signer_bump)]
    pub vault_signer: UncheckedAccount<'info>,

    #[account(mut, address = lottery.vaults.liquidity_vault)]
    pub liquidity_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = lottery.vaults.collateral_vault)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub lending: LendingReserveAccounts<'info>,

    /// The reserve only moves classic SPL tokens.
    pub token_program: Program<'info, Token>,
}

/// Redeems all collateral for principal plus interest.
///
/// Steps:
/// 1. Check a winner is settled and the position is still open.
/// 2. Refresh the reserve and redeem the whole collateral vault.
/// 3. Reload both vaults, book the redemption and fix the winner payout.
pub fn process_withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let accounts = ctx.accounts;
    accounts.lottery.ensure_can_redeem()?;

    let config = accounts.lottery.lending;
    let reserve = accounts
        .lending
        .as_reserve_accounts(accounts.token_program.to_account_info());
    reserve.validate(&config)?;

    let collateral_before = accounts.collateral_vault.amount;
    let liquidity_before = accounts.liquidity_vault.amount;
    let expected = ExchangeRate::from_wad(accounts.lottery.position.exchange_rate_wad)
        .collateral_to_liquidity(collateral_before)?;
    msg!("Redeeming {} collateral", collateral_before);
    msg!("Principal at investment rate: {}", expected);

    lending::redeem(
        &config,
        &reserve,
        accounts.collateral_vault.to_account_info(),
        accounts.liquidity_vault.to_account_info(),
        accounts.vault_signer.to_account_info(),
        &accounts.lottery.vault_signer(),
        collateral_before,
    )?;

    accounts.liquidity_vault.reload()?;
    accounts.collateral_vault.reload()?;
    let redeemed = accounts
        .liquidity_vault
        .amount
        .checked_sub(liquidity_before)
        .ok_or(ErrorCode::MathOverflow)?;
    let burned = collateral_before
        .checked_sub(accounts.collateral_vault.amount)
        .ok_or(ErrorCode::MathOverflow)?;

    msg!("Redeemed: {}", redeemed);

    accounts.lottery.record_redemption(redeemed, burned)?;

    msg!("Yield: {}", accounts.lottery.position.accrued_yield());
    msg!("Winner payout: {}", accounts.lottery.winner_payout);

    emit!(FundsRedeemed {
        collateral_amount: burned,
        liquidity_amount: redeemed,
        winner_payout: accounts.lottery.winner_payout,
    });

    Ok(())
}
