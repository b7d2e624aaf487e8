use anchor_lang::prelude::*;
use anchor_spl::token::Token;
use anchor_spl::token_interface::TokenAccount;

use crate::constants::{LOTTERY_INFO_SEED, VAULT_SIGNER_SEED};
use crate::error::ErrorCode;
use crate::events::FundsInvested;
use crate::lending;
use crate::state::LotteryRound;

use super::reserve_accounts::*;

/// Accounts required to invest the pool into the lending reserve.
#[derive(Accounts)]
pub struct Deposit<'info> {
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

/// Invests the whole liquidity vault and closes entries.
///
/// Steps:
/// 1. Check the round is open, non-empty and not yet invested.
/// 2. Refresh the reserve and deposit the vault's liquidity.
/// 3. Reload both vaults and book what actually moved.
pub fn process_deposit(ctx: Context<Deposit>) -> Result<()> {
    let accounts = ctx.accounts;
    accounts.lottery.ensure_can_deposit()?;

    let config = accounts.lottery.lending;
    let reserve = accounts
        .lending
        .as_reserve_accounts(accounts.token_program.to_account_info());
    reserve.validate(&config)?;

    let liquidity_before = accounts.liquidity_vault.amount;
    let collateral_before = accounts.collateral_vault.amount;
    msg!("Principal: {}", accounts.lottery.registry.total_deposited()?);
    msg!("Investing {} into reserve {}", liquidity_before, config.reserve);

    lending::invest(
        &config,
        &reserve,
        accounts.liquidity_vault.to_account_info(),
        accounts.collateral_vault.to_account_info(),
        accounts.vault_signer.to_account_info(),
        &accounts.lottery.vault_signer(),
        liquidity_before,
    )?;

    accounts.liquidity_vault.reload()?;
    accounts.collateral_vault.reload()?;
    let invested = liquidity_before
        .checked_sub(accounts.liquidity_vault.amount)
        .ok_or(ErrorCode::MathOverflow)?;
    let received = accounts
        .collateral_vault
        .amount
        .checked_sub(collateral_before)
        .ok_or(ErrorCode::MathOverflow)?;

    msg!("Invested: {}", invested);
    msg!("Collateral received: {}", received);

    accounts.lottery.record_investment(invested, received)?;

    emit!(FundsInvested {
        liquidity_amount: invested,
        collateral_amount: received,
        exchange_rate_wad: accounts.lottery.position.exchange_rate_wad,
    });

    Ok(())
}
