use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::constants::{LOTTERY_INFO_SEED, VAULT_SIGNER_SEED};
use crate::events::PayoutWithdrawn;
use crate::state::LotteryRound;

/// Accounts required for a participant to withdraw their payout.
///
/// Ensures:
/// 1. Only the participant can pull their own funds, into their own account.
/// 2. Funds leave the liquidity vault under the vault signer only.
#[derive(Accounts)]
pub struct WithdrawUserTokens<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_INFO_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, LotteryRound>>,

    /// CHECK: PDA with no data; only signs for the vaults.
    #[account(seeds = [VAULT_SIGNER_SEED], bump = lottery.vault_signer_bump)]
    pub vault_signer: UncheckedAccount<'info>,

    #[account(address = lottery.vaults.liquidity_mint)]
    pub liquidity_mint: Box<InterfaceAccount<'info, Mint>>,

    /// The participant's token account that receives the payout.
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

/// Pays the caller back.
///
/// Steps:
/// 1. Check the round is settled and funds are back from the reserve.
/// 2. Mark the caller withdrawn; the winner is owed principal plus all
///    yield, everyone else exactly the entry fee.
/// 3. Transfer from the liquidity vault, signed by the vault signer.
///
/// # Arguments
/// * `ctx` - Context containing `WithdrawUserTokens` accounts
pub fn process_withdraw_user_tokens(ctx: Context<WithdrawUserTokens>) -> Result<()> {
    let accounts = ctx.accounts;
    let user = accounts.user.key();

    let amount = accounts.lottery.claim_payout(user)?;
    let is_winner = accounts.lottery.winner == Some(user);

    msg!("Participant: {}", user);
    msg!("Payout: {}", amount);

    accounts.lottery.vault_signer().sign(|seeds| {
        transfer_checked(
            CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                TransferChecked {
                    from: accounts.liquidity_vault.to_account_info(),
                    mint: accounts.liquidity_mint.to_account_info(),
                    to: accounts.user_token_account.to_account_info(),
                    authority: accounts.vault_signer.to_account_info(),
                },
                seeds,
            ),
            amount,
            accounts.liquidity_mint.decimals,
        )
    })?;

    emit!(PayoutWithdrawn {
        participant: user,
        amount,
        is_winner,
    });

    Ok(())
}
