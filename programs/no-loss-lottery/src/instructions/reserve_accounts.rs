use anchor_lang::prelude::*;

use crate::lending::ReserveAccounts;

/// Lending reserve accounts shared by `deposit` and `withdraw`.
/// Checked against the reserve recorded at initialization.
#[derive(Accounts)]
pub struct LendingReserveAccounts<'info> {
    /// CHECK: Matched against the configured lending program.
    #[account(executable)]
    pub lending_program: UncheckedAccount<'info>,

    /// CHECK: Matched against the configured lending market.
    pub lending_market: UncheckedAccount<'info>,

    /// CHECK: PDA of the lending program, re-derived and matched.
    pub lending_market_authority: UncheckedAccount<'info>,

    /// CHECK: Matched against the configured reserve.
    #[account(mut)]
    pub reserve: UncheckedAccount<'info>,

    /// CHECK: Matched against the configured liquidity supply.
    #[account(mut)]
    pub reserve_liquidity_supply: UncheckedAccount<'info>,

    /// CHECK: Matched against the configured collateral mint.
    #[account(mut)]
    pub reserve_collateral_mint: UncheckedAccount<'info>,

    /// CHECK: Matched against the configured oracle.
    pub reserve_liquidity_oracle: UncheckedAccount<'info>,

    pub clock: Sysvar<'info, Clock>,
}

impl<'info> LendingReserveAccounts<'info> {
    pub fn as_reserve_accounts(
        &self,
        token_program: AccountInfo<'info>,
    ) -> ReserveAccounts<'info> {
        ReserveAccounts {
            lending_program: self.lending_program.to_account_info(),
            lending_market: self.lending_market.to_account_info(),
            lending_market_authority: self.lending_market_authority.to_account_info(),
            reserve: self.reserve.to_account_info(),
            reserve_liquidity_supply: self.reserve_liquidity_supply.to_account_info(),
            reserve_collateral_mint: self.reserve_collateral_mint.to_account_info(),
            reserve_liquidity_oracle: self.reserve_liquidity_oracle.to_account_info(),
            clock: self.clock.to_account_info(),
            token_program,
        }
    }
}
