//! Calls into the external lending reserve.
//!
//! The reserve speaks the SPL token-lending instruction set (refresh, deposit
//! liquidity, redeem collateral); instructions come from `spl_token_lending`.
//! Every move of pooled funds is signed by the vault signer; amounts received
//! are measured by the caller from vault balances, never computed here.

use anchor_lang::prelude::*;
use solana_program::program::{invoke, invoke_signed};
use spl_token_lending::instruction::{
    deposit_reserve_liquidity, redeem_reserve_collateral, refresh_reserve,
};

use crate::constants::WAD;
use crate::error::ErrorCode;
use crate::state::{LendingReserve, VaultSigner};

/// Liquidity per unit of collateral, WAD scaled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExchangeRate(u128);

impl ExchangeRate {
    pub fn from_wad(wad: u128) -> Self {
        Self(wad)
    }

    pub fn from_amounts(liquidity: u64, collateral: u64) -> Result<Self> {
        require!(collateral > 0, ErrorCode::NoCollateralReceived);
        let wad = (liquidity as u128)
            .checked_mul(WAD)
            .ok_or(ErrorCode::MathOverflow)?
            / collateral as u128;
        Ok(Self(wad))
    }

    pub fn wad(&self) -> u128 {
        self.0
    }

    /// Rounds down.
    pub fn collateral_to_liquidity(&self, collateral: u64) -> Result<u64> {
        let liquidity = (collateral as u128)
            .checked_mul(self.0)
            .ok_or(ErrorCode::MathOverflow)?
            / WAD;
        u64::try_from(liquidity).map_err(|_| error!(ErrorCode::MathOverflow))
    }
}

pub fn lending_market_authority(lending_program: &Pubkey, lending_market: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[lending_market.as_ref()], lending_program).0
}

/// Reserve-side accounts every lending CPI needs.
pub struct ReserveAccounts<'info> {
    pub lending_program: AccountInfo<'info>,
    pub lending_market: AccountInfo<'info>,
    pub lending_market_authority: AccountInfo<'info>,
    pub reserve: AccountInfo<'info>,
    pub reserve_liquidity_supply: AccountInfo<'info>,
    pub reserve_collateral_mint: AccountInfo<'info>,
    pub reserve_liquidity_oracle: AccountInfo<'info>,
    pub clock: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

impl<'info> ReserveAccounts<'info> {
    /// Rejects any account that is not the reserve configured for this round.
    pub fn validate(&self, config: &LendingReserve) -> Result<()> {
        require_keys_eq!(
            self.lending_program.key(),
            config.lending_program,
            ErrorCode::InvalidLendingAccount
        );
        require_keys_eq!(
            self.lending_market.key(),
            config.lending_market,
            ErrorCode::InvalidLendingAccount
        );
        require_keys_eq!(
            self.lending_market_authority.key(),
            lending_market_authority(&config.lending_program, &config.lending_market),
            ErrorCode::InvalidLendingAccount
        );
        require_keys_eq!(
            self.reserve.key(),
            config.reserve,
            ErrorCode::InvalidLendingAccount
        );
        require_keys_eq!(
            self.reserve_liquidity_supply.key(),
            config.reserve_liquidity_supply,
            ErrorCode::InvalidLendingAccount
        );
        require_keys_eq!(
            self.reserve_collateral_mint.key(),
            config.reserve_collateral_mint,
            ErrorCode::InvalidLendingAccount
        );
        require_keys_eq!(
            self.reserve_liquidity_oracle.key(),
            config.reserve_liquidity_oracle,
            ErrorCode::InvalidLendingAccount
        );
        Ok(())
    }

    fn refresh(&self, config: &LendingReserve) -> Result<()> {
        invoke(
            &refresh_reserve(
                config.lending_program,
                config.reserve,
                config.reserve_liquidity_oracle,
            ),
            &[
                self.lending_program.clone(),
                self.reserve.clone(),
                self.reserve_liquidity_oracle.clone(),
                self.clock.clone(),
            ],
        )?;
        Ok(())
    }
}

/// Moves `amount` from the liquidity vault into the reserve. Collateral
/// lands in the collateral vault at the reserve's own exchange rate.
pub fn invest<'info>(
    config: &LendingReserve,
    reserve: &ReserveAccounts<'info>,
    liquidity_vault: AccountInfo<'info>,
    collateral_vault: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    signer: &VaultSigner,
    amount: u64,
) -> Result<()> {
    reserve.refresh(config)?;

    let ix = deposit_reserve_liquidity(
        config.lending_program,
        amount,
        liquidity_vault.key(),
        collateral_vault.key(),
        config.reserve,
        config.reserve_liquidity_supply,
        config.reserve_collateral_mint,
        config.lending_market,
        vault_authority.key(),
    );
    let accounts = [
        reserve.lending_program.clone(),
        liquidity_vault,
        collateral_vault,
        reserve.reserve.clone(),
        reserve.reserve_liquidity_supply.clone(),
        reserve.reserve_collateral_mint.clone(),
        reserve.lending_market.clone(),
        reserve.lending_market_authority.clone(),
        vault_authority,
        reserve.clock.clone(),
        reserve.token_program.clone(),
    ];
    signer.sign(|seeds| invoke_signed(&ix, &accounts, seeds))?;
    Ok(())
}

/// Returns `collateral_amount` to the reserve; principal plus interest lands
/// in the liquidity vault.
pub fn redeem<'info>(
    config: &LendingReserve,
    reserve: &ReserveAccounts<'info>,
    collateral_vault: AccountInfo<'info>,
    liquidity_vault: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    signer: &VaultSigner,
    collateral_amount: u64,
) -> Result<()> {
    reserve.refresh(config)?;

    let ix = redeem_reserve_collateral(
        config.lending_program,
        collateral_amount,
        collateral_vault.key(),
        liquidity_vault.key(),
        config.reserve,
        config.reserve_collateral_mint,
        config.reserve_liquidity_supply,
        config.lending_market,
        vault_authority.key(),
    );
    let accounts = [
        reserve.lending_program.clone(),
        collateral_vault,
        liquidity_vault,
        reserve.reserve.clone(),
        reserve.reserve_collateral_mint.clone(),
        reserve.reserve_liquidity_supply.clone(),
        reserve.lending_market.clone(),
        reserve.lending_market_authority.clone(),
        vault_authority,
        reserve.clock.clone(),
        reserve.token_program.clone(),
    ];
    signer.sign(|seeds| invoke_signed(&ix, &accounts, seeds))?;
    Ok(())
}
