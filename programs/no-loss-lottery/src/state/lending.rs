use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::lending::ExchangeRate;

/// Lending reserve the pooled principal is invested into. Fixed at
/// initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct LendingReserve {
    pub lending_program: Pubkey,
    pub lending_market: Pubkey,
    pub reserve: Pubkey,
    pub reserve_liquidity_supply: Pubkey,
    /// Mint of the collateral (receipt) token; also the collateral vault's mint.
    pub reserve_collateral_mint: Pubkey,
    pub reserve_liquidity_oracle: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum PositionStatus {
    #[default]
    Empty,
    Invested,
    Redeemed,
}

/// What the round has handed to, and received back from, the reserve.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct LendingPosition {
    pub status: PositionStatus,
    pub invested_liquidity: u64,
    pub collateral_amount: u64,
    pub redeemed_liquidity: u64,
    /// Liquidity per collateral observed at investment, WAD scaled.
    pub exchange_rate_wad: u128,
}

impl LendingPosition {
    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Invested
    }

    pub fn is_redeemed(&self) -> bool {
        self.status == PositionStatus::Redeemed
    }

    pub fn record_investment(&mut self, invested: u64, collateral: u64) -> Result<()> {
        require!(
            self.status == PositionStatus::Empty,
            ErrorCode::FundsAlreadyInvested
        );
        require!(collateral > 0, ErrorCode::NoCollateralReceived);

        let rate = ExchangeRate::from_amounts(invested, collateral)?;
        self.status = PositionStatus::Invested;
        self.invested_liquidity = invested;
        self.collateral_amount = collateral;
        self.exchange_rate_wad = rate.wad();
        Ok(())
    }

    pub fn record_redemption(&mut self, redeemed: u64) -> Result<()> {
        require!(self.is_open(), ErrorCode::InvalidState);
        self.status = PositionStatus::Redeemed;
        self.redeemed_liquidity = redeemed;
        Ok(())
    }

    /// Liquidity returned on top of the invested principal. Zero on a loss.
    pub fn accrued_yield(&self) -> u64 {
        self.redeemed_liquidity
            .saturating_sub(self.invested_liquidity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn investment_then_redemption() {
        let mut position = LendingPosition::default();
        assert!(!position.is_open());

        position.record_investment(5_000, 4_000).unwrap();
        assert!(position.is_open());
        assert_eq!(
            ExchangeRate::from_wad(position.exchange_rate_wad)
                .collateral_to_liquidity(4_000)
                .unwrap(),
            5_000
        );

        position.record_redemption(5_200).unwrap();
        assert!(position.is_redeemed());
        assert_eq!(position.accrued_yield(), 200);
    }

    #[test]
    fn cannot_invest_twice() {
        let mut position = LendingPosition::default();
        position.record_investment(5_000, 5_000).unwrap();
        assert_eq!(
            position.record_investment(5_000, 5_000).unwrap_err(),
            ErrorCode::FundsAlreadyInvested.into()
        );
    }

    #[test]
    fn zero_collateral_is_rejected() {
        let mut position = LendingPosition::default();
        assert_eq!(
            position.record_investment(5_000, 0).unwrap_err(),
            ErrorCode::NoCollateralReceived.into()
        );
        assert_eq!(position.status, PositionStatus::Empty);
    }

    #[test]
    fn redeem_requires_open_position() {
        let mut position = LendingPosition::default();
        assert_eq!(
            position.record_redemption(1).unwrap_err(),
            ErrorCode::InvalidState.into()
        );
    }
}
