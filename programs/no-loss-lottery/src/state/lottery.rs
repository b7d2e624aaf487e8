use anchor_lang::prelude::*;

use crate::constants::MAX_PARTICIPANTS;
use crate::error::ErrorCode;

use super::lending::{LendingPosition, LendingReserve};
use super::randomness::{winner_index, OracleConfig, RandomnessRequest};
use super::registry::ParticipantRegistry;
use super::vault::{winner_payout, VaultPair, VaultSigner};

/// Round lifecycle. Transitions only move forward through this ordering.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum LotteryState {
    Created,
    Open,
    Closed,
    Drawing,
    Settled,
    ClosedOut,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeLotteryParams {
    /// Amount every entrant pays, in the liquidity mint's base units.
    pub entry_fee: u64,
    pub max_participants: u32,
}

impl InitializeLotteryParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.entry_fee > 0, ErrorCode::InvalidEntryFee);
        require!(
            self.max_participants > 0 && self.max_participants <= MAX_PARTICIPANTS,
            ErrorCode::InvalidMaxParticipants
        );
        Ok(())
    }
}

/// PDA bumps recorded at initialization.
#[derive(Clone, Copy, Debug)]
pub struct RoundBumps {
    pub round: u8,
    pub vault_signer: u8,
}

/// The singleton round, seeds: `["lottery_info"]`.
#[account]
#[derive(InitSpace)]
pub struct LotteryRound {
    pub bump: u8,
    pub vault_signer_bump: u8,

    /// Operator allowed to deposit, draw, redeem and close.
    pub authority: Pubkey,

    pub state: LotteryState,

    pub entry_fee: u64,
    pub max_participants: u32,

    pub vaults: VaultPair,
    pub lending: LendingReserve,

    pub oracle: OracleConfig,

    /// What this program's own transitions have put in each vault.
    pub liquidity_vault_balance: u64,
    pub collateral_vault_balance: u64,

    pub position: LendingPosition,
    pub randomness: Option<RandomnessRequest>,

    pub winner: Option<Pubkey>,
    /// Fixed when funds come back from the reserve.
    pub winner_payout: u64,

    pub registry: ParticipantRegistry,
}

impl LotteryRound {
    pub fn new(
        params: InitializeLotteryParams,
        authority: Pubkey,
        vaults: VaultPair,
        lending: LendingReserve,
        oracle: OracleConfig,
        bumps: RoundBumps,
    ) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            bump: bumps.round,
            vault_signer_bump: bumps.vault_signer,
            authority,
            state: LotteryState::Created,
            entry_fee: params.entry_fee,
            max_participants: params.max_participants,
            vaults,
            lending,
            oracle,
            liquidity_vault_balance: 0,
            collateral_vault_balance: 0,
            position: LendingPosition::default(),
            randomness: None,
            winner: None,
            winner_payout: 0,
            registry: ParticipantRegistry::with_capacity(params.max_participants),
        })
    }

    pub fn vault_signer(&self) -> VaultSigner {
        VaultSigner::new(self.vault_signer_bump)
    }

    pub fn participant_count(&self) -> usize {
        self.registry.size()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LotteryState::Created | LotteryState::Open)
    }

    fn require_state(&self, expected: LotteryState) -> Result<()> {
        require!(self.state == expected, ErrorCode::InvalidState);
        Ok(())
    }

    /// Registers `participant`. The first entry opens a freshly created round.
    pub fn enter(&mut self, participant: Pubkey, amount: u64) -> Result<()> {
        require!(self.is_open(), ErrorCode::LotteryNotOpen);
        require!(amount == self.entry_fee, ErrorCode::WrongEntryAmount);
        let balance = self
            .liquidity_vault_balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        self.registry.add(participant, amount)?;
        self.liquidity_vault_balance = balance;
        self.state = LotteryState::Open;
        Ok(())
    }

    /// Checked before any funds leave the liquidity vault.
    pub fn ensure_can_deposit(&self) -> Result<()> {
        require!(self.is_open(), ErrorCode::LotteryNotOpen);
        require!(!self.registry.is_empty(), ErrorCode::NoParticipants);
        require!(
            !self.position.is_open() && !self.position.is_redeemed(),
            ErrorCode::FundsAlreadyInvested
        );
        Ok(())
    }

    /// Books the reserve's answer to a deposit and closes entries.
    pub fn record_investment(&mut self, invested: u64, collateral: u64) -> Result<()> {
        self.ensure_can_deposit()?;
        let liquidity = self
            .liquidity_vault_balance
            .saturating_sub(invested);
        let collateral_balance = self
            .collateral_vault_balance
            .checked_add(collateral)
            .ok_or(ErrorCode::MathOverflow)?;

        self.position.record_investment(invested, collateral)?;
        self.liquidity_vault_balance = liquidity;
        self.collateral_vault_balance = collateral_balance;
        self.state = LotteryState::Closed;
        Ok(())
    }

    pub fn ensure_can_request_randomness(&self) -> Result<()> {
        if let Some(request) = &self.randomness {
            require!(!request.is_outstanding(), ErrorCode::RandomnessAlreadyRequested);
        }
        self.require_state(LotteryState::Closed)
    }

    pub fn request_randomness(&mut self, randomness_account: Pubkey, slot: u64) -> Result<()> {
        self.ensure_can_request_randomness()?;
        self.randomness = Some(RandomnessRequest::new(randomness_account, slot));
        self.state = LotteryState::Drawing;
        Ok(())
    }

    /// Randomness account the pending request is bound to.
    pub fn pending_randomness_account(&self) -> Result<Pubkey> {
        self.require_state(LotteryState::Drawing)?;
        self.randomness
            .as_ref()
            .map(|r| r.randomness_account)
            .ok_or_else(|| error!(ErrorCode::RandomnessNotRequested))
    }

    /// Oracle callback: stores the revealed value for winner selection.
    pub fn fulfill_randomness(&mut self, value: u64, slot: u64) -> Result<()> {
        self.require_state(LotteryState::Drawing)?;
        let request = self
            .randomness
            .as_mut()
            .ok_or(ErrorCode::RandomnessNotRequested)?;
        request.fulfill(value, slot)
    }

    /// Consumes the fulfilled value: `winner = registry[value mod size]`.
    pub fn choose_winner(&mut self) -> Result<Pubkey> {
        let request = self
            .randomness
            .as_mut()
            .ok_or(ErrorCode::RandomnessNotRequested)?;
        require!(!request.consumed, ErrorCode::RandomnessAlreadyConsumed);
        require!(self.winner.is_none(), ErrorCode::WinnerAlreadySelected);
        require!(self.state == LotteryState::Drawing, ErrorCode::InvalidState);
        require!(!self.registry.is_empty(), ErrorCode::NoParticipants);

        let value = request.consume()?;
        let index = winner_index(value, self.registry.size())?;
        let winner = self
            .registry
            .index_of(index)
            .map(|e| e.key)
            .ok_or(ErrorCode::ParticipantNotFound)?;

        self.winner = Some(winner);
        self.state = LotteryState::Settled;
        Ok(winner)
    }

    pub fn ensure_can_redeem(&self) -> Result<()> {
        require!(self.state == LotteryState::Settled, ErrorCode::LotteryNotSettled);
        require!(self.position.is_open(), ErrorCode::InvalidState);
        Ok(())
    }

    /// Books the reserve's answer to a redemption and fixes the winner payout.
    pub fn record_redemption(&mut self, redeemed: u64, collateral_burned: u64) -> Result<()> {
        self.ensure_can_redeem()?;
        let payout = winner_payout(redeemed, self.entry_fee, self.registry.size())?;
        let liquidity = self
            .liquidity_vault_balance
            .checked_add(redeemed)
            .ok_or(ErrorCode::MathOverflow)?;

        self.position.record_redemption(redeemed)?;
        self.collateral_vault_balance = self
            .collateral_vault_balance
            .saturating_sub(collateral_burned);
        self.liquidity_vault_balance = liquidity;
        self.winner_payout = payout;
        Ok(())
    }

    /// Amount owed to `participant`, marking them withdrawn.
    pub fn claim_payout(&mut self, participant: Pubkey) -> Result<u64> {
        require!(self.state == LotteryState::Settled, ErrorCode::LotteryNotSettled);
        require!(self.position.is_redeemed(), ErrorCode::FundsStillInvested);

        let amount = if self.winner == Some(participant) {
            self.winner_payout
        } else {
            self.entry_fee
        };
        let balance = self
            .liquidity_vault_balance
            .checked_sub(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        self.registry.mark_withdrawn(&participant)?;
        self.liquidity_vault_balance = balance;
        Ok(amount)
    }

    pub fn ensure_can_close_out(&self) -> Result<()> {
        self.require_state(LotteryState::Settled)?;
        require!(self.position.is_redeemed(), ErrorCode::FundsStillInvested);
        require!(self.registry.all_withdrawn(), ErrorCode::ParticipantsPending);
        Ok(())
    }

    /// Vault contents nobody is owed, given the actual vault balances.
    ///
    /// Returns `(liquidity, collateral)`. These are tokens sent straight to
    /// the vaults; they are swept to the authority before the vaults close.
    pub fn stray_balances(&self, liquidity_vault: u64, collateral_vault: u64) -> Result<(u64, u64)> {
        self.ensure_can_close_out()?;
        let liquidity = liquidity_vault
            .checked_sub(self.liquidity_vault_balance)
            .ok_or(ErrorCode::MathOverflow)?;
        let collateral = collateral_vault
            .checked_sub(self.collateral_vault_balance)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok((liquidity, collateral))
    }

    /// Tears the round down to an empty `ClosedOut` shape.
    pub fn close_out(&mut self) -> Result<()> {
        self.ensure_can_close_out()?;

        self.registry.clear();
        self.randomness = None;
        self.winner = None;
        self.winner_payout = 0;
        self.position = LendingPosition::default();
        self.liquidity_vault_balance = 0;
        self.collateral_vault_balance = 0;
        self.state = LotteryState::ClosedOut;
        Ok(())
    }
}
