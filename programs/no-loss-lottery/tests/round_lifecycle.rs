//! Round lifecycle tests for the no-loss lottery.
//!
//! These drive a `LotteryRound` through every transition with the balances
//! the token, lending and randomness programs would have produced, and check
//! the bookkeeping the program relies on:
//! 1. Entry rules (fee, capacity, duplicates)
//! 2. Strict ordering of deposit / draw / settle / redeem
//! 3. Payout conservation: nothing created or destroyed
//!
//! Token, lending and oracle CPIs are not exercised here.

use anchor_lang::prelude::Pubkey;
use no_loss_lottery::error::ErrorCode;
use no_loss_lottery::lending::ExchangeRate;
use no_loss_lottery::state::{
    value_from_revealed, InitializeLotteryParams, LendingReserve, LotteryRound, LotteryState,
    OracleConfig, RoundBumps, VaultPair,
};
use switchboard_on_demand::ON_DEMAND_DEVNET_PID;

/// 1.0 unit of a 9-decimal mint.
const UNIT: u64 = 1_000_000_000;

fn new_round(entry_fee: u64, max_participants: u32) -> LotteryRound {
    LotteryRound::new(
        InitializeLotteryParams {
            entry_fee,
            max_participants,
        },
        Pubkey::new_unique(),
        VaultPair {
            liquidity_mint: Pubkey::new_unique(),
            collateral_mint: Pubkey::new_unique(),
            liquidity_vault: Pubkey::new_unique(),
            collateral_vault: Pubkey::new_unique(),
        },
        LendingReserve::default(),
        OracleConfig {
            program: ON_DEMAND_DEVNET_PID,
            queue: Pubkey::new_unique(),
        },
        RoundBumps {
            round: 255,
            vault_signer: 253,
        },
    )
    .unwrap()
}

fn entrants(n: usize) -> Vec<Pubkey> {
    (0..n).map(|_| Pubkey::new_unique()).collect()
}

fn revealed(value: u64) -> [u8; 32] {
    let mut bytes = [0xabu8; 32];
    bytes[..8].copy_from_slice(&value.to_le_bytes());
    bytes
}

// ============================================================================
// Entry
// ============================================================================

mod entry {
    use super::*;

    #[test]
    fn each_entry_adds_one_entrant_and_one_fee() {
        let mut lottery = new_round(UNIT, 5);

        for (i, key) in entrants(5).into_iter().enumerate() {
            let size_before = lottery.participant_count();
            let balance_before = lottery.liquidity_vault_balance;

            lottery.enter(key, UNIT).unwrap();

            assert_eq!(lottery.participant_count(), size_before + 1);
            assert_eq!(lottery.liquidity_vault_balance, balance_before + UNIT);
            assert_eq!(lottery.registry.index_of(i).unwrap().key, key);
            assert_eq!(lottery.registry.index_of(i).unwrap().deposited_amount, UNIT);
        }
    }

    #[test]
    fn full_round_rejects_entry_without_side_effects() {
        let mut lottery = new_round(UNIT, 2);
        for key in entrants(2) {
            lottery.enter(key, UNIT).unwrap();
        }

        let err = lottery.enter(Pubkey::new_unique(), UNIT).unwrap_err();

        assert_eq!(err, ErrorCode::ListFull.into());
        assert_eq!(lottery.participant_count(), 2);
        assert_eq!(lottery.liquidity_vault_balance, 2 * UNIT);
    }

    #[test]
    fn second_entry_by_same_identity_fails() {
        let mut lottery = new_round(UNIT, 5);
        let key = Pubkey::new_unique();
        lottery.enter(key, UNIT).unwrap();

        let err = lottery.enter(key, UNIT).unwrap_err();

        assert_eq!(err, ErrorCode::ParticipantAlreadyAdded.into());
        assert_eq!(lottery.participant_count(), 1);
        assert_eq!(lottery.liquidity_vault_balance, UNIT);
    }

    #[test]
    fn variable_stakes_are_rejected() {
        let mut lottery = new_round(UNIT, 5);
        for amount in [0, UNIT - 1, UNIT + 1, 2 * UNIT] {
            assert_eq!(
                lottery.enter(Pubkey::new_unique(), amount).unwrap_err(),
                ErrorCode::WrongEntryAmount.into()
            );
        }
        assert_eq!(lottery.participant_count(), 0);
    }
}

// ============================================================================
// Transition ordering
// ============================================================================

mod ordering {
    use super::*;

    #[test]
    fn withdrawal_before_settlement_always_fails() {
        let mut lottery = new_round(UNIT, 3);
        let keys = entrants(3);
        for key in &keys {
            lottery.enter(*key, UNIT).unwrap();
        }

        let outsider = Pubkey::new_unique();
        let check = |lottery: &mut LotteryRound| {
            for caller in keys.iter().chain(std::iter::once(&outsider)) {
                assert_eq!(
                    lottery.claim_payout(*caller).unwrap_err(),
                    ErrorCode::LotteryNotSettled.into()
                );
            }
        };

        check(&mut lottery);
        lottery.record_investment(3 * UNIT, 3 * UNIT).unwrap();
        check(&mut lottery);
        lottery.request_randomness(Pubkey::new_unique(), 50).unwrap();
        check(&mut lottery);
        lottery.fulfill_randomness(9, 52).unwrap();
        check(&mut lottery);

        assert_eq!(lottery.liquidity_vault_balance, 0);
        assert!(lottery.registry.entrants.iter().all(|e| !e.withdrawn));
    }

    #[test]
    fn randomness_cannot_be_requested_twice() {
        let mut lottery = new_round(UNIT, 2);
        lottery.enter(Pubkey::new_unique(), UNIT).unwrap();
        lottery.record_investment(UNIT, UNIT).unwrap();

        let first = Pubkey::new_unique();
        lottery.request_randomness(first, 100).unwrap();
        let err = lottery
            .request_randomness(Pubkey::new_unique(), 101)
            .unwrap_err();

        assert_eq!(err, ErrorCode::RandomnessAlreadyRequested.into());
        assert_eq!(lottery.pending_randomness_account().unwrap(), first);
    }

    #[test]
    fn choose_winner_consumes_the_value_once() {
        let mut lottery = new_round(UNIT, 4);
        let keys = entrants(4);
        for key in &keys {
            lottery.enter(*key, UNIT).unwrap();
        }
        lottery.record_investment(4 * UNIT, 4 * UNIT).unwrap();
        lottery.request_randomness(Pubkey::new_unique(), 7).unwrap();

        let value = value_from_revealed(&revealed(1_000_003));
        lottery.fulfill_randomness(value, 9).unwrap();

        let winner = lottery.choose_winner().unwrap();
        assert_eq!(winner, keys[(1_000_003 % 4) as usize]);

        assert_eq!(
            lottery.choose_winner().unwrap_err(),
            ErrorCode::RandomnessAlreadyConsumed.into()
        );
        assert_eq!(lottery.winner, Some(winner));
    }

    #[test]
    fn choose_winner_is_deterministic() {
        let keys = entrants(3);
        let pick = |value: u64| {
            let mut lottery = new_round(UNIT, 3);
            for key in &keys {
                lottery.enter(*key, UNIT).unwrap();
            }
            lottery.record_investment(3 * UNIT, 3 * UNIT).unwrap();
            lottery.request_randomness(Pubkey::new_unique(), 1).unwrap();
            lottery.fulfill_randomness(value, 2).unwrap();
            lottery.choose_winner().unwrap()
        };

        for value in [0, 1, 2, 3, 17, u64::MAX] {
            assert_eq!(pick(value), pick(value));
            assert_eq!(pick(value), keys[(value % 3) as usize]);
        }
    }

    #[test]
    fn close_out_resets_the_round() {
        let mut lottery = new_round(UNIT, 1);
        let key = Pubkey::new_unique();
        lottery.enter(key, UNIT).unwrap();
        lottery.record_investment(UNIT, UNIT).unwrap();
        lottery.request_randomness(Pubkey::new_unique(), 1).unwrap();
        lottery.fulfill_randomness(5, 2).unwrap();
        lottery.choose_winner().unwrap();

        assert_eq!(
            lottery.close_out().unwrap_err(),
            ErrorCode::FundsStillInvested.into()
        );

        lottery.record_redemption(UNIT + 7, UNIT).unwrap();
        assert_eq!(lottery.claim_payout(key).unwrap(), UNIT + 7);
        lottery.close_out().unwrap();

        assert_eq!(lottery.state, LotteryState::ClosedOut);
        assert_eq!(lottery.participant_count(), 0);
        assert_eq!(lottery.liquidity_vault_balance, 0);
        assert_eq!(lottery.collateral_vault_balance, 0);
    }
}

// ============================================================================
// Settlement
// ============================================================================

mod settlement {
    use super::*;

    #[test]
    fn five_entrants_winner_takes_the_yield() {
        let mut lottery = new_round(UNIT, 5);
        let keys = entrants(5);
        for key in &keys {
            lottery.enter(*key, UNIT).unwrap();
        }
        assert_eq!(lottery.liquidity_vault_balance, 5 * UNIT);

        // reserve quotes 0.96 collateral per unit
        let collateral = 4_800_000_000;
        lottery.record_investment(5 * UNIT, collateral).unwrap();
        assert_eq!(lottery.state, LotteryState::Closed);
        assert_eq!(lottery.liquidity_vault_balance, 0);
        assert_eq!(lottery.collateral_vault_balance, collateral);

        lottery.request_randomness(Pubkey::new_unique(), 1_000).unwrap();
        assert_eq!(lottery.state, LotteryState::Drawing);
        lottery.fulfill_randomness(12, 1_002).unwrap();
        let winner = lottery.choose_winner().unwrap();
        assert_eq!(winner, keys[2]);

        lottery.record_redemption(5_200_000_000, collateral).unwrap();
        assert_eq!(lottery.position.accrued_yield(), 200_000_000);
        assert_eq!(lottery.collateral_vault_balance, 0);

        let mut paid = 0;
        for key in &keys {
            let amount = lottery.claim_payout(*key).unwrap();
            if *key == winner {
                assert_eq!(amount, 1_200_000_000);
            } else {
                assert_eq!(amount, UNIT);
            }
            paid += amount;
        }

        assert_eq!(paid, 5_200_000_000);
        assert_eq!(lottery.liquidity_vault_balance, 0);
        assert!(lottery.registry.all_withdrawn());
    }

    #[test]
    fn participant_cannot_withdraw_twice() {
        let mut lottery = new_round(UNIT, 2);
        let keys = entrants(2);
        for key in &keys {
            lottery.enter(*key, UNIT).unwrap();
        }
        lottery.record_investment(2 * UNIT, 2 * UNIT).unwrap();
        lottery.request_randomness(Pubkey::new_unique(), 1).unwrap();
        lottery.fulfill_randomness(1, 2).unwrap();
        lottery.choose_winner().unwrap();
        lottery.record_redemption(2 * UNIT, 2 * UNIT).unwrap();

        lottery.claim_payout(keys[0]).unwrap();
        let balance = lottery.liquidity_vault_balance;

        assert_eq!(
            lottery.claim_payout(keys[0]).unwrap_err(),
            ErrorCode::AlreadyWithdrawn.into()
        );
        assert_eq!(lottery.liquidity_vault_balance, balance);
    }

    #[test]
    fn invest_then_redeem_without_yield_restores_the_pool() {
        let invested = 3 * UNIT;
        let collateral = 2_999_999_999;
        let rate = ExchangeRate::from_amounts(invested, collateral).unwrap();
        let redeemed = rate.collateral_to_liquidity(collateral).unwrap();

        assert!(invested - redeemed <= 1);

        let mut lottery = new_round(UNIT, 3);
        for key in entrants(3) {
            lottery.enter(key, UNIT).unwrap();
        }
        lottery.record_investment(invested, collateral).unwrap();
        assert_eq!(lottery.position.exchange_rate_wad, rate.wad());
        lottery.request_randomness(Pubkey::new_unique(), 1).unwrap();
        lottery.fulfill_randomness(0, 2).unwrap();
        lottery.choose_winner().unwrap();
        lottery.record_redemption(redeemed, collateral).unwrap();

        assert!(invested - lottery.liquidity_vault_balance <= 1);
    }

    #[test]
    fn heavy_loss_keeps_position_open() {
        let mut lottery = new_round(UNIT, 3);
        for key in entrants(3) {
            lottery.enter(key, UNIT).unwrap();
        }
        lottery.record_investment(3 * UNIT, 3 * UNIT).unwrap();
        lottery.request_randomness(Pubkey::new_unique(), 1).unwrap();
        lottery.fulfill_randomness(0, 2).unwrap();
        lottery.choose_winner().unwrap();

        let err = lottery.record_redemption(2 * UNIT - 1, 3 * UNIT).unwrap_err();

        assert_eq!(err, ErrorCode::InsufficientRedeemedLiquidity.into());
        assert!(lottery.position.is_open());
        assert_eq!(lottery.collateral_vault_balance, 3 * UNIT);
    }

    #[test]
    fn donations_never_block_teardown() {
        let mut lottery = new_round(UNIT, 2);
        let keys = entrants(2);
        for key in &keys {
            lottery.enter(*key, UNIT).unwrap();
        }
        lottery.record_investment(2 * UNIT, 2 * UNIT).unwrap();
        lottery.request_randomness(Pubkey::new_unique(), 1).unwrap();
        lottery.fulfill_randomness(1, 2).unwrap();
        lottery.choose_winner().unwrap();
        lottery.record_redemption(2 * UNIT + 10, 2 * UNIT).unwrap();
        for key in &keys {
            lottery.claim_payout(*key).unwrap();
        }

        // 1 liquidity unit and 3 collateral units arrive after the last payout
        assert_eq!(lottery.stray_balances(1, 3).unwrap(), (1, 3));

        lottery.close_out().unwrap();
        assert_eq!(lottery.state, LotteryState::ClosedOut);
    }
}
