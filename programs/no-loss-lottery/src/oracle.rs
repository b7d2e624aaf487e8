//! Reads the Switchboard on-demand randomness account bound to a round.
//!
//! Account data is only trusted once its owner is the Switchboard program
//! recorded at initialization. `RandomnessAccountData::parse` checks the
//! discriminator and nothing else.

use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;
use switchboard_on_demand::{ON_DEMAND_DEVNET_PID, ON_DEMAND_MAINNET_PID};

use crate::error::ErrorCode;
use crate::state::OracleConfig;

pub fn is_switchboard_program(program: &Pubkey) -> bool {
    *program == ON_DEMAND_MAINNET_PID || *program == ON_DEMAND_DEVNET_PID
}

pub fn check_owner(account: &AccountInfo, config: &OracleConfig) -> Result<()> {
    require_keys_eq!(
        *account.owner,
        config.program,
        ErrorCode::InvalidRandomnessAccount
    );
    Ok(())
}

/// Accepts a randomness account committed in the previous slot on the
/// configured queue, so its value cannot be known yet.
pub fn check_commitment(account: &AccountInfo, config: &OracleConfig, clock: &Clock) -> Result<()> {
    check_owner(account, config)?;
    let randomness_data = RandomnessAccountData::parse(account.data.borrow())
        .map_err(|_| ErrorCode::InvalidRandomnessAccount)?;

    require_keys_eq!(
        randomness_data.queue,
        config.queue,
        ErrorCode::InvalidRandomnessQueue
    );
    if randomness_data.seed_slot != clock.slot.saturating_sub(1) {
        msg!("Seed slot: {}", randomness_data.seed_slot);
        msg!("Current slot: {}", clock.slot);
        return err!(ErrorCode::RandomnessAlreadyRevealed);
    }
    Ok(())
}

/// The 32-byte value the oracle revealed into `account`.
pub fn revealed_value(account: &AccountInfo, config: &OracleConfig, clock: &Clock) -> Result<[u8; 32]> {
    check_owner(account, config)?;
    let randomness_data = RandomnessAccountData::parse(account.data.borrow())
        .map_err(|_| ErrorCode::InvalidRandomnessAccount)?;
    let value = randomness_data
        .get_value(clock)
        .map_err(|_| ErrorCode::RandomnessNotResolved)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(owner: Pubkey) -> AccountInfo<'static> {
        let key = Box::leak(Box::new(Pubkey::new_unique()));
        let owner = Box::leak(Box::new(owner));
        let lamports = Box::leak(Box::new(1_000_000u64));
        let data: &'static mut [u8] = Box::leak(vec![0u8; 64].into_boxed_slice());
        AccountInfo::new(key, false, false, lamports, data, owner, false, 0)
    }

    fn config() -> OracleConfig {
        OracleConfig {
            program: ON_DEMAND_MAINNET_PID,
            queue: Pubkey::new_unique(),
        }
    }

    #[test]
    fn only_switchboard_programs_are_accepted() {
        assert!(is_switchboard_program(&ON_DEMAND_MAINNET_PID));
        assert!(is_switchboard_program(&ON_DEMAND_DEVNET_PID));
        assert!(!is_switchboard_program(&Pubkey::new_unique()));
        assert!(!is_switchboard_program(&crate::ID));
    }

    #[test]
    fn foreign_randomness_account_is_rejected() {
        let config = config();
        let clock = Clock::default();

        // same layout, written by some other program
        let forged = account(Pubkey::new_unique());

        for err in [
            check_owner(&forged, &config).unwrap_err(),
            check_commitment(&forged, &config, &clock).unwrap_err(),
            revealed_value(&forged, &config, &clock).unwrap_err(),
        ] {
            assert_eq!(err, ErrorCode::InvalidRandomnessAccount.into());
        }
    }

    #[test]
    fn devnet_account_rejected_by_mainnet_round() {
        let config = config();
        let account = account(ON_DEMAND_DEVNET_PID);

        assert_eq!(
            check_owner(&account, &config).unwrap_err(),
            ErrorCode::InvalidRandomnessAccount.into()
        );
    }

    #[test]
    fn owned_account_passes_owner_check() {
        let config = config();
        let account = account(ON_DEMAND_MAINNET_PID);

        check_owner(&account, &config).unwrap();
    }
}
