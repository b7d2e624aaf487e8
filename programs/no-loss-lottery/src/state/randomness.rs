use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// Where randomness accounts must come from. Fixed at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct OracleConfig {
    /// Switchboard on-demand program that owns the queue and every randomness account.
    pub program: Pubkey,
    pub queue: Pubkey,
}

/// A single draw against the randomness oracle.
///
/// Created when the round enters `Drawing`, fulfilled once the oracle has
/// revealed, consumed exactly once by winner selection.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct RandomnessRequest {
    /// Switchboard randomness account the oracle reveals into.
    pub randomness_account: Pubkey,
    pub requested_at: u64,
    pub fulfilled_value: Option<u64>,
    pub fulfilled_at: u64,
    pub consumed: bool,
}

impl RandomnessRequest {
    pub fn new(randomness_account: Pubkey, slot: u64) -> Self {
        Self {
            randomness_account,
            requested_at: slot,
            fulfilled_value: None,
            fulfilled_at: 0,
            consumed: false,
        }
    }

    /// Requested and not yet consumed.
    pub fn is_outstanding(&self) -> bool {
        !self.consumed
    }

    pub fn fulfill(&mut self, value: u64, slot: u64) -> Result<()> {
        require!(!self.consumed, ErrorCode::RandomnessAlreadyConsumed);
        require!(
            self.fulfilled_value.is_none(),
            ErrorCode::RandomnessAlreadyFulfilled
        );
        self.fulfilled_value = Some(value);
        self.fulfilled_at = slot;
        Ok(())
    }

    /// Hands out the fulfilled value once; the request is dead afterwards.
    pub fn consume(&mut self) -> Result<u64> {
        require!(!self.consumed, ErrorCode::RandomnessAlreadyConsumed);
        let value = self
            .fulfilled_value
            .ok_or(ErrorCode::RandomnessNotResolved)?;
        self.consumed = true;
        Ok(value)
    }
}

/// Reads the first 8 bytes of a revealed 32-byte value as a little-endian u64.
pub fn value_from_revealed(revealed: &[u8; 32]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&revealed[..8]);
    u64::from_le_bytes(bytes)
}

/// `value mod size`. Slightly biased when `size` is not a power of two.
pub fn winner_index(value: u64, size: usize) -> Result<usize> {
    require!(size > 0, ErrorCode::NoParticipants);
    Ok((value % size as u64) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fulfil_then_consume_once() {
        let mut request = RandomnessRequest::new(Pubkey::new_unique(), 100);
        assert!(request.is_outstanding());
        assert_eq!(
            request.consume().unwrap_err(),
            ErrorCode::RandomnessNotResolved.into()
        );

        request.fulfill(42, 102).unwrap();
        assert_eq!(
            request.fulfill(43, 103).unwrap_err(),
            ErrorCode::RandomnessAlreadyFulfilled.into()
        );
        assert_eq!(request.fulfilled_value, Some(42));

        assert_eq!(request.consume().unwrap(), 42);
        assert!(!request.is_outstanding());
        assert_eq!(
            request.consume().unwrap_err(),
            ErrorCode::RandomnessAlreadyConsumed.into()
        );
    }

    #[test]
    fn revealed_bytes_are_little_endian() {
        let mut revealed = [0xffu8; 32];
        revealed[..8].copy_from_slice(&7u64.to_le_bytes());
        assert_eq!(value_from_revealed(&revealed), 7);
    }

    #[test]
    fn index_wraps_by_size() {
        assert_eq!(winner_index(7, 5).unwrap(), 2);
        assert_eq!(winner_index(u64::MAX, 1).unwrap(), 0);
        assert_eq!(
            winner_index(7, 0).unwrap_err(),
            ErrorCode::NoParticipants.into()
        );
    }
}
