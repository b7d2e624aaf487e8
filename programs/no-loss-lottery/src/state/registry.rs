use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// A single paid entry into the round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Entrant {
    /// Wallet that paid the entry fee and receives the payout.
    pub key: Pubkey,
    /// Always equal to the round's entry fee.
    pub deposited_amount: u64,
    /// Set once the entrant has pulled their payout out of the liquidity vault.
    pub withdrawn: bool,
}

/// Bounded, append-only list of entrants.
///
/// Entries are never removed individually; the whole registry is cleared when
/// the round closes out. Positions are stable, so the winner index drawn from
/// randomness always points at the same entrant.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct ParticipantRegistry {
    pub capacity: u32,
    // keep in sync with MAX_PARTICIPANTS
    #[max_len(32)]
    pub entrants: Vec<Entrant>,
}

impl ParticipantRegistry {
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity,
            entrants: Vec::new(),
        }
    }

    pub fn add(&mut self, participant: Pubkey, amount: u64) -> Result<()> {
        require!(
            self.find(&participant).is_none(),
            ErrorCode::ParticipantAlreadyAdded
        );
        require!(!self.is_full(), ErrorCode::ListFull);

        self.entrants.push(Entrant {
            key: participant,
            deposited_amount: amount,
            withdrawn: false,
        });
        Ok(())
    }

    pub fn index_of(&self, index: usize) -> Option<&Entrant> {
        self.entrants.get(index)
    }

    pub fn size(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.size() >= self.capacity as usize
    }

    pub fn find(&self, participant: &Pubkey) -> Option<usize> {
        self.entrants.iter().position(|e| e.key == *participant)
    }

    pub fn total_deposited(&self) -> Result<u64> {
        self.entrants.iter().try_fold(0u64, |acc, e| {
            acc.checked_add(e.deposited_amount)
                .ok_or_else(|| error!(ErrorCode::MathOverflow))
        })
    }

    /// Flags the entrant as paid out. Fails if unknown or already withdrawn.
    pub fn mark_withdrawn(&mut self, participant: &Pubkey) -> Result<()> {
        let index = self
            .find(participant)
            .ok_or(ErrorCode::ParticipantNotFound)?;
        let entrant = &mut self.entrants[index];
        require!(!entrant.withdrawn, ErrorCode::AlreadyWithdrawn);
        entrant.withdrawn = true;
        Ok(())
    }

    pub fn all_withdrawn(&self) -> bool {
        self.entrants.iter().all(|e| e.withdrawn)
    }

    pub fn clear(&mut self) {
        self.entrants.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_in_order() {
        let mut registry = ParticipantRegistry::with_capacity(3);
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();

        registry.add(a, 10).unwrap();
        registry.add(b, 10).unwrap();

        assert_eq!(registry.size(), 2);
        assert_eq!(registry.index_of(0).unwrap().key, a);
        assert_eq!(registry.index_of(1).unwrap().key, b);
        assert!(registry.index_of(2).is_none());
        assert_eq!(registry.total_deposited().unwrap(), 20);
    }

    #[test]
    fn duplicate_is_rejected() {
        let mut registry = ParticipantRegistry::with_capacity(3);
        let a = Pubkey::new_unique();
        registry.add(a, 10).unwrap();

        let err = registry.add(a, 10).unwrap_err();
        assert_eq!(err, ErrorCode::ParticipantAlreadyAdded.into());
        assert_eq!(registry.size(), 1);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut registry = ParticipantRegistry::with_capacity(1);
        registry.add(Pubkey::new_unique(), 10).unwrap();
        assert!(registry.is_full());

        let err = registry.add(Pubkey::new_unique(), 10).unwrap_err();
        assert_eq!(err, ErrorCode::ListFull.into());
        assert_eq!(registry.size(), 1);
    }

    #[test]
    fn withdrawal_is_tracked_once() {
        let mut registry = ParticipantRegistry::with_capacity(2);
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        registry.add(a, 10).unwrap();
        registry.add(b, 10).unwrap();

        registry.mark_withdrawn(&a).unwrap();
        assert!(!registry.all_withdrawn());
        assert_eq!(
            registry.mark_withdrawn(&a).unwrap_err(),
            ErrorCode::AlreadyWithdrawn.into()
        );
        assert_eq!(
            registry.mark_withdrawn(&Pubkey::new_unique()).unwrap_err(),
            ErrorCode::ParticipantNotFound.into()
        );

        registry.mark_withdrawn(&b).unwrap();
        assert!(registry.all_withdrawn());

        registry.clear();
        assert!(registry.is_empty());
    }
}
