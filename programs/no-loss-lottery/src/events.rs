use anchor_lang::prelude::*;

#[event]
pub struct LotteryInitialized {
    pub lottery: Pubkey,
    pub authority: Pubkey,
    pub entry_fee: u64,
    pub max_participants: u32,
}

#[event]
pub struct LotteryEntered {
    pub participant: Pubkey,
    pub amount: u64,
    pub participant_count: u32,
}

#[event]
pub struct FundsInvested {
    pub liquidity_amount: u64,
    pub collateral_amount: u64,
    pub exchange_rate_wad: u128,
}

#[event]
pub struct RandomnessRequested {
    pub randomness_account: Pubkey,
    pub slot: u64,
}

#[event]
pub struct RandomnessSettled {
    pub randomness_account: Pubkey,
    pub value: u64,
    pub slot: u64,
}

#[event]
pub struct WinnerChosen {
    pub winner: Pubkey,
    pub participant_count: u32,
}

#[event]
pub struct FundsRedeemed {
    pub collateral_amount: u64,
    pub liquidity_amount: u64,
    pub winner_payout: u64,
}

#[event]
pub struct PayoutWithdrawn {
    pub participant: Pubkey,
    pub amount: u64,
    pub is_winner: bool,
}

#[event]
pub struct LotteryClosed {
    pub lottery: Pubkey,
    pub authority: Pubkey,
}
