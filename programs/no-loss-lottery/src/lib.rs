use anchor_lang::prelude::*;
pub use instructions::*;

/// PDA seeds, registry bound and lending instruction tags.
pub mod constants;

/// Errors returned via the Anchor framework when instructions fail.
pub mod error;

/// Events emitted on every round transition.
pub mod events;

/// All instruction handlers: initialize, enter, deposit, draw, settle,
/// withdraw and close.
pub mod instructions;

/// CPI plumbing for the external lending reserve.
pub mod lending;

/// Switchboard randomness account checks.
pub mod oracle;

/// On-chain state: the `LotteryRound` account and the pieces it is made of.
pub mod state;

pub use state::InitializeLotteryParams;

declare_id!("GFVxvAzesa7PdEhndi4YZLQGKT7Hdgc6RLyZSCFNaMP6");

#[program]
pub mod no_loss_lottery {
    use super::*;

    pub fn initialize_lottery(
        ctx: Context<InitializeLottery>,
        params: InitializeLotteryParams,
    ) -> Result<()> {
        process_initialize_lottery(ctx, params)
    }

    pub fn enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
        process_enter_lottery(ctx, amount)
    }

    pub fn deposit(ctx: Context<Deposit>) -> Result<()> {
        process_deposit(ctx)
    }

    pub fn request_randomness(ctx: Context<RequestRandomness>) -> Result<()> {
        process_request_randomness(ctx)
    }

    pub fn settle_randomness(ctx: Context<SettleRandomness>) -> Result<()> {
        process_settle_randomness(ctx)
    }

    pub fn choose_winner(ctx: Context<ChooseWinner>) -> Result<()> {
        process_choose_winner(ctx)
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        process_withdraw(ctx)
    }

    pub fn withdraw_user_tokens(ctx: Context<WithdrawUserTokens>) -> Result<()> {
        process_withdraw_user_tokens(ctx)
    }

    pub fn close_accounts(ctx: Context<CloseAccounts>) -> Result<()> {
        process_close_accounts(ctx)
    }
}
