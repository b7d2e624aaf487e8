use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::Token,
    token_interface::{
        close_account, transfer_checked, CloseAccount, Mint, TokenAccount, TokenInterface,
        TransferChecked,
    },
};

use crate::constants::{LOTTERY_INFO_SEED, VAULT_SIGNER_SEED};
use crate::error::ErrorCode;
use crate::events::{LotteryClosed, LotteryInitialized};
use crate::oracle;
use crate::state::{
    InitializeLotteryParams, LendingReserve, LotteryRound, OracleConfig, RoundBumps, VaultPair,
};

/// Accounts required to initialize a lottery round.
/// Creates the round account and both custody vaults, and pins the lending
/// reserve and randomness queue the round will use.
#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    /// The operator; pays for account creation and becomes the round authority.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The round state account.
    #[account(
        init,
        payer = payer,
        space = 8 + LotteryRound::INIT_SPACE,
        seeds = [LOTTERY_INFO_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, LotteryRound>>,

    /// CHECK: PDA with no data; only signs for the vaults.
    #[account(seeds = [VAULT_SIGNER_SEED], bump)]
    pub vault_signer: UncheckedAccount<'info>,

    /// Mint of the asset entrants pay with.
    #[account(mint::token_program = token_program)]
    pub liquidity_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Mint of the reserve's collateral token.
    #[account(mint::token_program = token_program)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Holds pooled entry fees while they are not invested.
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = liquidity_mint,
        associated_token::authority = vault_signer,
        associated_token::token_program = token_program,
    )]
    pub liquidity_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Holds the collateral issued by the reserve while invested.
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = collateral_mint,
        associated_token::authority = vault_signer,
        associated_token::token_program = token_program,
    )]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Recorded; every later lending CPI is checked against it.
    #[account(executable)]
    pub lending_program: UncheckedAccount<'info>,

    /// CHECK: Must be owned by the lending program.
    #[account(owner = lending_program.key() @ ErrorCode::InvalidLendingAccount)]
    pub lending_market: UncheckedAccount<'info>,

    /// CHECK: Must be owned by the lending program.
    #[account(owner = lending_program.key() @ ErrorCode::InvalidLendingAccount)]
    pub reserve: UncheckedAccount<'info>,

    /// The reserve's liquidity supply, in the entry asset.
    #[account(
        token::mint = liquidity_mint,
        token::token_program = token_program,
    )]
    pub reserve_liquidity_supply: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Price feed the reserve refreshes against; recorded only.
    pub reserve_liquidity_oracle: UncheckedAccount<'info>,

    /// CHECK: Must be owned by a Switchboard on-demand program; that owner
    /// is recorded and every randomness account must share it.
    #[account(
        constraint = oracle::is_switchboard_program(randomness_queue.owner)
            @ ErrorCode::InvalidRandomnessQueue
    )]
    pub randomness_queue: UncheckedAccount<'info>,

    /// The lending reserve only moves classic SPL tokens.
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Initializes the round with a fixed entry fee and capacity.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeLottery accounts
/// * `params` - Entry fee and max participants; immutable afterwards
pub fn process_initialize_lottery(
    ctx: Context<InitializeLottery>,
    params: InitializeLotteryParams,
) -> Result<()> {
    let accounts = ctx.accounts;

    let vaults = VaultPair {
        liquidity_mint: accounts.liquidity_mint.key(),
        collateral_mint: accounts.collateral_mint.key(),
        liquidity_vault: accounts.liquidity_vault.key(),
        collateral_vault: accounts.collateral_vault.key(),
    };
    let lending = LendingReserve {
        lending_program: accounts.lending_program.key(),
        lending_market: accounts.lending_market.key(),
        reserve: accounts.reserve.key(),
        reserve_liquidity_supply: accounts.reserve_liquidity_supply.key(),
        reserve_collateral_mint: accounts.collateral_mint.key(),
        reserve_liquidity_oracle: accounts.reserve_liquidity_oracle.key(),
    };
    let round = LotteryRound::new(
        params,
        accounts.payer.key(),
        vaults,
        lending,
        OracleConfig {
            program: *accounts.randomness_queue.owner,
            queue: accounts.randomness_queue.key(),
        },
        RoundBumps {
            round: ctx.bumps.lottery,
            vault_signer: ctx.bumps.vault_signer,
        },
    )?;
    accounts.lottery.set_inner(round);

    msg!("Entry fee: {}", params.entry_fee);
    msg!("Max participants: {}", params.max_participants);
    msg!("Vault signer: {}", accounts.vault_signer.key());
    msg!("Randomness queue: {}", accounts.randomness_queue.key());

    emit!(LotteryInitialized {
        lottery: accounts.lottery.key(),
        authority: accounts.payer.key(),
        entry_fee: params.entry_fee,
        max_participants: params.max_participants,
    });

    Ok(())
}

/// Accounts required to close out a finished round.
#[derive(Accounts)]
pub struct CloseAccounts<'info> {
    /// Round authority; receives the rent of every closed account.
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_INFO_SEED],
        bump = lottery.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
        close = authority,
    )]
    pub lottery: Box<Account<'info, LotteryRound>>,

    /// CHECK: PDA with no data; only signs for the vaults.
    #[account(seeds = [VAULT_SIGNER_SEED], bump = lottery.vault_signer_bump)]
    pub vault_signer: UncheckedAccount<'info>,

    #[account(mut, address = lottery.vaults.liquidity_vault)]
    pub liquidity_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = lottery.vaults.collateral_vault)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(address = lottery.vaults.liquidity_mint)]
    pub liquidity_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = lottery.vaults.collateral_mint)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Receives liquidity sent to the vault outside the round.
    #[account(
        mut,
        token::mint = liquidity_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub authority_liquidity_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives collateral sent to the vault outside the round.
    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub authority_collateral_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Releases the custody accounts and the round account.
///
/// Steps:
/// 1. Check every participant has withdrawn and reset the round.
/// 2. Sweep tokens nobody is owed to the authority, so the vaults are empty.
/// 3. Close both vaults, signed by the vault signer.
/// 4. The round account itself is closed by the `close` constraint.
pub fn process_close_accounts(ctx: Context<CloseAccounts>) -> Result<()> {
    let accounts = ctx.accounts;
    let (stray_liquidity, stray_collateral) = accounts.lottery.stray_balances(
        accounts.liquidity_vault.amount,
        accounts.collateral_vault.amount,
    )?;
    accounts.lottery.close_out()?;

    let signer = accounts.lottery.vault_signer();
    let vaults = [
        (
            &accounts.liquidity_vault,
            &accounts.liquidity_mint,
            &accounts.authority_liquidity_account,
            stray_liquidity,
        ),
        (
            &accounts.collateral_vault,
            &accounts.collateral_mint,
            &accounts.authority_collateral_account,
            stray_collateral,
        ),
    ];
    for (vault, mint, destination, stray) in vaults {
        if stray > 0 {
            msg!("Sweeping {} from vault {}", stray, vault.key());
            signer.sign(|seeds| {
                transfer_checked(
                    CpiContext::new_with_signer(
                        accounts.token_program.to_account_info(),
                        TransferChecked {
                            from: vault.to_account_info(),
                            mint: mint.to_account_info(),
                            to: destination.to_account_info(),
                            authority: accounts.vault_signer.to_account_info(),
                        },
                        seeds,
                    ),
                    stray,
                    mint.decimals,
                )
            })?;
        }

        msg!("Closing vault {}", vault.key());
        signer.sign(|seeds| {
            close_account(CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                CloseAccount {
                    account: vault.to_account_info(),
                    destination: accounts.authority.to_account_info(),
                    authority: accounts.vault_signer.to_account_info(),
                },
                seeds,
            ))
        })?;
    }

    emit!(LotteryClosed {
        lottery: accounts.lottery.key(),
        authority: accounts.authority.key(),
    });

    Ok(())
}
