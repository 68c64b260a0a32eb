use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{EmergencyWithdrawEvent, WithdrawEvent};
use crate::instructions::mint_reward;
use crate::state::{Farm, Pool, UserStake};
use crate::utils::{debit_stake, refresh_reward_debt, settle_stake};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [SEED_FARM],
        bump = farm.bump,
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mint::token_program = token_program,
    )]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [SEED_POOL, stake_mint.key().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [SEED_POOL_VAULT, pool.key().as_ref()],
        bump = pool.vault_bump,
    )]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [SEED_USER_STAKE, pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        has_one = pool @ ErrorCode::StakePoolMismatch,
    )]
    pub user_stake: Box<Account<'info, UserStake>>,

    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = farm.reward_mint @ ErrorCode::InvalidRewardMint,
        mint::token_program = reward_token_program,
    )]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = reward_mint,
        associated_token::authority = user,
        associated_token::token_program = reward_token_program,
    )]
    pub user_reward_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub reward_token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Accounts for leaving a pool without settling reward.
#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    pub user: Signer<'info>,

    #[account(
        mint::token_program = token_program,
    )]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [SEED_POOL, stake_mint.key().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [SEED_POOL_VAULT, pool.key().as_ref()],
        bump = pool.vault_bump,
    )]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [SEED_USER_STAKE, pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        has_one = pool @ ErrorCode::StakePoolMismatch,
    )]
    pub user_stake: Box<Account<'info, UserStake>>,

    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Unstakes `amount` after paying out pending reward. No fee is charged.
/// A zero `amount` only harvests.
pub fn process_withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let current_block = Clock::get()?.slot;

    let pending = settle_stake(
        &ctx.accounts.farm,
        &mut ctx.accounts.pool,
        &ctx.accounts.user_stake,
        current_block,
    )?;

    debit_stake(
        &mut ctx.accounts.pool,
        &mut ctx.accounts.user_stake,
        amount,
    )?;
    refresh_reward_debt(&ctx.accounts.pool, &mut ctx.accounts.user_stake)?;

    if pending > 0 {
        mint_reward(
            &ctx.accounts.reward_token_program,
            &ctx.accounts.reward_mint,
            &ctx.accounts.user_reward_account,
            &ctx.accounts.farm,
            pending,
        )?;
        msg!("Paid {} pending reward", pending);
    }

    if amount > 0 {
        release_stake(
            &ctx.accounts.token_program,
            &ctx.accounts.stake_mint,
            &ctx.accounts.pool_vault,
            &ctx.accounts.user_token_account,
            &ctx.accounts.pool,
            amount,
        )?;
    }

    msg!("Withdrew {} from pool {}", amount, ctx.accounts.pool.pool_id);

    emit!(WithdrawEvent {
        user: ctx.accounts.user.key(),
        pool_id: ctx.accounts.pool.pool_id,
        amount,
        slot: current_block,
    });

    Ok(())
}

/// Returns the whole stake and forfeits any pending reward.
pub fn process_emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
    let amount = ctx.accounts.user_stake.amount;

    debit_stake(
        &mut ctx.accounts.pool,
        &mut ctx.accounts.user_stake,
        amount,
    )?;
    ctx.accounts.user_stake.reward_debt = 0;

    if amount > 0 {
        release_stake(
            &ctx.accounts.token_program,
            &ctx.accounts.stake_mint,
            &ctx.accounts.pool_vault,
            &ctx.accounts.user_token_account,
            &ctx.accounts.pool,
            amount,
        )?;
    }

    msg!(
        "Emergency withdrew {} from pool {}",
        amount,
        ctx.accounts.pool.pool_id
    );

    emit!(EmergencyWithdrawEvent {
        user: ctx.accounts.user.key(),
        pool_id: ctx.accounts.pool.pool_id,
        amount,
    });

    Ok(())
}

/// Moves `amount` from the pool vault back to the staker, signed by the pool PDA.
fn release_stake<'info>(
    token_program: &Interface<'info, TokenInterface>,
    stake_mint: &InterfaceAccount<'info, Mint>,
    pool_vault: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    pool: &Account<'info, Pool>,
    amount: u64,
) -> Result<()> {
    let signer_seeds: &[&[&[u8]]] = &[&[SEED_POOL, pool.stake_mint.as_ref(), &[pool.bump]]];

    transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: pool_vault.to_account_info(),
                mint: stake_mint.to_account_info(),
                to: to.to_account_info(),
                authority: pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        stake_mint.decimals,
    )
}
