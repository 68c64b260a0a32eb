use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        burn, transfer_checked, Burn, Mint, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::DepositEvent;
use crate::instructions::mint_reward;
use crate::state::{Farm, Pool, UserStake};
use crate::utils::{credit_stake, refresh_reward_debt, settle_stake, split_deposit_fee};

/// Accounts required to stake into a pool.
/// Handles:
/// - Reward settlement
/// - Stake transfer into the pool vault
/// - Deposit fee routing and burn
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// The depositor. Pays for any account created on first deposit.
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [SEED_FARM],
        bump = farm.bump,
    )]
    pub farm: Box<Account<'info, Farm>>,

    /// Mutable so the burned share of the fee can reduce its supply.
    #[account(
        mut,
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
        init_if_needed,
        payer = user,
        space = 8 + UserStake::INIT_SPACE,
        seeds = [SEED_USER_STAKE, pool.key().as_ref(), user.key().as_ref()],
        bump,
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

    /// CHECK: Pinned to the farm config; only used as the fee account owner.
    #[account(address = farm.fee_recipient @ ErrorCode::InvalidFeeRecipient)]
    pub fee_recipient: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = stake_mint,
        associated_token::authority = fee_recipient,
        associated_token::token_program = token_program,
    )]
    pub fee_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub reward_token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Stakes `amount` of the pool's mint.
///
/// Steps performed:
/// 1. Bring the pool up to date and pay out pending reward.
/// 2. Move `amount - fee` into the pool vault.
/// 3. Route the fee to the fee recipient, burning the configured share.
/// 4. Credit the net amount and refresh the reward debt.
///
/// A zero `amount` only harvests.
pub fn process_deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let current_block = Clock::get()?.slot;

    let user_stake = &mut ctx.accounts.user_stake;
    if user_stake.owner == Pubkey::default() {
        user_stake.bump = ctx.bumps.user_stake;
        user_stake.owner = ctx.accounts.user.key();
        user_stake.pool = ctx.accounts.pool.key();
        user_stake.amount = 0;
        user_stake.reward_debt = 0;
    }

    let pending = settle_stake(
        &ctx.accounts.farm,
        &mut ctx.accounts.pool,
        &ctx.accounts.user_stake,
        current_block,
    )?;

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

    let fee = split_deposit_fee(
        amount,
        ctx.accounts.pool.deposit_fee_bps,
        ctx.accounts.farm.burn_bps,
    )?;

    if amount > 0 {
        require!(ctx.accounts.user_token_account.amount >= amount, ErrorCode::TransferFailed);

        let decimals = ctx.accounts.stake_mint.decimals;

        transfer_checked(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.user_token_account.to_account_info(),
                    mint: ctx.accounts.stake_mint.to_account_info(),
                    to: ctx.accounts.pool_vault.to_account_info(),
                    authority: ctx.accounts.user.to_account_info(),
                },
            ),
            fee.staked,
            decimals,
        )?;

        if fee.routed > 0 {
            transfer_checked(
                CpiContext::new(
                    ctx.accounts.token_program.to_account_info(),
                    TransferChecked {
                        from: ctx.accounts.user_token_account.to_account_info(),
                        mint: ctx.accounts.stake_mint.to_account_info(),
                        to: ctx.accounts.fee_account.to_account_info(),
                        authority: ctx.accounts.user.to_account_info(),
                    },
                ),
                fee.routed,
                decimals,
            )?;
        }

        if fee.burned > 0 {
            burn(
                CpiContext::new(
                    ctx.accounts.token_program.to_account_info(),
                    Burn {
                        mint: ctx.accounts.stake_mint.to_account_info(),
                        from: ctx.accounts.user_token_account.to_account_info(),
                        authority: ctx.accounts.user.to_account_info(),
                    },
                ),
                fee.burned,
            )?;
        }

        credit_stake(
            &mut ctx.accounts.pool,
            &mut ctx.accounts.user_stake,
            fee.staked,
        )?;

        msg!(
            "Staked {} (fee {}, burned {})",
            fee.staked,
            fee.routed,
            fee.burned
        );
    }

    refresh_reward_debt(&ctx.accounts.pool, &mut ctx.accounts.user_stake)?;

    emit!(DepositEvent {
        user: ctx.accounts.user.key(),
        pool_id: ctx.accounts.pool.pool_id,
        amount,
        staked: fee.staked,
        fee: fee.routed,
        burned: fee.burned,
        slot: current_block,
    });

    Ok(())
}
