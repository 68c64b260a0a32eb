use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{mint_to, Mint, MintTo, TokenAccount, TokenInterface},
};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::HarvestEvent;
use crate::state::{Farm, Pool, UserStake};
use crate::utils::{refresh_reward_debt, settle_stake};

#[derive(Accounts)]
pub struct Harvest<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [SEED_FARM],
        bump = farm.bump,
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mut,
        seeds = [SEED_POOL, pool.stake_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [SEED_USER_STAKE, pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        has_one = pool @ ErrorCode::StakePoolMismatch,
    )]
    pub user_stake: Box<Account<'info, UserStake>>,

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

    pub reward_token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Pays out pending reward without touching the stake.
pub fn process_harvest(ctx: Context<Harvest>) -> Result<()> {
    let current_block = Clock::get()?.slot;

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
    }

    refresh_reward_debt(&ctx.accounts.pool, &mut ctx.accounts.user_stake)?;

    msg!("Harvested {} from pool {}", pending, ctx.accounts.pool.pool_id);

    emit!(HarvestEvent {
        user: ctx.accounts.user.key(),
        pool_id: ctx.accounts.pool.pool_id,
        reward_amount: pending,
        slot: current_block,
    });

    Ok(())
}

/// Mints `amount` reward tokens to `to`, signed by the farm PDA.
pub(crate) fn mint_reward<'info>(
    reward_token_program: &Interface<'info, TokenInterface>,
    reward_mint: &InterfaceAccount<'info, Mint>,
    to: &InterfaceAccount<'info, TokenAccount>,
    farm: &Account<'info, Farm>,
    amount: u64,
) -> Result<()> {
    let signer_seeds: &[&[&[u8]]] = &[&[SEED_FARM, &[farm.bump]]];

    mint_to(
        CpiContext::new_with_signer(
            reward_token_program.to_account_info(),
            MintTo {
                mint: reward_mint.to_account_info(),
                to: to.to_account_info(),
                authority: farm.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
}
