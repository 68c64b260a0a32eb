use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::state::{Farm, LotteryManager, Pool, UserStake};
use crate::utils::{pending_reward, projected_acc_reward_per_share};

#[derive(Accounts)]
pub struct PendingReward<'info> {
    #[account(
        seeds = [SEED_FARM],
        bump = farm.bump,
    )]
    pub farm: Account<'info, Farm>,

    #[account(
        seeds = [SEED_POOL, pool.stake_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [SEED_USER_STAKE, pool.key().as_ref(), user_stake.owner.as_ref()],
        bump = user_stake.bump,
        has_one = pool @ ErrorCode::StakePoolMismatch,
    )]
    pub user_stake: Account<'info, UserStake>,
}

#[derive(Accounts)]
pub struct FarmView<'info> {
    #[account(
        seeds = [SEED_FARM],
        bump = farm.bump,
    )]
    pub farm: Account<'info, Farm>,
}

#[derive(Accounts)]
pub struct ManagerView<'info> {
    #[account(
        seeds = [SEED_MANAGER],
        bump = manager.bump,
    )]
    pub manager: Account<'info, LotteryManager>,
}

/// Reward a harvest in the current slot would pay. Read only.
pub fn process_pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
    let current_block = Clock::get()?.slot;
    let acc_reward_per_share =
        projected_acc_reward_per_share(&ctx.accounts.farm, &ctx.accounts.pool, current_block)?;

    pending_reward(&ctx.accounts.user_stake, acc_reward_per_share)
}

pub fn process_pool_length(ctx: Context<FarmView>) -> Result<u64> {
    Ok(ctx.accounts.farm.pool_count)
}

pub fn process_prize_pool_length(ctx: Context<ManagerView>) -> Result<u64> {
    Ok(ctx.accounts.manager.pool_count)
}
