use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::state::{Farm, Pool};
use crate::utils::update_pool;

/// Permissionless accrual update of a single pool.
#[derive(Accounts)]
pub struct UpdatePool<'info> {
    #[account(
        seeds = [SEED_FARM],
        bump = farm.bump,
    )]
    pub farm: Account<'info, Farm>,

    #[account(
        mut,
        seeds = [SEED_POOL, pool.stake_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

/// Every registered pool must follow as writable remaining accounts.
#[derive(Accounts)]
pub struct MassUpdatePools<'info> {
    #[account(
        seeds = [SEED_FARM],
        bump = farm.bump,
    )]
    pub farm: Account<'info, Farm>,
}

pub fn process_update_pool(ctx: Context<UpdatePool>) -> Result<()> {
    let current_block = Clock::get()?.slot;
    update_pool(&ctx.accounts.farm, &mut ctx.accounts.pool, current_block)?;

    msg!(
        "Pool {} acc_reward_per_share: {}",
        ctx.accounts.pool.pool_id,
        ctx.accounts.pool.acc_reward_per_share
    );

    Ok(())
}

pub fn process_mass_update_pools<'info>(
    ctx: Context<'_, '_, '_, 'info, MassUpdatePools<'info>>,
) -> Result<()> {
    let current_block = Clock::get()?.slot;
    update_all_pools(&ctx.accounts.farm, ctx.remaining_accounts, current_block, None)
}

/// Brings every registered pool up to `current_block`.
///
/// `pool_infos` must hold each pool exactly once, except `exclude`, which the
/// caller already holds as a typed account and updates itself.
pub(crate) fn update_all_pools(
    farm: &Farm,
    pool_infos: &[AccountInfo],
    current_block: u64,
    exclude: Option<Pubkey>,
) -> Result<()> {
    let expected = farm
        .pool_count
        .checked_sub(exclude.is_some() as u64)
        .ok_or(ErrorCode::MathOverflow)?;
    require!(pool_infos.len() as u64 == expected, ErrorCode::IncompletePoolSet);

    let mut seen: Vec<u64> = Vec::with_capacity(pool_infos.len());

    for pool_info in pool_infos {
        require!(
            pool_info.owner == &crate::ID && pool_info.is_writable,
            ErrorCode::InvalidPoolAccount
        );
        require!(Some(pool_info.key()) != exclude, ErrorCode::InvalidPoolAccount);

        let mut pool_data = pool_info.try_borrow_mut_data()?;
        let mut pool = Pool::try_deserialize(&mut &pool_data[..])?;

        // a pool being registered in this transaction has no mint yet
        require!(pool.stake_mint != Pubkey::default(), ErrorCode::InvalidPoolAccount);
        require!(!seen.contains(&pool.pool_id), ErrorCode::IncompletePoolSet);
        seen.push(pool.pool_id);

        update_pool(farm, &mut pool, current_block)?;

        let mut writer: &mut [u8] = &mut pool_data[..];
        pool.try_serialize(&mut writer)?;
    }

    msg!("Updated {} pools at slot {}", pool_infos.len(), current_block);

    Ok(())
}
