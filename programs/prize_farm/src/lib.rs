#![allow(clippy::result_large_err)]
#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;

mod constants;
mod error;
mod events;
mod instructions;
mod state;
mod utils;

declare_id!("7pTrY3VrPjV9nvYRqhuXAnmPnMgmjfaFW3Zc79qMjvKr");

#[program]
pub mod prize_farm {
    use super::*;

    // --- FARM ADMIN ---
    pub fn initialize_farm(
        ctx: Context<InitializeFarm>,
        reward_per_block: u64,
        start_block: u64,
        burn_bps: u16,
    ) -> Result<()> {
        process_initialize_farm(ctx, reward_per_block, start_block, burn_bps)
    }

    pub fn add_pool<'info>(
        ctx: Context<'_, '_, '_, 'info, AddPool<'info>>,
        alloc_point: u64,
        deposit_fee_bps: u16,
        with_update: bool,
    ) -> Result<()> {
        process_add_pool(ctx, alloc_point, deposit_fee_bps, with_update)
    }

    pub fn set_pool<'info>(
        ctx: Context<'_, '_, '_, 'info, SetPool<'info>>,
        alloc_point: u64,
        deposit_fee_bps: u16,
        with_update: bool,
    ) -> Result<()> {
        process_set_pool(ctx, alloc_point, deposit_fee_bps, with_update)
    }

    pub fn update_emission_rate<'info>(
        ctx: Context<'_, '_, '_, 'info, UpdateEmissionRate<'info>>,
        reward_per_block: u64,
    ) -> Result<()> {
        process_update_emission_rate(ctx, reward_per_block)
    }

    pub fn update_farm_config(
        ctx: Context<UpdateFarmConfig>,
        new_authority: Option<Pubkey>,
        new_fee_recipient: Option<Pubkey>,
        new_burn_bps: Option<u16>,
    ) -> Result<()> {
        process_update_farm_config(ctx, new_authority, new_fee_recipient, new_burn_bps)
    }

    // --- ACCRUAL ---
    pub fn update_pool(ctx: Context<UpdatePool>) -> Result<()> {
        process_update_pool(ctx)
    }

    pub fn mass_update_pools<'info>(
        ctx: Context<'_, '_, '_, 'info, MassUpdatePools<'info>>,
    ) -> Result<()> {
        process_mass_update_pools(ctx)
    }

    // --- STAKING ---
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        process_deposit(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        process_withdraw(ctx, amount)
    }

    pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
        process_harvest(ctx)
    }

    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
        process_emergency_withdraw(ctx)
    }

    pub fn pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
        process_pending_reward(ctx)
    }

    pub fn pool_length(ctx: Context<FarmView>) -> Result<u64> {
        process_pool_length(ctx)
    }

    // --- PRIZE POOLS ---
    pub fn initialize_manager(
        ctx: Context<InitializeManager>,
        entry_fee_bps: Option<u16>,
    ) -> Result<()> {
        process_initialize_manager(ctx, entry_fee_bps)
    }

    pub fn set_funding_mint(ctx: Context<SetFundingMint>) -> Result<()> {
        process_set_funding_mint(ctx)
    }

    pub fn update_manager_config(
        ctx: Context<UpdateManagerConfig>,
        new_authority: Option<Pubkey>,
        new_fee_sink: Option<Pubkey>,
        new_entry_fee_bps: Option<u16>,
    ) -> Result<()> {
        process_update_manager_config(ctx, new_authority, new_fee_sink, new_entry_fee_bps)
    }

    pub fn create_prize_pool(
        ctx: Context<CreatePrizePool>,
        funded_amount: u64,
        open_delay: u64,
    ) -> Result<()> {
        process_create_prize_pool(ctx, funded_amount, open_delay)
    }

    pub fn enter(ctx: Context<Enter>) -> Result<()> {
        process_enter(ctx)
    }

    pub fn prize_pool_length(ctx: Context<ManagerView>) -> Result<u64> {
        process_prize_pool_length(ctx)
    }
}
