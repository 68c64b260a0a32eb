use anchor_lang::prelude::*;

#[event]
pub struct FarmInitializedEvent {
    pub farm: Pubkey,
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
    pub fee_recipient: Pubkey,
    pub reward_per_block: u64,
    pub start_block: u64,
    pub burn_bps: u16,
}

#[event]
pub struct PoolAddedEvent {
    pub pool: Pubkey,
    pub pool_id: u64,
    pub stake_mint: Pubkey,
    pub alloc_point: u64,
    pub deposit_fee_bps: u16,
}

#[event]
pub struct PoolSetEvent {
    pub pool: Pubkey,
    pub pool_id: u64,
    pub alloc_point: u64,
    pub deposit_fee_bps: u16,
    pub total_alloc_point: u64,
}

#[event]
pub struct EmissionRateUpdatedEvent {
    pub previous_reward_per_block: u64,
    pub reward_per_block: u64,
    pub slot: u64,
}

#[event]
pub struct FarmConfigUpdatedEvent {
    pub authority: Option<Pubkey>,
    pub fee_recipient: Option<Pubkey>,
    pub burn_bps: Option<u16>,
}

#[event]
pub struct DepositEvent {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
    pub staked: u64,
    pub fee: u64,
    pub burned: u64,
    pub slot: u64,
}

#[event]
pub struct WithdrawEvent {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
    pub slot: u64,
}

#[event]
pub struct HarvestEvent {
    pub user: Pubkey,
    pub pool_id: u64,
    pub reward_amount: u64,
    pub slot: u64,
}

#[event]
pub struct EmergencyWithdrawEvent {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
}

#[event]
pub struct ManagerInitializedEvent {
    pub manager: Pubkey,
    pub authority: Pubkey,
    pub funding_mint: Pubkey,
    pub treasury: Pubkey,
    pub entry_fee_bps: u16,
}

#[event]
pub struct ManagerConfigUpdatedEvent {
    pub authority: Option<Pubkey>,
    pub funding_mint: Option<Pubkey>,
    pub fee_sink: Option<Pubkey>,
    pub entry_fee_bps: Option<u16>,
}

#[event]
pub struct PrizePoolCreatedEvent {
    pub prize_pool: Pubkey,
    pub pool_id: u64,
    pub mint: Pubkey,
    pub funded_amount: u64,
    pub open_at: i64,
}

#[event]
pub struct EnteredEvent {
    pub prize_pool: Pubkey,
    pub pool_id: u64,
    pub user: Pubkey,
    pub fee_paid: u64,
    pub timestamp: i64,
}
