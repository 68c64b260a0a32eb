use anchor_lang::prelude::*;

/// Engine-wide configuration of the reward farm.
#[account]
#[derive(InitSpace)]
pub struct Farm {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Admin allowed to register pools and change emission settings.
    pub authority: Pubkey,

    /// Mint of the reward token. The farm PDA holds its mint authority.
    pub reward_mint: Pubkey,

    /// Reward tokens emitted per slot across all pools.
    pub reward_per_block: u64,

    /// First slot at which rewards accrue.
    pub start_block: u64,

    /// Sum of `alloc_point` over every registered pool.
    pub total_alloc_point: u64,

    /// Number of registered pools. Also the next `pool_id`.
    pub pool_count: u64,

    /// Owner whose associated token accounts receive deposit fees.
    /// Normally the lottery manager PDA, so fees fund the treasury.
    pub fee_recipient: Pubkey,

    /// Share of each deposit fee, in basis points, that is burned
    /// instead of routed to `fee_recipient`.
    pub burn_bps: u16,
}

/// A registered staking asset.
#[account]
#[derive(InitSpace)]
pub struct Pool {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Bump of the vault token account PDA.
    pub vault_bump: u8,

    /// Index of the pool in registration order.
    pub pool_id: u64,

    /// Mint accepted for deposits. `Pubkey::default()` until registered.
    pub stake_mint: Pubkey,

    /// Token account holding the staked balance.
    pub vault: Pubkey,

    /// Weight of this pool in the global emission.
    pub alloc_point: u64,

    /// Fee charged on deposits, in basis points.
    pub deposit_fee_bps: u16,

    /// Last slot at which `acc_reward_per_share` was brought up to date.
    pub last_reward_block: u64,

    /// Reward per staked unit, scaled by `ACC_REWARD_PRECISION`.
    /// Never decreases.
    pub acc_reward_per_share: u128,

    /// Sum of all user stakes in this pool.
    pub total_staked: u64,
}

/// A user's position in one pool.
#[account]
#[derive(InitSpace)]
pub struct UserStake {
    pub bump: u8,
    pub owner: Pubkey,
    pub pool: Pubkey,

    /// Staked balance, net of deposit fees.
    pub amount: u64,

    /// `amount * acc_reward_per_share` at the last settlement.
    pub reward_debt: u128,
}

/// Configuration of the prize pool manager.
#[account]
#[derive(InitSpace)]
pub struct LotteryManager {
    pub bump: u8,
    pub authority: Pubkey,

    /// Mint prize pools are funded in. The treasury is the manager's
    /// associated token account for this mint.
    pub funding_mint: Pubkey,

    /// Owner whose associated token account receives admission fees.
    pub fee_sink: Pubkey,

    /// Admission fee as a share of the funded amount, in basis points.
    pub entry_fee_bps: u16,

    /// Number of prize pools created. Also the next `pool_id`.
    pub pool_count: u64,
}

#[account]
#[derive(InitSpace)]
pub struct PrizePool {
    pub bump: u8,
    pub vault_bump: u8,
    pub pool_id: u64,
    pub mint: Pubkey,
    pub vault: Pubkey,

    /// Amount moved in from the treasury at creation. Never changes.
    pub funded_amount: u64,

    /// Admission fee rate captured from the manager at creation.
    pub entry_fee_bps: u16,

    pub created_at: i64,

    /// UNIX timestamp from which `enter` is accepted.
    pub open_at: i64,

    pub entry_count: u64,
    pub fees_collected: u64,
}

impl PrizePool {
    pub fn is_open(&self, now: i64) -> bool {
        now >= self.open_at
    }
}

/// Admission record of one entrant in one prize pool.
#[account]
#[derive(InitSpace)]
pub struct Entry {
    pub bump: u8,
    pub prize_pool: Pubkey,
    pub entrant: Pubkey,
    pub entered: bool,
    pub entered_at: i64,
    pub fee_paid: u64,
}
