use anchor_lang::prelude::*;

// Farm side. Pool-scoped seeds are always followed by the pool key.
#[constant]
pub const SEED_FARM: &[u8] = b"farm";
#[constant]
pub const SEED_POOL: &[u8] = b"pool";
#[constant]
pub const SEED_POOL_VAULT: &[u8] = b"pool_vault";
#[constant]
pub const SEED_USER_STAKE: &[u8] = b"user_stake";

// Prize pool side.
#[constant]
pub const SEED_MANAGER: &[u8] = b"manager";
#[constant]
pub const SEED_PRIZE_POOL: &[u8] = b"prize_pool";
#[constant]
pub const SEED_PRIZE_VAULT: &[u8] = b"prize_vault";
#[constant]
pub const SEED_ENTRY: &[u8] = b"entry";

/// Fixed-point scale of `Pool::acc_reward_per_share`.
pub const ACC_REWARD_PRECISION: u128 = 1_000_000_000_000;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Upper bound on registered staking pools. A mass update passes every pool
/// as a writable account, so this must stay within a transaction's account limit.
pub const MAX_POOLS: u64 = 24;

/// Deposit fee cap (10%).
pub const MAX_DEPOSIT_FEE_BPS: u16 = 1_000;

/// Admission fee charged when a manager is created without an override (1%).
pub const DEFAULT_ENTRY_FEE_BPS: u16 = 100;

pub const MAX_ENTRY_FEE_BPS: u16 = 10_000;
