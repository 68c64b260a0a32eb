use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::{
    self,
    extension::{transfer_fee::TransferFeeConfig, BaseStateWithExtensions, StateWithExtensions},
    state::Mint as MintState,
};
use std::cmp;

use crate::constants::{
    ACC_REWARD_PRECISION, BPS_DENOMINATOR, MAX_DEPOSIT_FEE_BPS, MAX_ENTRY_FEE_BPS, MAX_POOLS,
};
use crate::error::ErrorCode;
use crate::state::{Entry, Farm, LotteryManager, Pool, PrizePool, UserStake};

/// How a deposit is split between the stake and the fee destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DepositFee {
    pub staked: u64,
    pub routed: u64,
    pub burned: u64,
}

/// `floor(amount * bps / 10_000)`
pub(crate) fn bps_of(amount: u64, bps: u16) -> Result<u64> {
    let value = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    u64::try_from(value).map_err(|_| error!(ErrorCode::MathOverflow))
}

pub(crate) fn split_deposit_fee(amount: u64, fee_bps: u16, burn_bps: u16) -> Result<DepositFee> {
    let fee = bps_of(amount, fee_bps)?;
    let burned = bps_of(fee, burn_bps)?;

    Ok(DepositFee {
        staked: amount - fee,
        routed: fee - burned,
        burned,
    })
}

pub(crate) fn validate_deposit_fee_bps(deposit_fee_bps: u16) -> Result<()> {
    require!(deposit_fee_bps <= MAX_DEPOSIT_FEE_BPS, ErrorCode::InvalidFeeBps);
    Ok(())
}

pub(crate) fn validate_bps(bps: u16) -> Result<()> {
    require!(bps as u64 <= BPS_DENOMINATOR, ErrorCode::InvalidFeeBps);
    Ok(())
}

/// Rejects Token-2022 mints with a transfer fee. The vault would receive less
/// than the amount credited to the stake.
pub(crate) fn validate_stake_mint(mint_owner: &Pubkey, mint_data: &[u8]) -> Result<()> {
    if *mint_owner != spl_token_2022::ID {
        return Ok(());
    }

    let mint = StateWithExtensions::<MintState>::unpack(mint_data)?;
    require!(mint.get_extension::<TransferFeeConfig>().is_err(), ErrorCode::UnsupportedStakeMint);
    Ok(())
}

/// Slots in `(from, to]` that earn rewards. Nothing before `start_block` counts.
pub(crate) fn reward_multiplier(from: u64, to: u64, start_block: u64) -> u64 {
    let from = cmp::max(from, start_block);
    to.saturating_sub(from)
}

fn pool_reward(farm: &Farm, pool: &Pool, current_block: u64) -> Result<u128> {
    if farm.total_alloc_point == 0 || pool.alloc_point == 0 {
        return Ok(0);
    }

    let blocks = reward_multiplier(pool.last_reward_block, current_block, farm.start_block);

    (blocks as u128)
        .checked_mul(farm.reward_per_block as u128)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_mul(pool.alloc_point as u128)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(farm.total_alloc_point as u128)
        .ok_or(error!(ErrorCode::MathOverflow))
}

/// Value `acc_reward_per_share` would have if the pool were updated at
/// `current_block`. Does not touch the pool.
pub(crate) fn projected_acc_reward_per_share(
    farm: &Farm,
    pool: &Pool,
    current_block: u64,
) -> Result<u128> {
    if current_block <= pool.last_reward_block || pool.total_staked == 0 {
        return Ok(pool.acc_reward_per_share);
    }

    let increment = pool_reward(farm, pool, current_block)?
        .checked_mul(ACC_REWARD_PRECISION)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(pool.total_staked as u128)
        .ok_or(ErrorCode::MathOverflow)?;

    pool.acc_reward_per_share
        .checked_add(increment)
        .ok_or(error!(ErrorCode::MathOverflow))
}

/// Brings the pool accumulator up to `current_block`.
///
/// An empty pool still advances `last_reward_block`, so reward emitted
/// while nobody was staked is never credited to a later depositor.
pub(crate) fn update_pool(farm: &Farm, pool: &mut Pool, current_block: u64) -> Result<()> {
    if current_block <= pool.last_reward_block {
        return Ok(());
    }

    pool.acc_reward_per_share = projected_acc_reward_per_share(farm, pool, current_block)?;
    pool.last_reward_block = current_block;

    Ok(())
}

pub(crate) fn reward_debt(amount: u64, acc_reward_per_share: u128) -> Result<u128> {
    (amount as u128)
        .checked_mul(acc_reward_per_share)
        .ok_or(error!(ErrorCode::MathOverflow))
}

pub(crate) fn pending_reward(stake: &UserStake, acc_reward_per_share: u128) -> Result<u64> {
    let pending = reward_debt(stake.amount, acc_reward_per_share)?
        .checked_sub(stake.reward_debt)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(ACC_REWARD_PRECISION)
        .ok_or(ErrorCode::MathOverflow)?;

    u64::try_from(pending).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// Updates the pool and returns the reward owed to `stake`.
/// Callers pay it out and then call `refresh_reward_debt`.
pub(crate) fn settle_stake(
    farm: &Farm,
    pool: &mut Pool,
    stake: &UserStake,
    current_block: u64,
) -> Result<u64> {
    update_pool(farm, pool, current_block)?;
    pending_reward(stake, pool.acc_reward_per_share)
}

pub(crate) fn refresh_reward_debt(pool: &Pool, stake: &mut UserStake) -> Result<()> {
    stake.reward_debt = reward_debt(stake.amount, pool.acc_reward_per_share)?;
    Ok(())
}

pub(crate) fn credit_stake(pool: &mut Pool, stake: &mut UserStake, amount: u64) -> Result<()> {
    stake.amount = stake
        .amount
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    Ok(())
}

pub(crate) fn debit_stake(pool: &mut Pool, stake: &mut UserStake, amount: u64) -> Result<()> {
    require!(amount <= stake.amount, ErrorCode::InsufficientStake);

    stake.amount -= amount;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    Ok(())
}

/// Registers `stake_mint` in a freshly allocated pool account and returns its id.
pub(crate) fn register_pool(
    farm: &mut Farm,
    pool: &mut Pool,
    stake_mint: Pubkey,
    alloc_point: u64,
    deposit_fee_bps: u16,
    current_block: u64,
) -> Result<u64> {
    require!(pool.stake_mint == Pubkey::default(), ErrorCode::DuplicatePool);
    require!(farm.pool_count < MAX_POOLS, ErrorCode::PoolLimitReached);
    validate_deposit_fee_bps(deposit_fee_bps)?;

    let pool_id = farm.pool_count;

    pool.pool_id = pool_id;
    pool.stake_mint = stake_mint;
    pool.alloc_point = alloc_point;
    pool.deposit_fee_bps = deposit_fee_bps;
    pool.last_reward_block = cmp::max(current_block, farm.start_block);
    pool.acc_reward_per_share = 0;
    pool.total_staked = 0;

    farm.total_alloc_point = farm
        .total_alloc_point
        .checked_add(alloc_point)
        .ok_or(ErrorCode::MathOverflow)?;
    farm.pool_count = farm
        .pool_count
        .checked_add(1)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(pool_id)
}

pub(crate) fn reconfigure_pool(
    farm: &mut Farm,
    pool: &mut Pool,
    alloc_point: u64,
    deposit_fee_bps: u16,
) -> Result<()> {
    validate_deposit_fee_bps(deposit_fee_bps)?;

    farm.total_alloc_point = farm
        .total_alloc_point
        .checked_sub(pool.alloc_point)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_add(alloc_point)
        .ok_or(ErrorCode::MathOverflow)?;
    pool.alloc_point = alloc_point;
    pool.deposit_fee_bps = deposit_fee_bps;

    Ok(())
}

pub(crate) fn validate_entry_fee_bps(entry_fee_bps: u16) -> Result<()> {
    require!(entry_fee_bps <= MAX_ENTRY_FEE_BPS, ErrorCode::InvalidFeeBps);
    Ok(())
}

pub(crate) fn open_at(now: i64, open_delay: u64) -> Result<i64> {
    let delay = i64::try_from(open_delay).map_err(|_| error!(ErrorCode::InvalidOpenDelay))?;
    now.checked_add(delay)
        .ok_or(error!(ErrorCode::InvalidOpenDelay))
}

/// Fills a new prize pool record and bumps the manager's pool count.
pub(crate) fn init_prize_pool(
    manager: &mut LotteryManager,
    prize_pool: &mut PrizePool,
    mint: Pubkey,
    funded_amount: u64,
    open_delay: u64,
    now: i64,
) -> Result<u64> {
    require!(funded_amount > 0, ErrorCode::InvalidFunding);
    require_keys_eq!(mint, manager.funding_mint, ErrorCode::FundingMintMismatch);

    let pool_id = manager.pool_count;

    prize_pool.pool_id = pool_id;
    prize_pool.mint = mint;
    prize_pool.funded_amount = funded_amount;
    prize_pool.entry_fee_bps = manager.entry_fee_bps;
    prize_pool.created_at = now;
    prize_pool.open_at = open_at(now, open_delay)?;
    prize_pool.entry_count = 0;
    prize_pool.fees_collected = 0;

    manager.pool_count = manager
        .pool_count
        .checked_add(1)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(pool_id)
}

/// Admits `entrant` into the prize pool and returns the admission fee owed.
pub(crate) fn admit_entrant(
    prize_pool: &mut PrizePool,
    entry: &mut Entry,
    entrant: Pubkey,
    now: i64,
) -> Result<u64> {
    require!(prize_pool.is_open(now), ErrorCode::PoolNotOpen);
    require!(!entry.entered, ErrorCode::AlreadyEntered);

    let fee = bps_of(prize_pool.funded_amount, prize_pool.entry_fee_bps)?;

    prize_pool.entry_count = prize_pool
        .entry_count
        .checked_add(1)
        .ok_or(ErrorCode::MathOverflow)?;
    prize_pool.fees_collected = prize_pool
        .fees_collected
        .checked_add(fee)
        .ok_or(ErrorCode::MathOverflow)?;

    entry.entrant = entrant;
    entry.entered = true;
    entry.entered_at = now;
    entry.fee_paid = fee;

    Ok(fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SEED_POOL;
    use anchor_lang::solana_program::program_pack::Pack;
    use anchor_spl::token_2022::spl_token_2022::extension::{
        BaseStateWithExtensionsMut, ExtensionType, StateWithExtensionsMut,
    };

    const ONE: u64 = 1_000_000_000;

    fn code(error_code: ErrorCode) -> anchor_lang::error::Error {
        error_code.into()
    }

    fn farm(reward_per_block: u64, start_block: u64) -> Farm {
        Farm {
            bump: 255,
            authority: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
            reward_per_block,
            start_block,
            total_alloc_point: 0,
            pool_count: 0,
            fee_recipient: Pubkey::new_unique(),
            burn_bps: 0,
        }
    }

    fn blank_pool() -> Pool {
        Pool {
            bump: 254,
            vault_bump: 253,
            pool_id: 0,
            stake_mint: Pubkey::default(),
            vault: Pubkey::default(),
            alloc_point: 0,
            deposit_fee_bps: 0,
            last_reward_block: 0,
            acc_reward_per_share: 0,
            total_staked: 0,
        }
    }

    fn stake_for(pool: &Pool) -> UserStake {
        let (pool_key, _) =
            Pubkey::find_program_address(&[SEED_POOL, pool.stake_mint.as_ref()], &crate::ID);
        UserStake {
            bump: 252,
            owner: Pubkey::new_unique(),
            pool: pool_key,
            amount: 0,
            reward_debt: 0,
        }
    }

    fn manager(entry_fee_bps: u16) -> LotteryManager {
        LotteryManager {
            bump: 255,
            authority: Pubkey::new_unique(),
            funding_mint: Pubkey::new_unique(),
            fee_sink: Pubkey::new_unique(),
            entry_fee_bps,
            pool_count: 0,
        }
    }

    fn blank_prize_pool() -> PrizePool {
        PrizePool {
            bump: 0,
            vault_bump: 0,
            pool_id: 0,
            mint: Pubkey::default(),
            vault: Pubkey::new_unique(),
            funded_amount: 0,
            entry_fee_bps: 0,
            created_at: 0,
            open_at: 0,
            entry_count: 0,
            fees_collected: 0,
        }
    }

    fn blank_entry() -> Entry {
        Entry {
            bump: 0,
            prize_pool: Pubkey::default(),
            entrant: Pubkey::default(),
            entered: false,
            entered_at: 0,
            fee_paid: 0,
        }
    }

    fn deposit(farm: &Farm, pool: &mut Pool, stake: &mut UserStake, net: u64, slot: u64) -> u64 {
        let paid = settle_stake(farm, pool, stake, slot).unwrap();
        credit_stake(pool, stake, net).unwrap();
        refresh_reward_debt(pool, stake).unwrap();
        paid
    }

    fn harvest(farm: &Farm, pool: &mut Pool, stake: &mut UserStake, slot: u64) -> u64 {
        let paid = settle_stake(farm, pool, stake, slot).unwrap();
        refresh_reward_debt(pool, stake).unwrap();
        paid
    }

    #[test]
    fn deposit_fee_is_floored_and_fully_routed_without_burn() {
        let fee = split_deposit_fee(50, 1_000, 0).unwrap();
        assert_eq!(
            fee,
            DepositFee {
                staked: 45,
                routed: 5,
                burned: 0
            }
        );

        let fee = split_deposit_fee(700 * ONE, 1_000, 0).unwrap();
        assert_eq!(fee.staked, 630 * ONE);
        assert_eq!(fee.routed, 70 * ONE);

        let fee = split_deposit_fee(19, 1_000, 0).unwrap();
        assert_eq!(fee.routed, 1);
        assert_eq!(fee.staked, 18);

        let fee = split_deposit_fee(9, 1_000, 0).unwrap();
        assert_eq!(fee.routed, 0);
        assert_eq!(fee.staked, 9);
    }

    #[test]
    fn burn_share_comes_out_of_the_fee() {
        let fee = split_deposit_fee(1_000, 1_000, 5_000).unwrap();
        assert_eq!(fee.staked, 900);
        assert_eq!(fee.burned, 50);
        assert_eq!(fee.routed, 50);
    }

    #[test]
    fn duplicate_pool_is_rejected() {
        let mut farm = farm(100, 0);
        let mut pool = blank_pool();
        let mint = Pubkey::new_unique();

        register_pool(&mut farm, &mut pool, mint, 100, 1_000, 5).unwrap();
        assert_eq!(farm.pool_count, 1);

        let err = register_pool(&mut farm, &mut pool, mint, 100, 1_000, 6).unwrap_err();
        assert_eq!(err, code(ErrorCode::DuplicatePool));
        assert_eq!(farm.pool_count, 1);
        assert_eq!(farm.total_alloc_point, 100);
    }

    #[test]
    fn deposit_fee_above_cap_is_rejected() {
        let mut farm = farm(100, 0);
        let mut pool = blank_pool();

        let err = register_pool(&mut farm, &mut pool, Pubkey::new_unique(), 100, 1_001, 0)
            .unwrap_err();
        assert_eq!(err, code(ErrorCode::InvalidFeeBps));
        assert_eq!(farm.pool_count, 0);
    }

    #[test]
    fn pool_registry_is_capped() {
        let mut farm = farm(100, 0);
        for _ in 0..MAX_POOLS {
            let mut pool = blank_pool();
            register_pool(&mut farm, &mut pool, Pubkey::new_unique(), 10, 0, 0).unwrap();
        }
        assert_eq!(farm.pool_count, MAX_POOLS);

        let mut pool = blank_pool();
        let err = register_pool(&mut farm, &mut pool, Pubkey::new_unique(), 10, 0, 0).unwrap_err();
        assert_eq!(err, code(ErrorCode::PoolLimitReached));
        assert_eq!(farm.pool_count, MAX_POOLS);
        assert_eq!(farm.total_alloc_point, 10 * MAX_POOLS);
        assert_eq!(pool.stake_mint, Pubkey::default());
    }

    fn token_2022_mint(with_transfer_fee: bool) -> Vec<u8> {
        let base = MintState {
            decimals: 9,
            is_initialized: true,
            ..Default::default()
        };
        if !with_transfer_fee {
            let mut data = vec![0u8; MintState::LEN];
            base.pack_into_slice(&mut data);
            return data;
        }

        let len =
            ExtensionType::try_calculate_account_len::<MintState>(&[ExtensionType::TransferFeeConfig])
                .unwrap();
        let mut data = vec![0u8; len];
        let mut state = StateWithExtensionsMut::<MintState>::unpack_uninitialized(&mut data).unwrap();
        state.init_extension::<TransferFeeConfig>(true).unwrap();
        state.base = base;
        state.pack_base();
        state.init_account_type().unwrap();
        data
    }

    #[test]
    fn legacy_token_mint_is_accepted() {
        let data = token_2022_mint(false);
        validate_stake_mint(&anchor_spl::token::ID, &data).unwrap();
    }

    #[test]
    fn token_2022_mint_without_transfer_fee_is_accepted() {
        let data = token_2022_mint(false);
        validate_stake_mint(&spl_token_2022::ID, &data).unwrap();
    }

    #[test]
    fn transfer_fee_mint_is_rejected() {
        let data = token_2022_mint(true);
        let err = validate_stake_mint(&spl_token_2022::ID, &data).unwrap_err();
        assert_eq!(err, code(ErrorCode::UnsupportedStakeMint));
    }

    #[test]
    fn pool_registered_before_start_waits_for_start_block() {
        let mut farm = farm(100, 1_000);
        let mut pool = blank_pool();
        register_pool(&mut farm, &mut pool, Pubkey::new_unique(), 100, 0, 10).unwrap();
        assert_eq!(pool.last_reward_block, 1_000);

        let mut stake = stake_for(&pool);
        deposit(&farm, &mut pool, &mut stake, 500, 20);

        update_pool(&farm, &mut pool, 900).unwrap();
        assert_eq!(pool.acc_reward_per_share, 0);

        assert_eq!(harvest(&farm, &mut pool, &mut stake, 1_010), 1_000);
    }

    #[test]
    fn multiplier_clamps_to_start_block() {
        assert_eq!(reward_multiplier(0, 50, 100), 0);
        assert_eq!(reward_multiplier(0, 150, 100), 50);
        assert_eq!(reward_multiplier(120, 150, 100), 30);
        assert_eq!(reward_multiplier(150, 150, 100), 0);
    }

    #[test]
    fn accrual_is_idempotent_within_a_slot() {
        let mut farm = farm(100, 0);
        let mut pool = blank_pool();
        register_pool(&mut farm, &mut pool, Pubkey::new_unique(), 100, 0, 0).unwrap();
        let mut stake = stake_for(&pool);
        deposit(&farm, &mut pool, &mut stake, 1_000, 1);

        update_pool(&farm, &mut pool, 11).unwrap();
        let once = pool.acc_reward_per_share;
        update_pool(&farm, &mut pool, 11).unwrap();
        assert_eq!(pool.acc_reward_per_share, once);
        assert_eq!(pool.last_reward_block, 11);

        // an older slot is a no-op too
        update_pool(&farm, &mut pool, 5).unwrap();
        assert_eq!(pool.acc_reward_per_share, once);
        assert_eq!(pool.last_reward_block, 11);
    }

    #[test]
    fn empty_pool_skips_reward_but_advances() {
        let mut farm = farm(100, 0);
        let mut pool = blank_pool();
        register_pool(&mut farm, &mut pool, Pubkey::new_unique(), 100, 0, 0).unwrap();

        update_pool(&farm, &mut pool, 50).unwrap();
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.last_reward_block, 50);

        let mut stake = stake_for(&pool);
        deposit(&farm, &mut pool, &mut stake, 1_000, 50);
        assert_eq!(harvest(&farm, &mut pool, &mut stake, 60), 1_000);
    }

    #[test]
    fn emission_is_split_by_weight() {
        let mut farm = farm(100, 0);
        let mut light = blank_pool();
        let mut heavy = blank_pool();
        register_pool(&mut farm, &mut light, Pubkey::new_unique(), 100, 0, 0).unwrap();
        register_pool(&mut farm, &mut heavy, Pubkey::new_unique(), 300, 0, 0).unwrap();
        assert_eq!(farm.total_alloc_point, 400);
        assert_eq!(heavy.pool_id, 1);

        let mut a = stake_for(&light);
        let mut b = stake_for(&heavy);
        deposit(&farm, &mut light, &mut a, 1_000, 0);
        deposit(&farm, &mut heavy, &mut b, 1_000, 0);

        assert_eq!(harvest(&farm, &mut light, &mut a, 10), 250);
        assert_eq!(harvest(&farm, &mut heavy, &mut b, 10), 750);
    }

    #[test]
    fn pending_matches_harvest_and_resets() {
        let mut farm = farm(7, 0);
        let mut pool = blank_pool();
        register_pool(&mut farm, &mut pool, Pubkey::new_unique(), 100, 0, 0).unwrap();
        let mut stake = stake_for(&pool);
        deposit(&farm, &mut pool, &mut stake, 333, 3);

        let projected = projected_acc_reward_per_share(&farm, &pool, 40).unwrap();
        let pending = pending_reward(&stake, projected).unwrap();
        // projection leaves the pool untouched
        assert_eq!(pool.last_reward_block, 3);

        let paid = harvest(&farm, &mut pool, &mut stake, 40);
        assert_eq!(paid, pending);
        assert!(paid > 0);

        let projected = projected_acc_reward_per_share(&farm, &pool, 40).unwrap();
        assert_eq!(pending_reward(&stake, projected).unwrap(), 0);
    }

    #[test]
    fn rewards_paid_never_exceed_emission() {
        let mut farm = farm(100, 0);
        let mut pool = blank_pool();
        register_pool(&mut farm, &mut pool, Pubkey::new_unique(), 100, 0, 0).unwrap();
        let mut a = stake_for(&pool);
        let mut b = stake_for(&pool);

        let mut paid = 0;
        paid += deposit(&farm, &mut pool, &mut a, 1_000, 10);
        paid += deposit(&farm, &mut pool, &mut b, 3_000, 20);
        paid += harvest(&farm, &mut pool, &mut a, 30);
        paid += harvest(&farm, &mut pool, &mut b, 30);
        assert_eq!(paid, 2_000);

        // uneven stakes leave truncation dust, never excess
        paid += deposit(&farm, &mut pool, &mut a, 7, 31);
        paid += harvest(&farm, &mut pool, &mut a, 44);
        paid += harvest(&farm, &mut pool, &mut b, 44);
        let emitted = 100 * (44 - 10);
        assert!(paid <= emitted);
        assert!(emitted - paid <= 2);
    }

    #[test]
    fn withdraw_beyond_stake_is_rejected() {
        let mut farm = farm(100, 0);
        let mut pool = blank_pool();
        register_pool(&mut farm, &mut pool, Pubkey::new_unique(), 100, 0, 0).unwrap();
        let mut stake = stake_for(&pool);
        deposit(&farm, &mut pool, &mut stake, 45, 0);

        let err = debit_stake(&mut pool, &mut stake, 46).unwrap_err();
        assert_eq!(err, code(ErrorCode::InsufficientStake));
        assert_eq!(stake.amount, 45);
        assert_eq!(pool.total_staked, 45);

        debit_stake(&mut pool, &mut stake, 45).unwrap();
        assert_eq!(stake.amount, 0);
        assert_eq!(pool.total_staked, 0);
    }

    #[test]
    fn reconfigure_keeps_weight_sum() {
        let mut farm = farm(100, 0);
        let mut a = blank_pool();
        let mut b = blank_pool();
        register_pool(&mut farm, &mut a, Pubkey::new_unique(), 100, 0, 0).unwrap();
        register_pool(&mut farm, &mut b, Pubkey::new_unique(), 50, 0, 0).unwrap();

        reconfigure_pool(&mut farm, &mut a, 20, 400).unwrap();
        assert_eq!(farm.total_alloc_point, 70);
        assert_eq!(a.deposit_fee_bps, 400);
    }

    #[test]
    fn zero_funding_creates_nothing() {
        let mut manager = manager(100);
        let mut prize_pool = blank_prize_pool();
        let mint = manager.funding_mint;

        let err = init_prize_pool(&mut manager, &mut prize_pool, mint, 0, 15, 1_000).unwrap_err();
        assert_eq!(err, code(ErrorCode::InvalidFunding));
        assert_eq!(manager.pool_count, 0);
    }

    #[test]
    fn foreign_mint_cannot_fund_a_prize_pool() {
        let mut manager = manager(100);
        let mut prize_pool = blank_prize_pool();

        let err = init_prize_pool(
            &mut manager,
            &mut prize_pool,
            Pubkey::new_unique(),
            70 * ONE,
            15,
            1_000,
        )
        .unwrap_err();
        assert_eq!(err, code(ErrorCode::FundingMintMismatch));
        assert_eq!(manager.pool_count, 0);
    }

    #[test]
    fn open_delay_must_fit_a_timestamp() {
        assert_eq!(open_at(1_000, 15).unwrap(), 1_015);
        assert_eq!(
            open_at(1_000, u64::MAX).unwrap_err(),
            code(ErrorCode::InvalidOpenDelay)
        );
        assert_eq!(
            open_at(i64::MAX, 1).unwrap_err(),
            code(ErrorCode::InvalidOpenDelay)
        );
    }

    #[test]
    fn entry_is_gated_and_charges_one_percent() {
        let mut manager = manager(100);
        let mut prize_pool = blank_prize_pool();
        let mint = manager.funding_mint;

        let id = init_prize_pool(&mut manager, &mut prize_pool, mint, 70 * ONE, 15, 1_000).unwrap();
        assert_eq!(id, 0);
        assert_eq!(manager.pool_count, 1);
        assert_eq!(prize_pool.open_at, 1_015);

        let entrant = Pubkey::new_unique();
        let mut entry = blank_entry();

        let err = admit_entrant(&mut prize_pool, &mut entry, entrant, 1_014).unwrap_err();
        assert_eq!(err, code(ErrorCode::PoolNotOpen));
        assert!(!entry.entered);
        assert_eq!(prize_pool.entry_count, 0);

        let fee = admit_entrant(&mut prize_pool, &mut entry, entrant, 1_015).unwrap();
        assert_eq!(fee, 700_000_000);
        assert_eq!(300 * ONE - fee, 299_300_000_000);
        assert!(entry.entered);
        assert_eq!(entry.entrant, entrant);
        assert_eq!(prize_pool.entry_count, 1);
        assert_eq!(prize_pool.fees_collected, fee);
    }

    #[test]
    fn second_entry_is_rejected() {
        let mut manager = manager(100);
        let mut prize_pool = blank_prize_pool();
        let mint = manager.funding_mint;
        init_prize_pool(&mut manager, &mut prize_pool, mint, 70 * ONE, 0, 0).unwrap();

        let entrant = Pubkey::new_unique();
        let mut entry = blank_entry();
        admit_entrant(&mut prize_pool, &mut entry, entrant, 5).unwrap();

        let err = admit_entrant(&mut prize_pool, &mut entry, entrant, 6).unwrap_err();
        assert_eq!(err, code(ErrorCode::AlreadyEntered));
        assert_eq!(prize_pool.entry_count, 1);
        assert_eq!(prize_pool.fees_collected, 700_000_000);
    }

    #[test]
    fn entry_fee_rate_is_captured_at_creation() {
        let mut manager = manager(100);
        let mut prize_pool = blank_prize_pool();
        let mint = manager.funding_mint;
        init_prize_pool(&mut manager, &mut prize_pool, mint, 1_000, 0, 0).unwrap();

        manager.entry_fee_bps = 5_000;

        let mut entry = blank_entry();
        let fee = admit_entrant(&mut prize_pool, &mut entry, Pubkey::new_unique(), 0).unwrap();
        assert_eq!(fee, 10);
    }
}
