use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::instruction::AuthorityType;
use anchor_spl::token_interface::{
    set_authority, Mint, SetAuthority, TokenAccount, TokenInterface,
};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{
    EmissionRateUpdatedEvent, FarmConfigUpdatedEvent, FarmInitializedEvent, PoolAddedEvent,
    PoolSetEvent,
};
use crate::instructions::update_all_pools;
use crate::state::{Farm, Pool};
use crate::utils::{
    reconfigure_pool, register_pool, update_pool, validate_bps, validate_stake_mint,
};

/// Accounts required to initialize the farm.
/// The signer must currently hold the reward mint authority; it is handed
/// to the farm PDA so rewards can only be minted by the program.
#[derive(Accounts)]
pub struct InitializeFarm<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The Farm state account that stores emission settings.
    #[account(
        init,
        payer = authority,
        space = 8 + Farm::INIT_SPACE,
        seeds = [SEED_FARM],
        bump
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mut,
        mint::token_program = reward_token_program,
    )]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: Only used as an owner address. Fee token accounts are derived
    /// from it per stake mint.
    pub fee_recipient: UncheckedAccount<'info>,

    pub reward_token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to register a new staking pool.
#[derive(Accounts)]
pub struct AddPool<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_FARM],
        bump = farm.bump,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mint::token_program = token_program,
    )]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    /// One pool per stake mint. An already registered pool is detected in
    /// the handler and rejected.
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + Pool::INIT_SPACE,
        seeds = [SEED_POOL, stake_mint.key().as_ref()],
        bump
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        init_if_needed,
        payer = authority,
        seeds = [SEED_POOL_VAULT, pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool,
        token::token_program = token_program,
    )]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetPool<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_FARM],
        bump = farm.bump,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mut,
        seeds = [SEED_POOL, pool.stake_mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,
}

/// Every registered pool must follow as writable remaining accounts.
#[derive(Accounts)]
pub struct UpdateEmissionRate<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_FARM],
        bump = farm.bump,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub farm: Box<Account<'info, Farm>>,
}

#[derive(Accounts)]
pub struct UpdateFarmConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_FARM],
        bump = farm.bump,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub farm: Box<Account<'info, Farm>>,
}

/// Initializes the farm and takes over the reward mint authority.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeFarm accounts
/// * `reward_per_block` - Reward tokens emitted per slot across all pools
/// * `start_block` - First slot that earns rewards
/// * `burn_bps` - Share of every deposit fee that is burned
pub fn process_initialize_farm(
    ctx: Context<InitializeFarm>,
    reward_per_block: u64,
    start_block: u64,
    burn_bps: u16,
) -> Result<()> {
    validate_bps(burn_bps)?;

    let farm = &mut ctx.accounts.farm;
    farm.bump = ctx.bumps.farm;
    farm.authority = ctx.accounts.authority.key();
    farm.reward_mint = ctx.accounts.reward_mint.key();
    farm.reward_per_block = reward_per_block;
    farm.start_block = start_block;
    farm.total_alloc_point = 0;
    farm.pool_count = 0;
    farm.fee_recipient = ctx.accounts.fee_recipient.key();
    farm.burn_bps = burn_bps;

    msg!("Handing reward mint authority to the farm");
    set_authority(
        CpiContext::new(
            ctx.accounts.reward_token_program.to_account_info(),
            SetAuthority {
                current_authority: ctx.accounts.authority.to_account_info(),
                account_or_mint: ctx.accounts.reward_mint.to_account_info(),
            },
        ),
        AuthorityType::MintTokens,
        Some(ctx.accounts.farm.key()),
    )?;

    emit!(FarmInitializedEvent {
        farm: ctx.accounts.farm.key(),
        authority: ctx.accounts.authority.key(),
        reward_mint: ctx.accounts.reward_mint.key(),
        fee_recipient: ctx.accounts.fee_recipient.key(),
        reward_per_block,
        start_block,
        burn_bps,
    });

    Ok(())
}

/// Registers a staking pool for `stake_mint`.
///
/// With `with_update`, every existing pool is passed as a remaining account
/// and brought up to date before the total weight changes.
pub fn process_add_pool<'info>(
    ctx: Context<'_, '_, '_, 'info, AddPool<'info>>,
    alloc_point: u64,
    deposit_fee_bps: u16,
    with_update: bool,
) -> Result<()> {
    let current_block = Clock::get()?.slot;

    {
        let stake_mint_info = ctx.accounts.stake_mint.to_account_info();
        let stake_mint_data = stake_mint_info.try_borrow_data()?;
        validate_stake_mint(stake_mint_info.owner, &stake_mint_data)?;
    }

    if with_update {
        update_all_pools(&ctx.accounts.farm, ctx.remaining_accounts, current_block, None)?;
    }

    let pool_id = register_pool(
        &mut ctx.accounts.farm,
        &mut ctx.accounts.pool,
        ctx.accounts.stake_mint.key(),
        alloc_point,
        deposit_fee_bps,
        current_block,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.pool_vault;
    pool.vault = ctx.accounts.pool_vault.key();

    msg!("Pool {} added with weight {}", pool_id, alloc_point);
    msg!("Total weight: {}", ctx.accounts.farm.total_alloc_point);

    emit!(PoolAddedEvent {
        pool: ctx.accounts.pool.key(),
        pool_id,
        stake_mint: ctx.accounts.stake_mint.key(),
        alloc_point,
        deposit_fee_bps,
    });

    Ok(())
}

/// Changes a pool's weight and deposit fee. The pool itself is always
/// brought up to date first; `with_update` also updates every other pool.
pub fn process_set_pool<'info>(
    ctx: Context<'_, '_, '_, 'info, SetPool<'info>>,
    alloc_point: u64,
    deposit_fee_bps: u16,
    with_update: bool,
) -> Result<()> {
    let current_block = Clock::get()?.slot;

    if with_update {
        update_all_pools(
            &ctx.accounts.farm,
            ctx.remaining_accounts,
            current_block,
            Some(ctx.accounts.pool.key()),
        )?;
    }

    update_pool(&ctx.accounts.farm, &mut ctx.accounts.pool, current_block)?;
    reconfigure_pool(
        &mut ctx.accounts.farm,
        &mut ctx.accounts.pool,
        alloc_point,
        deposit_fee_bps,
    )?;

    msg!(
        "Pool {} set to weight {}, deposit fee {} bps",
        ctx.accounts.pool.pool_id,
        alloc_point,
        deposit_fee_bps
    );
    msg!("Total weight: {}", ctx.accounts.farm.total_alloc_point);

    emit!(PoolSetEvent {
        pool: ctx.accounts.pool.key(),
        pool_id: ctx.accounts.pool.pool_id,
        alloc_point,
        deposit_fee_bps,
        total_alloc_point: ctx.accounts.farm.total_alloc_point,
    });

    Ok(())
}

/// Changes the global emission. All pools are settled at the old rate first,
/// otherwise the new rate would apply retroactively.
pub fn process_update_emission_rate<'info>(
    ctx: Context<'_, '_, '_, 'info, UpdateEmissionRate<'info>>,
    reward_per_block: u64,
) -> Result<()> {
    let current_block = Clock::get()?.slot;

    update_all_pools(&ctx.accounts.farm, ctx.remaining_accounts, current_block, None)?;

    let farm = &mut ctx.accounts.farm;
    let previous_reward_per_block = farm.reward_per_block;
    farm.reward_per_block = reward_per_block;

    msg!(
        "Emission rate {} -> {} at slot {}",
        previous_reward_per_block,
        reward_per_block,
        current_block
    );

    emit!(EmissionRateUpdatedEvent {
        previous_reward_per_block,
        reward_per_block,
        slot: current_block,
    });

    Ok(())
}

pub fn process_update_farm_config(
    ctx: Context<UpdateFarmConfig>,
    new_authority: Option<Pubkey>,
    new_fee_recipient: Option<Pubkey>,
    new_burn_bps: Option<u16>,
) -> Result<()> {
    let farm = &mut ctx.accounts.farm;

    if let Some(authority) = new_authority {
        farm.authority = authority;
    }

    if let Some(fee_recipient) = new_fee_recipient {
        farm.fee_recipient = fee_recipient;
    }

    if let Some(burn_bps) = new_burn_bps {
        validate_bps(burn_bps)?;
        farm.burn_bps = burn_bps;
    }

    emit!(FarmConfigUpdatedEvent {
        authority: new_authority,
        fee_recipient: new_fee_recipient,
        burn_bps: new_burn_bps,
    });

    msg!("Farm config updated");

    Ok(())
}
