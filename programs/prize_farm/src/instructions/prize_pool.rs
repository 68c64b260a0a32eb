use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{EnteredEvent, PrizePoolCreatedEvent};
use crate::state::{Entry, LotteryManager, PrizePool};
use crate::utils::{admit_entrant, init_prize_pool};

/// Accounts required to create a prize pool funded from the treasury.
#[derive(Accounts)]
pub struct CreatePrizePool<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_MANAGER],
        bump = manager.bump,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub manager: Box<Account<'info, LotteryManager>>,

    #[account(
        address = manager.funding_mint @ ErrorCode::FundingMintMismatch,
        mint::token_program = token_program,
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = manager,
        associated_token::token_program = token_program,
    )]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Prize pools are indexed by creation order.
    #[account(
        init,
        payer = authority,
        space = 8 + PrizePool::INIT_SPACE,
        seeds = [SEED_PRIZE_POOL, manager.pool_count.to_le_bytes().as_ref()],
        bump
    )]
    pub prize_pool: Box<Account<'info, PrizePool>>,

    #[account(
        init,
        payer = authority,
        seeds = [SEED_PRIZE_VAULT, prize_pool.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = prize_pool,
        token::token_program = token_program,
    )]
    pub prize_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Accounts required to enter a prize pool.
#[derive(Accounts)]
pub struct Enter<'info> {
    /// The entrant, paying the admission fee.
    #[account(mut)]
    pub entrant: Signer<'info>,

    #[account(
        seeds = [SEED_MANAGER],
        bump = manager.bump,
    )]
    pub manager: Box<Account<'info, LotteryManager>>,

    #[account(
        mut,
        seeds = [SEED_PRIZE_POOL, prize_pool.pool_id.to_le_bytes().as_ref()],
        bump = prize_pool.bump,
    )]
    pub prize_pool: Box<Account<'info, PrizePool>>,

    #[account(
        address = prize_pool.mint @ ErrorCode::FundingMintMismatch,
        mint::token_program = token_program,
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// One record per entrant. Present and marked on re-entry.
    #[account(
        init_if_needed,
        payer = entrant,
        space = 8 + Entry::INIT_SPACE,
        seeds = [SEED_ENTRY, prize_pool.key().as_ref(), entrant.key().as_ref()],
        bump
    )]
    pub entry: Box<Account<'info, Entry>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = entrant,
        token::token_program = token_program,
    )]
    pub entrant_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Pinned to the manager config; only used as the fee account owner.
    #[account(address = manager.fee_sink @ ErrorCode::InvalidFeeRecipient)]
    pub fee_sink: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = entrant,
        associated_token::mint = mint,
        associated_token::authority = fee_sink,
        associated_token::token_program = token_program,
    )]
    pub fee_sink_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Creates a prize pool holding `funded_amount` drawn from the treasury.
///
/// # Arguments
/// * `ctx` - Context holding the CreatePrizePool accounts
/// * `funded_amount` - Amount moved from the treasury into the prize vault
/// * `open_delay` - Seconds from now until entry is accepted
pub fn process_create_prize_pool(
    ctx: Context<CreatePrizePool>,
    funded_amount: u64,
    open_delay: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let pool_id = init_prize_pool(
        &mut ctx.accounts.manager,
        &mut ctx.accounts.prize_pool,
        ctx.accounts.mint.key(),
        funded_amount,
        open_delay,
        now,
    )?;

    if ctx.accounts.treasury.amount < funded_amount {
        msg!("Treasury balance: {}", ctx.accounts.treasury.amount);
        msg!("Requested funding: {}", funded_amount);
        return Err(ErrorCode::TransferFailed.into());
    }

    let prize_pool = &mut ctx.accounts.prize_pool;
    prize_pool.bump = ctx.bumps.prize_pool;
    prize_pool.vault_bump = ctx.bumps.prize_vault;
    prize_pool.vault = ctx.accounts.prize_vault.key();

    let signer_seeds: &[&[&[u8]]] = &[&[SEED_MANAGER, &[ctx.accounts.manager.bump]]];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.treasury.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.prize_vault.to_account_info(),
                authority: ctx.accounts.manager.to_account_info(),
            },
            signer_seeds,
        ),
        funded_amount,
        ctx.accounts.mint.decimals,
    )?;

    let open_at = ctx.accounts.prize_pool.open_at;
    msg!("Prize pool {} funded with {}, opens at {}", pool_id, funded_amount, open_at);

    emit!(PrizePoolCreatedEvent {
        prize_pool: ctx.accounts.prize_pool.key(),
        pool_id,
        mint: ctx.accounts.mint.key(),
        funded_amount,
        open_at,
    });

    Ok(())
}

/// Admits the signer into a prize pool.
///
/// Steps performed:
/// 1. Check the pool is open and the signer has not entered before.
/// 2. Charge the admission fee to the configured fee sink.
/// 3. Record the entry.
pub fn process_enter(ctx: Context<Enter>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    if !ctx.accounts.prize_pool.is_open(now) {
        msg!("Current time: {}", now);
        msg!("Opens at: {}", ctx.accounts.prize_pool.open_at);
        return Err(ErrorCode::PoolNotOpen.into());
    }

    let fee = admit_entrant(
        &mut ctx.accounts.prize_pool,
        &mut ctx.accounts.entry,
        ctx.accounts.entrant.key(),
        now,
    )?;

    let prize_pool_key = ctx.accounts.prize_pool.key();
    let entry = &mut ctx.accounts.entry;
    entry.bump = ctx.bumps.entry;
    entry.prize_pool = prize_pool_key;

    if fee > 0 {
        require!(ctx.accounts.entrant_token_account.amount >= fee, ErrorCode::TransferFailed);

        transfer_checked(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.entrant_token_account.to_account_info(),
                    mint: ctx.accounts.mint.to_account_info(),
                    to: ctx.accounts.fee_sink_account.to_account_info(),
                    authority: ctx.accounts.entrant.to_account_info(),
                },
            ),
            fee,
            ctx.accounts.mint.decimals,
        )?;
    }

    msg!("Entry fee: {}", fee);

    emit!(EnteredEvent {
        prize_pool: prize_pool_key,
        pool_id: ctx.accounts.prize_pool.pool_id,
        user: ctx.accounts.entrant.key(),
        fee_paid: fee,
        timestamp: now,
    });

    Ok(())
}
