use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{ManagerConfigUpdatedEvent, ManagerInitializedEvent};
use crate::state::LotteryManager;
use crate::utils::validate_entry_fee_bps;

/// Accounts required to initialize the prize pool manager and its treasury.
#[derive(Accounts)]
pub struct InitializeManager<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + LotteryManager::INIT_SPACE,
        seeds = [SEED_MANAGER],
        bump
    )]
    pub manager: Box<Account<'info, LotteryManager>>,

    #[account(
        mint::token_program = token_program,
    )]
    pub funding_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Treasury that seeds prize pools. Deposit fees arrive here when the
    /// farm's fee recipient is the manager.
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = funding_mint,
        associated_token::authority = manager,
        associated_token::token_program = token_program,
    )]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Switches the funding mint, creating the treasury for it if needed.
#[derive(Accounts)]
pub struct SetFundingMint<'info> {
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
        mint::token_program = token_program,
    )]
    pub funding_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = funding_mint,
        associated_token::authority = manager,
        associated_token::token_program = token_program,
    )]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateManagerConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_MANAGER],
        bump = manager.bump,
        has_one = authority @ ErrorCode::Unauthorized,
    )]
    pub manager: Box<Account<'info, LotteryManager>>,
}

/// Initializes the manager. Admission fees go back to the manager's own
/// treasury until a different fee sink is configured.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeManager accounts
/// * `entry_fee_bps` - Admission fee rate, defaults to `DEFAULT_ENTRY_FEE_BPS`
pub fn process_initialize_manager(
    ctx: Context<InitializeManager>,
    entry_fee_bps: Option<u16>,
) -> Result<()> {
    let entry_fee_bps = entry_fee_bps.unwrap_or(DEFAULT_ENTRY_FEE_BPS);
    validate_entry_fee_bps(entry_fee_bps)?;

    let manager_key = ctx.accounts.manager.key();
    let manager = &mut ctx.accounts.manager;
    manager.bump = ctx.bumps.manager;
    manager.authority = ctx.accounts.authority.key();
    manager.funding_mint = ctx.accounts.funding_mint.key();
    manager.fee_sink = manager_key;
    manager.entry_fee_bps = entry_fee_bps;
    manager.pool_count = 0;

    msg!("Treasury: {}", ctx.accounts.treasury.key());

    emit!(ManagerInitializedEvent {
        manager: manager_key,
        authority: ctx.accounts.authority.key(),
        funding_mint: ctx.accounts.funding_mint.key(),
        treasury: ctx.accounts.treasury.key(),
        entry_fee_bps,
    });

    Ok(())
}

pub fn process_set_funding_mint(ctx: Context<SetFundingMint>) -> Result<()> {
    let funding_mint = ctx.accounts.funding_mint.key();
    ctx.accounts.manager.funding_mint = funding_mint;

    msg!("Funding mint set to {}", funding_mint);

    emit!(ManagerConfigUpdatedEvent {
        authority: None,
        funding_mint: Some(funding_mint),
        fee_sink: None,
        entry_fee_bps: None,
    });

    Ok(())
}

pub fn process_update_manager_config(
    ctx: Context<UpdateManagerConfig>,
    new_authority: Option<Pubkey>,
    new_fee_sink: Option<Pubkey>,
    new_entry_fee_bps: Option<u16>,
) -> Result<()> {
    let manager = &mut ctx.accounts.manager;

    if let Some(authority) = new_authority {
        manager.authority = authority;
    }

    if let Some(fee_sink) = new_fee_sink {
        manager.fee_sink = fee_sink;
    }

    if let Some(entry_fee_bps) = new_entry_fee_bps {
        validate_entry_fee_bps(entry_fee_bps)?;
        manager.entry_fee_bps = entry_fee_bps;
    }

    emit!(ManagerConfigUpdatedEvent {
        authority: new_authority,
        funding_mint: None,
        fee_sink: new_fee_sink,
        entry_fee_bps: new_entry_fee_bps,
    });

    msg!("Manager config updated");

    Ok(())
}
