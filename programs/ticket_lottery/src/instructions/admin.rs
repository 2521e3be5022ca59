use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::*;
use crate::state::*;

/// Accounts required to initialize the lottery configuration.
/// Also opens the first round together with its vault.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The account paying for account creation. Becomes the operator.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The Lottery state account that stores the operator-tunable parameters.
    #[account(
        init,
        payer = payer,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Round 1, open for purchases as soon as this instruction lands.
    #[account(
        init,
        payer = payer,
        space = 8 + Round::INIT_SPACE,
        seeds = [ROUND_SEED, FIRST_ROUND_ID.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Box<Account<'info, Round>>,

    /// Mint of the payment token.
    #[account(mint::token_program = token_program)]
    pub coin: Box<InterfaceAccount<'info, Mint>>,

    /// Token account holding the first round's ticket payments.
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED, round.key().as_ref()],
        bump,
        token::mint = coin,
        token::authority = lottery,
        token::token_program = token_program
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface.
    pub token_program: Interface<'info, TokenInterface>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Initializes the lottery with its parameters and opens round 1.
///
/// Every parameter goes through the same validation as its setter.
///
/// # Arguments
/// * `ctx` - Context holding the Initialize accounts
/// * `duration` - Purchase window of each round, in seconds
/// * `price` - Ticket price in base units of the payment token
/// * `commission_percent` - Share of a winning pot sent to the treasury (0..=99)
/// * `max_tickets_per_wallet` - Per-wallet cap within a round
/// * `max_tickets` - Tickets available per round
/// * `treasury` - Owner of the token account receiving commissions
pub fn process_initialize(
    ctx: Context<Initialize>,
    duration: i64,
    price: u64,
    commission_percent: u8,
    max_tickets_per_wallet: u64,
    max_tickets: u64,
    treasury: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let lottery = &mut ctx.accounts.lottery;
    lottery.bump = ctx.bumps.lottery;
    lottery.set_operator(ctx.accounts.payer.key())?;
    lottery.set_treasury(treasury)?;
    lottery.set_coin(ctx.accounts.coin.key())?;
    lottery.set_duration(duration)?;
    lottery.set_price(price)?;
    lottery.set_commission(commission_percent)?;
    lottery.set_max_tickets_for_wallet(max_tickets_per_wallet)?;
    lottery.set_max_tickets(max_tickets)?;
    lottery.current_id = FIRST_ROUND_ID;

    let round = &mut ctx.accounts.round;
    round.open(
        FIRST_ROUND_ID,
        ctx.bumps.round,
        ctx.bumps.vault,
        lottery,
        now,
    );

    msg!("Lottery initialized, operator: {}", lottery.operator);

    emit!(RoundOpened {
        round_id: round.id,
        opened_at: round.opened_at,
        ends_at: round.ends_at(lottery.duration)?,
        price: round.price_at_open,
        coin: round.coin,
    });

    Ok(())
}

/// Accounts shared by every parameter setter.
#[derive(Accounts)]
pub struct UpdateParameter<'info> {
    /// Must match `lottery.operator`.
    pub operator: Signer<'info>,

    /// The parameter store being updated.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        constraint = lottery.operator == operator.key() @ LotteryError::Unauthorized,
    )]
    pub lottery: Account<'info, Lottery>,
}

pub fn process_set_duration(ctx: Context<UpdateParameter>, duration: i64) -> Result<()> {
    let previous = ctx.accounts.lottery.set_duration(duration)?;
    msg!("Duration: {} -> {}", previous, duration);
    emit!(NewDuration { previous, duration });
    Ok(())
}

pub fn process_set_price(ctx: Context<UpdateParameter>, price: u64) -> Result<()> {
    let previous = ctx.accounts.lottery.set_price(price)?;
    msg!("Price: {} -> {}", previous, price);
    emit!(NewPrice { previous, price });
    Ok(())
}

/// Commission must stay below 100 percent.
pub fn process_set_commission(ctx: Context<UpdateParameter>, commission_percent: u8) -> Result<()> {
    let previous = ctx.accounts.lottery.set_commission(commission_percent)?;
    msg!("Commission: {}% -> {}%", previous, commission_percent);
    emit!(NewCommission {
        previous,
        commission_percent,
    });
    Ok(())
}

pub fn process_set_max_tickets_for_wallet(
    ctx: Context<UpdateParameter>,
    max_tickets_per_wallet: u64,
) -> Result<()> {
    let previous = ctx
        .accounts
        .lottery
        .set_max_tickets_for_wallet(max_tickets_per_wallet)?;
    msg!("Max tickets per wallet: {} -> {}", previous, max_tickets_per_wallet);
    emit!(NewMaxTicketsForWallet {
        previous,
        max_tickets_per_wallet,
    });
    Ok(())
}

pub fn process_set_max_tickets(ctx: Context<UpdateParameter>, max_tickets: u64) -> Result<()> {
    let previous = ctx.accounts.lottery.set_max_tickets(max_tickets)?;
    msg!("Max tickets: {} -> {}", previous, max_tickets);
    emit!(NewMaxTickets {
        previous,
        max_tickets,
    });
    Ok(())
}

/// Hands the operator role to `operator`. The caller loses all rights at once.
pub fn process_set_operator(ctx: Context<UpdateParameter>, operator: Pubkey) -> Result<()> {
    let previous = ctx.accounts.lottery.set_operator(operator)?;
    msg!("Operator: {} -> {}", previous, operator);
    emit!(NewOperator { previous, operator });
    Ok(())
}

/// Changes the payment mint. Rounds keep the mint they were opened with,
/// so this only affects rounds opened afterwards.
pub fn process_set_coin(ctx: Context<UpdateParameter>, coin: Pubkey) -> Result<()> {
    let previous = ctx.accounts.lottery.set_coin(coin)?;
    msg!("Coin: {} -> {}", previous, coin);
    emit!(NewCoin { previous, coin });
    Ok(())
}

pub fn process_set_treasury(ctx: Context<UpdateParameter>, treasury: Pubkey) -> Result<()> {
    let previous = ctx.accounts.lottery.set_treasury(treasury)?;
    msg!("Treasury: {} -> {}", previous, treasury);
    emit!(NewTreasury { previous, treasury });
    Ok(())
}
