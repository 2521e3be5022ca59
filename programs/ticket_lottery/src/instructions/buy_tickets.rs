use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::constants::*;
use crate::events::TicketsPurchased;
use crate::state::*;

/// Accounts required to buy tickets in the current round.
/// Handles:
/// - Payment transfer into the round vault
/// - Creation of the buyer's position on first purchase
/// - Ticket bookkeeping
#[derive(Accounts)]
pub struct BuyTickets<'info> {
    /// The wallet paying for the tickets.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Lottery parameters: price and caps are read from here.
    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The current round. Only it accepts purchases.
    #[account(
        mut,
        seeds = [ROUND_SEED, lottery.current_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Box<Account<'info, Round>>,

    /// Tickets held by the buyer in this round.
    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + WalletPosition::INIT_SPACE,
        seeds = [POSITION_SEED, round.id.to_le_bytes().as_ref(), buyer.key().as_ref()],
        bump
    )]
    pub position: Box<Account<'info, WalletPosition>>,

    /// Payment mint of the round.
    #[account(
        address = round.coin,
        mint::token_program = token_program,
    )]
    pub coin: Box<InterfaceAccount<'info, Mint>>,

    /// Token account the payment is pulled from.
    #[account(
        mut,
        token::mint = coin,
        token::authority = buyer,
        token::token_program = token_program,
    )]
    pub buyer_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Round vault receiving the payment.
    #[account(
        mut,
        seeds = [VAULT_SEED, round.key().as_ref()],
        bump = round.vault_bump,
        token::mint = coin,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface
    pub token_program: Interface<'info, TokenInterface>,

    /// System program interface
    pub system_program: Program<'info, System>,
}

/// Buys `quantity` tickets for the caller.
///
/// Steps performed:
/// 1. Check that the round is open and not past its deadline.
/// 2. Check the single-purchase limit, the wallet cap and the round cap.
/// 3. Check the buyer's token balance against `quantity * price`.
/// 4. Book the tickets and append them to the purchase order.
/// 5. Transfer the payment into the round vault.
///
/// # Arguments
/// * `ctx` - Context containing BuyTickets accounts
/// * `quantity` - Number of tickets to buy
pub fn process_buy_tickets(ctx: Context<BuyTickets>, quantity: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let buyer = ctx.accounts.buyer.key();

    let position = &mut ctx.accounts.position;
    if position.wallet == Pubkey::default() {
        position.round_id = ctx.accounts.round.id;
        position.wallet = buyer;
        position.bump = ctx.bumps.position;
    }

    let round = &mut ctx.accounts.round;
    let cost = round.validate_purchase(
        &ctx.accounts.lottery,
        position,
        quantity,
        ctx.accounts.buyer_token_account.amount,
        now,
    )?;
    round.record_purchase(position, quantity, cost)?;

    msg!(
        "Round {}: {} bought {} tickets, wallet {} / total {}",
        round.id,
        buyer,
        quantity,
        position.tickets,
        round.total_tickets
    );

    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.buyer_token_account.to_account_info(),
                mint: ctx.accounts.coin.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.buyer.to_account_info(),
            },
        ),
        cost,
        ctx.accounts.coin.decimals,
    )?;

    emit!(TicketsPurchased {
        round_id: round.id,
        wallet: buyer,
        quantity,
        cost,
        wallet_tickets: position.tickets,
        total_tickets: round.total_tickets,
    });

    Ok(())
}
