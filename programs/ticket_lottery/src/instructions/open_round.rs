use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::RoundOpened;
use crate::state::*;

/// Accounts required to advance the lottery to its next round.
///
/// Ensures:
/// 1. Only the operator can open a round.
/// 2. The current round is fully settled.
/// 3. The new round gets its own vault in the currently configured coin.
#[derive(Accounts)]
pub struct OpenRound<'info> {
    /// The operator, paying for the new round and its vault.
    #[account(mut)]
    pub operator: Signer<'info>,

    /// Lottery parameters. `current_id` is advanced here.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        constraint = lottery.operator == operator.key() @ LotteryError::Unauthorized,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The round being left behind.
    #[account(
        seeds = [ROUND_SEED, lottery.current_id.to_le_bytes().as_ref()],
        bump = current_round.bump,
        constraint = current_round.status.is_settled() @ LotteryError::RoundNotSettled,
    )]
    pub current_round: Box<Account<'info, Round>>,

    /// The round being opened, id `current_id + 1`.
    #[account(
        init,
        payer = operator,
        space = 8 + Round::INIT_SPACE,
        seeds = [ROUND_SEED, (lottery.current_id + 1).to_le_bytes().as_ref()],
        bump
    )]
    pub round: Box<Account<'info, Round>>,

    /// Payment mint the new round snapshots.
    #[account(
        address = lottery.coin,
        mint::token_program = token_program,
    )]
    pub coin: Box<InterfaceAccount<'info, Mint>>,

    /// Token account holding the new round's ticket payments.
    #[account(
        init,
        payer = operator,
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

pub fn process_open_round(ctx: Context<OpenRound>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let lottery = &mut ctx.accounts.lottery;
    let round_id = lottery
        .current_id
        .checked_add(1)
        .ok_or(LotteryError::MathOverflow)?;
    lottery.current_id = round_id;

    let round = &mut ctx.accounts.round;
    round.open(round_id, ctx.bumps.round, ctx.bumps.vault, lottery, now);

    msg!("Round {} opened at {}", round_id, now);

    emit!(RoundOpened {
        round_id,
        opened_at: round.opened_at,
        ends_at: round.ends_at(lottery.duration)?,
        price: round.price_at_open,
        coin: round.coin,
    });

    Ok(())
}
