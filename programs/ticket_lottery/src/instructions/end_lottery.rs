use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::EndLottery;
use crate::randomness::require_randomness_owner;
use crate::state::*;

/// Accounts required to end the current round.
///
/// Ensures:
/// 1. Only the operator can end a round.
/// 2. The round is still open and its deadline has passed.
/// 3. When a draw is needed, a freshly committed randomness account is supplied.
#[derive(Accounts)]
pub struct EndRound<'info> {
    /// Must match `lottery.operator`.
    pub operator: Signer<'info>,

    /// Lottery parameters: duration, caps and commission.
    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The current round.
    #[account(
        mut,
        seeds = [ROUND_SEED, lottery.current_id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    /// Switchboard randomness account committed for this draw. Must be owned
    /// by the Switchboard on-demand program.
    /// Not needed when the round is undersold.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: Option<UncheckedAccount<'info>>,
}

/// Ends the current round.
///
/// An undersold round settles immediately as a refund. A sold-out round
/// stores the randomness account as its pending request and waits for
/// `choose_winner`.
pub fn process_end_lottery(ctx: Context<EndRound>) -> Result<()> {
    let clock = Clock::get()?;
    let lottery = &ctx.accounts.lottery;
    let round = &mut ctx.accounts.round;

    round.validate_end(lottery, &ctx.accounts.operator.key(), clock.unix_timestamp)?;

    msg!("Current time: {}", clock.unix_timestamp);
    msg!("End time: {}", round.ends_at(lottery.duration)?);
    msg!("Tickets sold: {} of {}", round.total_tickets, lottery.max_tickets);

    let commission_percent = lottery.commission_percent;

    if !round.needs_draw(lottery) {
        round.settle_refund(commission_percent);
        msg!("Round {} undersold, refunding buyers", round.id);

        emit!(EndLottery {
            round_id: round.id,
            outcome: round.settlement.outcome,
            total_tickets: round.total_tickets,
            pot: round.pot,
            randomness_account: Pubkey::default(),
        });
        return Ok(());
    }

    let randomness_account = ctx
        .accounts
        .randomness_account_data
        .as_ref()
        .ok_or(LotteryError::IncorrectRandomnessAccount)?;
    require_randomness_owner(randomness_account.owner)?;

    let randomness_data = RandomnessAccountData::parse(randomness_account.data.borrow())
        .map_err(|_| LotteryError::IncorrectRandomnessAccount)?;

    let previous_slot = clock
        .slot
        .checked_sub(1)
        .ok_or(LotteryError::MathOverflow)?;
    if randomness_data.seed_slot != previous_slot {
        return Err(LotteryError::RandomnessAlreadyRevealed.into());
    }

    round.await_randomness(randomness_account.key(), commission_percent);
    msg!(
        "Round {} awaiting randomness from {}",
        round.id,
        randomness_account.key()
    );

    emit!(EndLottery {
        round_id: round.id,
        outcome: round.settlement.outcome,
        total_tickets: round.total_tickets,
        pot: round.pot,
        randomness_account: randomness_account.key(),
    });

    Ok(())
}
