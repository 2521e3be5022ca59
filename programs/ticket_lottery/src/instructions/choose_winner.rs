use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::WinnerChosen;
use crate::state::*;

/// Accounts required to choose the winner of a round awaiting randomness.
///
/// Anyone may crank this once the oracle has revealed. The randomness
/// account must be the one committed by `end_lottery`.
#[derive(Accounts)]
pub struct ChooseWinner<'info> {
    /// Any account cranking the draw.
    pub payer: Signer<'info>,

    /// The round awaiting settlement.
    #[account(
        mut,
        seeds = [ROUND_SEED, round.id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_choose_winner(ctx: Context<ChooseWinner>) -> Result<()> {
    let clock = Clock::get()?;
    let round = &mut ctx.accounts.round;
    let randomness_key = ctx.accounts.randomness_account_data.key();

    round.require_pending(&randomness_key)?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| LotteryError::IncorrectRandomnessAccount)?;
    let revealed_random_value = randomness_data
        .get_value(&clock)
        .map_err(|_| LotteryError::RandomnessNotResolved)?;

    msg!("Randomness result: {:?}", &revealed_random_value[..8]);
    msg!("Ticket num: {}", round.total_tickets);

    let winner = round.settle_winner(&randomness_key, revealed_random_value)?;
    let settlement = round.settlement;

    msg!("Winner: {} (ticket {})", winner, settlement.winning_ticket);

    emit!(WinnerChosen {
        round_id: round.id,
        winner,
        winning_ticket: settlement.winning_ticket,
        prize: settlement.prize,
        commission: settlement.commission,
    });

    Ok(())
}
