use anchor_lang::prelude::*;

use crate::constants::*;
use crate::payout;
use crate::state::*;

/// Read-only accounts describing one wallet in one round.
/// `position` may be omitted for a wallet that never bought in the round.
#[derive(Accounts)]
pub struct WalletInRound<'info> {
    /// CHECK: Only used to derive the position address.
    pub wallet: UncheckedAccount<'info>,

    #[account(
        seeds = [ROUND_SEED, round.id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Account<'info, Round>,

    #[account(
        seeds = [POSITION_SEED, round.id.to_le_bytes().as_ref(), wallet.key().as_ref()],
        bump,
    )]
    pub position: Option<Account<'info, WalletPosition>>,
}

/// Tickets `wallet` holds in `round`.
pub fn process_wallet_with_id_to_amount(ctx: Context<WalletInRound>) -> Result<u64> {
    Ok(ctx
        .accounts
        .position
        .as_ref()
        .map_or(0, |position| position.tickets))
}

/// Amount `wallet` can still claim from `round`.
///
/// Zero for a losing wallet in a drawn round; `payout_tickets` rejects such a
/// claim with `NothingToClaim` instead of transferring nothing.
pub fn process_wallet_to_amount_return(ctx: Context<WalletInRound>) -> Result<u64> {
    let round = &ctx.accounts.round;
    Ok(ctx
        .accounts
        .position
        .as_ref()
        .map_or(0, |position| payout::pending_entitlement(round, position).amount))
}
