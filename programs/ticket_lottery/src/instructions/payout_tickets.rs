use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::PayoutClaimed;
use crate::payout;
use crate::state::*;

/// Accounts required for claiming a settled round's entitlement.
///
/// Ensures:
/// 1. Only the wallet owning the position can claim it.
/// 2. Tokens leave the vault of the position's round only.
/// 3. Commission can only reach a token account owned by the treasury.
#[derive(Accounts)]
pub struct PayoutTickets<'info> {
    /// The claiming wallet.
    #[account(mut)]
    pub claimant: Signer<'info>,

    /// Signs vault transfers and names the treasury.
    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        seeds = [ROUND_SEED, round.id.to_le_bytes().as_ref()],
        bump = round.bump,
    )]
    pub round: Box<Account<'info, Round>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, round.id.to_le_bytes().as_ref(), claimant.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, WalletPosition>>,

    #[account(
        address = round.coin,
        mint::token_program = token_program,
    )]
    pub coin: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, round.key().as_ref()],
        bump = round.vault_bump,
        token::mint = coin,
        token::authority = lottery,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the entitlement.
    #[account(
        mut,
        token::mint = coin,
        token::authority = claimant,
        token::token_program = token_program,
    )]
    pub claimant_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the commission. Required only for the winner's claim.
    #[account(
        mut,
        token::mint = coin,
        token::authority = lottery.treasury,
        token::token_program = token_program,
    )]
    pub treasury_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    /// Token program for transferring tokens.
    pub token_program: Interface<'info, TokenInterface>,
}

/// Processes the entitlement claim of the caller.
///
/// Steps:
/// 1. Verify that the round is settled and the position is unpaid.
/// 2. Compute the entitlement and mark the position paid.
/// 3. Transfer the entitlement from the vault to the claimant.
/// 4. For a winner, transfer the commission to the treasury.
///
/// # Arguments
/// * `ctx` - Context containing `PayoutTickets` accounts
pub fn process_payout_tickets(ctx: Context<PayoutTickets>) -> Result<()> {
    let owed = payout::claim(&ctx.accounts.round, &mut ctx.accounts.position)?;

    msg!(
        "Round {}: paying {} to {}, commission {}",
        ctx.accounts.round.id,
        owed.amount,
        ctx.accounts.claimant.key(),
        owed.commission
    );

    let treasury_token_account = if owed.commission > 0 {
        let account = ctx
            .accounts
            .treasury_token_account
            .as_ref()
            .ok_or(LotteryError::InvalidArgument)?;
        Some(account.to_account_info())
    } else {
        None
    };

    let signer_seeds: &[&[&[u8]]] = &[&[LOTTERY_SEED, &[ctx.accounts.lottery.bump]]];
    let decimals = ctx.accounts.coin.decimals;

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault.to_account_info(),
                mint: ctx.accounts.coin.to_account_info(),
                to: ctx.accounts.claimant_token_account.to_account_info(),
                authority: ctx.accounts.lottery.to_account_info(),
            },
            signer_seeds,
        ),
        owed.amount,
        decimals,
    )?;

    if let Some(treasury_token_account) = treasury_token_account {
        transfer_checked(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: ctx.accounts.vault.to_account_info(),
                    mint: ctx.accounts.coin.to_account_info(),
                    to: treasury_token_account,
                    authority: ctx.accounts.lottery.to_account_info(),
                },
                signer_seeds,
            ),
            owed.commission,
            decimals,
        )?;
    }

    emit!(PayoutClaimed {
        round_id: ctx.accounts.round.id,
        wallet: ctx.accounts.claimant.key(),
        amount: owed.amount,
        commission: owed.commission,
        treasury: ctx.accounts.lottery.treasury,
    });

    Ok(())
}
