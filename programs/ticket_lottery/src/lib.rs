//! Ticket lottery paid in an SPL token.
//!
//! Each round sells capped tickets until its deadline. A sold-out round draws
//! one winner from Switchboard randomness and pays them the pot minus the
//! operator's commission; an undersold round refunds every buyer.

use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod payout;
pub mod randomness;
pub mod state;

declare_id!("HdZQRBbqoh8uK9NZXKf3onL4xVezcv3wELD4bjufZvEH");

#[program]
pub mod ticket_lottery {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        duration: i64,
        price: u64,
        commission_percent: u8,
        max_tickets_per_wallet: u64,
        max_tickets: u64,
        treasury: Pubkey,
    ) -> Result<()> {
        process_initialize(
            ctx,
            duration,
            price,
            commission_percent,
            max_tickets_per_wallet,
            max_tickets,
            treasury,
        )
    }

    pub fn set_duration(ctx: Context<UpdateParameter>, duration: i64) -> Result<()> {
        process_set_duration(ctx, duration)
    }

    pub fn set_price(ctx: Context<UpdateParameter>, price: u64) -> Result<()> {
        process_set_price(ctx, price)
    }

    pub fn set_commission(ctx: Context<UpdateParameter>, commission_percent: u8) -> Result<()> {
        process_set_commission(ctx, commission_percent)
    }

    pub fn set_max_tickets_for_wallet(
        ctx: Context<UpdateParameter>,
        max_tickets_per_wallet: u64,
    ) -> Result<()> {
        process_set_max_tickets_for_wallet(ctx, max_tickets_per_wallet)
    }

    pub fn set_max_tickets(ctx: Context<UpdateParameter>, max_tickets: u64) -> Result<()> {
        process_set_max_tickets(ctx, max_tickets)
    }

    pub fn set_operator(ctx: Context<UpdateParameter>, operator: Pubkey) -> Result<()> {
        process_set_operator(ctx, operator)
    }

    pub fn set_coin(ctx: Context<UpdateParameter>, coin: Pubkey) -> Result<()> {
        process_set_coin(ctx, coin)
    }

    pub fn set_treasury(ctx: Context<UpdateParameter>, treasury: Pubkey) -> Result<()> {
        process_set_treasury(ctx, treasury)
    }

    pub fn open_round(ctx: Context<OpenRound>) -> Result<()> {
        process_open_round(ctx)
    }

    pub fn buy_tickets(ctx: Context<BuyTickets>, quantity: u64) -> Result<()> {
        process_buy_tickets(ctx, quantity)
    }

    pub fn end_lottery(ctx: Context<EndRound>) -> Result<()> {
        process_end_lottery(ctx)
    }

    pub fn choose_winner(ctx: Context<ChooseWinner>) -> Result<()> {
        process_choose_winner(ctx)
    }

    pub fn payout_tickets(ctx: Context<PayoutTickets>) -> Result<()> {
        process_payout_tickets(ctx)
    }

    pub fn wallet_with_id_to_amount(ctx: Context<WalletInRound>) -> Result<u64> {
        process_wallet_with_id_to_amount(ctx)
    }

    pub fn wallet_to_amount_return(ctx: Context<WalletInRound>) -> Result<u64> {
        process_wallet_to_amount_return(ctx)
    }
}
