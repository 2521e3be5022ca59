use anchor_lang::prelude::*;

use crate::state::SettlementOutcome;

#[event]
pub struct NewDuration {
    pub previous: i64,
    pub duration: i64,
}

#[event]
pub struct NewPrice {
    pub previous: u64,
    pub price: u64,
}

#[event]
pub struct NewCommission {
    pub previous: u8,
    pub commission_percent: u8,
}

#[event]
pub struct NewMaxTicketsForWallet {
    pub previous: u64,
    pub max_tickets_per_wallet: u64,
}

#[event]
pub struct NewMaxTickets {
    pub previous: u64,
    pub max_tickets: u64,
}

#[event]
pub struct NewOperator {
    pub previous: Pubkey,
    pub operator: Pubkey,
}

#[event]
pub struct NewCoin {
    pub previous: Pubkey,
    pub coin: Pubkey,
}

#[event]
pub struct NewTreasury {
    pub previous: Pubkey,
    pub treasury: Pubkey,
}

#[event]
pub struct RoundOpened {
    pub round_id: u64,
    pub opened_at: i64,
    pub ends_at: i64,
    pub price: u64,
    pub coin: Pubkey,
}

#[event]
pub struct TicketsPurchased {
    pub round_id: u64,
    pub wallet: Pubkey,
    pub quantity: u64,
    pub cost: u64,
    pub wallet_tickets: u64,
    pub total_tickets: u64,
}

#[event]
pub struct EndLottery {
    pub round_id: u64,
    pub outcome: SettlementOutcome,
    pub total_tickets: u64,
    pub pot: u64,
    pub randomness_account: Pubkey,
}

#[event]
pub struct WinnerChosen {
    pub round_id: u64,
    pub winner: Pubkey,
    pub winning_ticket: u64,
    pub prize: u64,
    pub commission: u64,
}

#[event]
pub struct PayoutClaimed {
    pub round_id: u64,
    pub wallet: Pubkey,
    pub amount: u64,
    pub commission: u64,
    pub treasury: Pubkey,
}
