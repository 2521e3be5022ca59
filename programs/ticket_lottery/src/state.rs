use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LotteryError;
use crate::payout;

/// Operator-tunable configuration shared by every round.
#[account]
#[derive(InitSpace)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The only key allowed to change parameters and drive the round lifecycle.
    pub operator: Pubkey,

    /// Owner of the token account receiving winner commissions.
    pub treasury: Pubkey,

    /// Mint of the payment token. Snapshotted by each round when it opens.
    pub coin: Pubkey,

    /// Length of the purchase window in seconds.
    pub duration: i64,

    /// Price of a single ticket, in base units of `coin`.
    pub price: u64,

    /// Share of a winning pot routed to the treasury, 0..=99.
    pub commission_percent: u8,

    /// Tickets a single wallet may hold in one round.
    pub max_tickets_per_wallet: u64,

    /// Tickets available per round. Selling all of them is required for a draw.
    pub max_tickets: u64,

    /// Id of the most recently opened round.
    pub current_id: u64,
}

impl Lottery {
    pub fn require_operator(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.operator, LotteryError::Unauthorized);
        Ok(())
    }

    pub fn set_duration(&mut self, duration: i64) -> Result<i64> {
        require!(duration > 0, LotteryError::InvalidArgument);
        Ok(std::mem::replace(&mut self.duration, duration))
    }

    pub fn set_price(&mut self, price: u64) -> Result<u64> {
        require!(price > 0, LotteryError::InvalidArgument);
        Ok(std::mem::replace(&mut self.price, price))
    }

    pub fn set_commission(&mut self, commission_percent: u8) -> Result<u8> {
        require!(
            (commission_percent as u64) < PERCENT_DENOMINATOR,
            LotteryError::InvalidArgument
        );
        Ok(std::mem::replace(
            &mut self.commission_percent,
            commission_percent,
        ))
    }

    pub fn set_max_tickets_for_wallet(&mut self, max_tickets_per_wallet: u64) -> Result<u64> {
        require!(max_tickets_per_wallet > 0, LotteryError::InvalidArgument);
        Ok(std::mem::replace(
            &mut self.max_tickets_per_wallet,
            max_tickets_per_wallet,
        ))
    }

    pub fn set_max_tickets(&mut self, max_tickets: u64) -> Result<u64> {
        require!(
            max_tickets > 0 && max_tickets <= MAX_TICKETS_CAP,
            LotteryError::InvalidArgument
        );
        Ok(std::mem::replace(&mut self.max_tickets, max_tickets))
    }

    pub fn set_operator(&mut self, operator: Pubkey) -> Result<Pubkey> {
        require_non_default(&operator)?;
        Ok(std::mem::replace(&mut self.operator, operator))
    }

    pub fn set_coin(&mut self, coin: Pubkey) -> Result<Pubkey> {
        require_non_default(&coin)?;
        Ok(std::mem::replace(&mut self.coin, coin))
    }

    pub fn set_treasury(&mut self, treasury: Pubkey) -> Result<Pubkey> {
        require_non_default(&treasury)?;
        Ok(std::mem::replace(&mut self.treasury, treasury))
    }

    /// Number of sold tickets a round needs before a draw takes place.
    pub fn draw_threshold(&self) -> u64 {
        self.max_tickets
    }
}

fn require_non_default(key: &Pubkey) -> Result<()> {
    require_keys_neq!(*key, Pubkey::default(), LotteryError::InvalidArgument);
    Ok(())
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum RoundStatus {
    Open,
    AwaitingSettlement,
    SettledRefund,
    SettledPayout,
}

impl RoundStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, RoundStatus::SettledRefund | RoundStatus::SettledPayout)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum SettlementOutcome {
    None,
    InsufficientSales,
    WinnerSelected,
}

/// One purchase in the order it was recorded. `cumulative` is the round's
/// ticket total right after this purchase, so the purchase owns ticket
/// indices `[previous.cumulative, cumulative)`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct PurchaseEntry {
    pub wallet: Pubkey,
    pub cumulative: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct SettlementRecord {
    pub outcome: SettlementOutcome,

    /// Switchboard randomness account committed at `end_lottery`.
    /// `Pubkey::default()` while no randomness was requested.
    pub randomness_account: Pubkey,

    /// Revealed random value, written exactly once.
    pub randomness: [u8; 32],

    pub winning_ticket: u64,
    pub winner: Pubkey,

    /// Commission percent in force when the round was ended.
    pub commission_percent: u8,

    pub prize: u64,
    pub commission: u64,
}

impl Default for SettlementRecord {
    fn default() -> Self {
        Self {
            outcome: SettlementOutcome::None,
            randomness_account: Pubkey::default(),
            randomness: [0u8; 32],
            winning_ticket: 0,
            winner: Pubkey::default(),
            commission_percent: 0,
            prize: 0,
            commission: 0,
        }
    }
}

#[account]
#[derive(InitSpace)]
pub struct Round {
    pub id: u64,
    pub bump: u8,
    pub vault_bump: u8,

    /// UNIX timestamp the purchase window opened at.
    pub opened_at: i64,

    pub price_at_open: u64,

    /// Payment mint of this round. Purchases and payouts only use this mint.
    pub coin: Pubkey,

    pub total_tickets: u64,

    /// Tokens collected by the vault for this round.
    pub pot: u64,

    pub status: RoundStatus,

    /// Prefix sums over purchase order, used to map a ticket index to its owner.
    /// Capacity must equal `MAX_TICKETS_CAP`.
    #[max_len(100)]
    pub purchases: Vec<PurchaseEntry>,

    pub settlement: SettlementRecord,
}

impl Round {
    pub fn open(&mut self, id: u64, bump: u8, vault_bump: u8, lottery: &Lottery, now: i64) {
        self.id = id;
        self.bump = bump;
        self.vault_bump = vault_bump;
        self.opened_at = now;
        self.price_at_open = lottery.price;
        self.coin = lottery.coin;
        self.total_tickets = 0;
        self.pot = 0;
        self.status = RoundStatus::Open;
        self.purchases = Vec::new();
        self.settlement = SettlementRecord::default();
    }

    pub fn ends_at(&self, duration: i64) -> Result<i64> {
        self.opened_at
            .checked_add(duration)
            .ok_or_else(|| error!(LotteryError::MathOverflow))
    }

    /// Expiry is never stored; it follows the duration currently configured.
    pub fn is_expired(&self, duration: i64, now: i64) -> Result<bool> {
        Ok(now >= self.ends_at(duration)?)
    }

    /// Checks a purchase of `quantity` tickets and returns its cost.
    pub fn validate_purchase(
        &self,
        lottery: &Lottery,
        position: &WalletPosition,
        quantity: u64,
        balance: u64,
        now: i64,
    ) -> Result<u64> {
        require!(
            self.status == RoundStatus::Open && !self.is_expired(lottery.duration, now)?,
            LotteryError::RoundExpired
        );
        require!(quantity > 0, LotteryError::InvalidArgument);

        let doubled = quantity.checked_mul(2).ok_or(LotteryError::MathOverflow)?;
        require!(doubled <= lottery.max_tickets, LotteryError::ExceedsSaleLimit);

        let wallet_tickets = position
            .tickets
            .checked_add(quantity)
            .ok_or(LotteryError::MathOverflow)?;
        let total_tickets = self
            .total_tickets
            .checked_add(quantity)
            .ok_or(LotteryError::MathOverflow)?;
        require!(
            wallet_tickets <= lottery.max_tickets_per_wallet && total_tickets <= lottery.max_tickets,
            LotteryError::ExceedsWalletLimit
        );

        let cost = quantity
            .checked_mul(lottery.price)
            .ok_or(LotteryError::MathOverflow)?;
        require!(balance >= cost, LotteryError::InsufficientFunds);

        Ok(cost)
    }

    /// Books a validated purchase against the round and the buyer's position.
    pub fn record_purchase(
        &mut self,
        position: &mut WalletPosition,
        quantity: u64,
        cost: u64,
    ) -> Result<()> {
        let total_tickets = self
            .total_tickets
            .checked_add(quantity)
            .ok_or(LotteryError::MathOverflow)?;
        let pot = self.pot.checked_add(cost).ok_or(LotteryError::MathOverflow)?;
        let tickets = position
            .tickets
            .checked_add(quantity)
            .ok_or(LotteryError::MathOverflow)?;
        let amount_paid = position
            .amount_paid
            .checked_add(cost)
            .ok_or(LotteryError::MathOverflow)?;

        self.purchases.push(PurchaseEntry {
            wallet: position.wallet,
            cumulative: total_tickets,
        });
        self.total_tickets = total_tickets;
        self.pot = pot;
        position.tickets = tickets;
        position.amount_paid = amount_paid;

        Ok(())
    }

    /// Owner of ticket `index`, found by binary search over the prefix sums.
    pub fn owner_of_ticket(&self, index: u64) -> Option<Pubkey> {
        let slot = self.purchases.partition_point(|entry| entry.cumulative <= index);
        self.purchases.get(slot).map(|entry| entry.wallet)
    }

    /// Preconditions of `end_lottery`, in the order they are reported.
    pub fn validate_end(&self, lottery: &Lottery, caller: &Pubkey, now: i64) -> Result<()> {
        lottery.require_operator(caller)?;
        require!(self.status == RoundStatus::Open, LotteryError::AlreadySettled);
        require!(
            self.is_expired(lottery.duration, now)?,
            LotteryError::NotExpired
        );
        Ok(())
    }

    pub fn needs_draw(&self, lottery: &Lottery) -> bool {
        self.total_tickets >= lottery.draw_threshold()
    }

    /// Closes an undersold round: every wallet gets its contribution back.
    pub fn settle_refund(&mut self, commission_percent: u8) {
        self.status = RoundStatus::SettledRefund;
        self.settlement.outcome = SettlementOutcome::InsufficientSales;
        self.settlement.commission_percent = commission_percent;
    }

    /// Freezes the round until `randomness_account` is revealed.
    pub fn await_randomness(&mut self, randomness_account: Pubkey, commission_percent: u8) {
        self.status = RoundStatus::AwaitingSettlement;
        self.settlement.outcome = SettlementOutcome::WinnerSelected;
        self.settlement.randomness_account = randomness_account;
        self.settlement.commission_percent = commission_percent;
    }

    /// Checks that the round is waiting on exactly `randomness_account`.
    pub fn require_pending(&self, randomness_account: &Pubkey) -> Result<()> {
        match self.status {
            RoundStatus::AwaitingSettlement => {}
            RoundStatus::Open => return err!(LotteryError::RandomnessNotRequested),
            _ => return err!(LotteryError::AlreadySettled),
        }
        require_keys_eq!(
            *randomness_account,
            self.settlement.randomness_account,
            LotteryError::IncorrectRandomnessAccount
        );
        Ok(())
    }

    /// Accepts the revealed value for a pending round and records the winner.
    pub fn settle_winner(
        &mut self,
        randomness_account: &Pubkey,
        randomness: [u8; 32],
    ) -> Result<Pubkey> {
        self.require_pending(randomness_account)?;

        let winning_ticket = payout::winning_ticket(&randomness, self.total_tickets)?;
        let winner = self
            .owner_of_ticket(winning_ticket)
            .ok_or(LotteryError::MathOverflow)?;
        let commission_percent = self.settlement.commission_percent;

        self.settlement.randomness = randomness;
        self.settlement.winning_ticket = winning_ticket;
        self.settlement.winner = winner;
        self.settlement.prize = payout::prize(self.pot, commission_percent)?;
        self.settlement.commission = payout::commission(self.pot, commission_percent)?;
        self.status = RoundStatus::SettledPayout;

        Ok(winner)
    }
}

/// Tickets a wallet holds in one round, plus its claim flag.
#[account]
#[derive(InitSpace)]
pub struct WalletPosition {
    pub round_id: u64,
    pub wallet: Pubkey,
    pub tickets: u64,

    /// Tokens paid for `tickets`, refunded in full if the round is undersold.
    pub amount_paid: u64,

    pub paid: bool,
    pub bump: u8,
}
