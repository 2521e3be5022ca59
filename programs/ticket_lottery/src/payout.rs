//! Pure settlement arithmetic: winner index, pot split and per-wallet
//! entitlement. Nothing here touches accounts or the token program.

use anchor_lang::prelude::*;

use crate::constants::PERCENT_DENOMINATOR;
use crate::error::LotteryError;
use crate::state::{Round, SettlementOutcome, WalletPosition};

/// Reduces a revealed random value to a ticket index in `0..total_tickets`.
pub fn winning_ticket(randomness: &[u8; 32], total_tickets: u64) -> Result<u64> {
    require!(total_tickets > 0, LotteryError::MathOverflow);
    let mut head = [0u8; 8];
    head.copy_from_slice(&randomness[..8]);
    Ok(u64::from_le_bytes(head) % total_tickets)
}

/// Winner's share of the pot: `pot * (100 - commission) / 100`.
pub fn prize(pot: u64, commission_percent: u8) -> Result<u64> {
    let keep = PERCENT_DENOMINATOR
        .checked_sub(commission_percent as u64)
        .ok_or(LotteryError::MathOverflow)?;
    share(pot, keep)
}

/// Treasury's share of the pot: `pot * commission / 100`.
pub fn commission(pot: u64, commission_percent: u8) -> Result<u64> {
    share(pot, commission_percent as u64)
}

fn share(pot: u64, percent: u64) -> Result<u64> {
    let amount = (pot as u128)
        .checked_mul(percent as u128)
        .ok_or(LotteryError::MathOverflow)?
        .checked_div(PERCENT_DENOMINATOR as u128)
        .ok_or(LotteryError::MathOverflow)?;
    u64::try_from(amount).map_err(|_| error!(LotteryError::MathOverflow))
}

/// Amounts owed when `position` claims against a settled `round`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Entitlement {
    /// Transferred to the claiming wallet.
    pub amount: u64,
    /// Transferred to the treasury in the same claim.
    pub commission: u64,
}

impl Entitlement {
    pub fn is_empty(&self) -> bool {
        self.amount == 0 && self.commission == 0
    }
}

/// Entitlement of `position` in `round`. Zero for unsettled rounds.
pub fn entitlement(round: &Round, position: &WalletPosition) -> Entitlement {
    if !round.status.is_settled() || position.round_id != round.id {
        return Entitlement::default();
    }
    match round.settlement.outcome {
        SettlementOutcome::InsufficientSales => Entitlement {
            amount: position.amount_paid,
            commission: 0,
        },
        SettlementOutcome::WinnerSelected if position.wallet == round.settlement.winner => {
            Entitlement {
                amount: round.settlement.prize,
                commission: round.settlement.commission,
            }
        }
        _ => Entitlement::default(),
    }
}

/// Entitlement still claimable by `position`.
pub fn pending_entitlement(round: &Round, position: &WalletPosition) -> Entitlement {
    if position.paid {
        return Entitlement::default();
    }
    entitlement(round, position)
}

/// Claims the entitlement of `position`, marking it paid before anything is
/// transferred.
pub fn claim(round: &Round, position: &mut WalletPosition) -> Result<Entitlement> {
    require!(round.status.is_settled(), LotteryError::NotSettled);
    require!(!position.paid, LotteryError::AlreadyPaid);

    let owed = entitlement(round, position);
    require!(!owed.is_empty(), LotteryError::NothingToClaim);

    position.paid = true;
    Ok(owed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PurchaseEntry, RoundStatus, SettlementRecord};
    use anchor_lang::error::Error;

    const PRICE: u64 = 50_000_000;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn settled_round(outcome: SettlementOutcome, winner: Pubkey, pot: u64) -> Round {
        let commission_percent = 10;
        let status = match outcome {
            SettlementOutcome::InsufficientSales => RoundStatus::SettledRefund,
            _ => RoundStatus::SettledPayout,
        };
        Round {
            id: 1,
            bump: 0,
            vault_bump: 0,
            opened_at: 0,
            price_at_open: PRICE,
            coin: key(3),
            total_tickets: pot / PRICE,
            pot,
            status,
            purchases: vec![PurchaseEntry {
                wallet: winner,
                cumulative: pot / PRICE,
            }],
            settlement: SettlementRecord {
                outcome,
                winner,
                commission_percent,
                prize: prize(pot, commission_percent).unwrap(),
                commission: commission(pot, commission_percent).unwrap(),
                ..SettlementRecord::default()
            },
        }
    }

    fn position(wallet: Pubkey, tickets: u64) -> WalletPosition {
        WalletPosition {
            round_id: 1,
            wallet,
            tickets,
            amount_paid: tickets * PRICE,
            paid: false,
            bump: 0,
        }
    }

    #[test]
    fn pot_split_adds_up_when_divisible() {
        let pot = 20 * PRICE;
        assert_eq!(prize(pot, 10).unwrap(), 18 * PRICE);
        assert_eq!(commission(pot, 10).unwrap(), 2 * PRICE);
        assert_eq!(prize(pot, 0).unwrap(), pot);
        assert_eq!(commission(pot, 0).unwrap(), 0);
    }

    #[test]
    fn pot_split_rounds_down() {
        assert_eq!(prize(101, 50).unwrap(), 50);
        assert_eq!(commission(101, 50).unwrap(), 50);
        assert_eq!(prize(2, 99).unwrap(), 0);
        assert_eq!(commission(2, 99).unwrap(), 1);
    }

    #[test]
    fn pot_split_does_not_overflow_large_pots() {
        assert_eq!(commission(u64::MAX, 99).unwrap(), u64::MAX / 100 * 99 + 14);
        assert!(prize(u64::MAX, 1).is_ok());
    }

    #[test]
    fn winning_ticket_is_reduced_modulo_total() {
        let mut value = [0xffu8; 32];
        value[..8].copy_from_slice(&45u64.to_le_bytes());
        assert_eq!(winning_ticket(&value, 20).unwrap(), 5);
        assert_eq!(winning_ticket(&value, 1).unwrap(), 0);
        assert_eq!(
            winning_ticket(&value, 0).unwrap_err(),
            Error::from(LotteryError::MathOverflow)
        );
    }

    #[test]
    fn refund_returns_full_contribution_without_commission() {
        let round = settled_round(SettlementOutcome::InsufficientSales, Pubkey::default(), 15 * PRICE);
        let owed = entitlement(&round, &position(key(1), 10));
        assert_eq!(owed.amount, 10 * PRICE);
        assert_eq!(owed.commission, 0);
        assert_eq!(entitlement(&round, &position(key(2), 5)).amount, 5 * PRICE);
    }

    #[test]
    fn winner_gets_pot_net_of_commission_and_others_nothing() {
        let round = settled_round(SettlementOutcome::WinnerSelected, key(1), 20 * PRICE);
        let owed = entitlement(&round, &position(key(1), 10));
        assert_eq!(owed.amount, 18 * PRICE);
        assert_eq!(owed.commission, 2 * PRICE);
        assert!(entitlement(&round, &position(key(2), 10)).is_empty());
    }

    #[test]
    fn nothing_is_owed_before_settlement() {
        let mut round = settled_round(SettlementOutcome::InsufficientSales, Pubkey::default(), PRICE);
        round.status = RoundStatus::Open;
        let mut buyer = position(key(1), 1);
        assert!(entitlement(&round, &buyer).is_empty());
        assert_eq!(
            claim(&round, &mut buyer).unwrap_err(),
            Error::from(LotteryError::NotSettled)
        );
        assert!(!buyer.paid);

        round.status = RoundStatus::AwaitingSettlement;
        assert_eq!(
            claim(&round, &mut buyer).unwrap_err(),
            Error::from(LotteryError::NotSettled)
        );
    }

    #[test]
    fn claim_pays_exactly_once() {
        let round = settled_round(SettlementOutcome::InsufficientSales, Pubkey::default(), 15 * PRICE);
        let mut buyer = position(key(1), 10);

        assert_eq!(pending_entitlement(&round, &buyer).amount, 10 * PRICE);
        let owed = claim(&round, &mut buyer).unwrap();
        assert_eq!(owed.amount, 10 * PRICE);
        assert!(buyer.paid);
        assert!(pending_entitlement(&round, &buyer).is_empty());

        assert_eq!(
            claim(&round, &mut buyer).unwrap_err(),
            Error::from(LotteryError::AlreadyPaid)
        );
    }

    #[test]
    fn loser_claim_is_rejected_and_left_unpaid() {
        let round = settled_round(SettlementOutcome::WinnerSelected, key(1), 20 * PRICE);
        let mut loser = position(key(2), 10);
        assert_eq!(
            claim(&round, &mut loser).unwrap_err(),
            Error::from(LotteryError::NothingToClaim)
        );
        assert!(!loser.paid);
    }

    #[test]
    fn position_from_another_round_is_owed_nothing() {
        let round = settled_round(SettlementOutcome::InsufficientSales, Pubkey::default(), PRICE);
        let mut stale = position(key(1), 1);
        stale.round_id = 7;
        assert!(entitlement(&round, &stale).is_empty());
    }
}
