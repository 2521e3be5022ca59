pub mod admin;
pub mod buy_tickets;
pub mod choose_winner;
pub mod end_lottery;
pub mod open_round;
pub mod payout_tickets;
pub mod views;

pub use admin::*;
pub use buy_tickets::*;
pub use choose_winner::*;
pub use end_lottery::*;
pub use open_round::*;
pub use payout_tickets::*;
pub use views::*;
