/// Seed of the singleton lottery configuration PDA.
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Seed prefix of a round PDA, followed by the round id (u64 LE).
pub const ROUND_SEED: &[u8] = b"round";

/// Seed prefix of a wallet position PDA, followed by the round id and wallet.
pub const POSITION_SEED: &[u8] = b"position";

/// Seed prefix of a round vault token account, followed by the round key.
pub const VAULT_SEED: &[u8] = b"vault";

/// Upper bound for `max_tickets`. Every purchase appends one entry to the
/// round's prefix-sum list and buys at least one ticket, so this also bounds
/// the list length.
pub const MAX_TICKETS_CAP: u64 = 100;

pub const PERCENT_DENOMINATOR: u64 = 100;

/// Id of the round opened by `initialize`.
pub const FIRST_ROUND_ID: u64 = 1;
