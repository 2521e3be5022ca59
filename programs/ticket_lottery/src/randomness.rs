use anchor_lang::prelude::*;

use crate::error::LotteryError;

/// Switchboard on-demand program that must own committed randomness accounts.
#[cfg(not(feature = "devnet"))]
pub const RANDOMNESS_PROGRAM_ID: Pubkey = switchboard_on_demand::ON_DEMAND_MAINNET_PID;

#[cfg(feature = "devnet")]
pub const RANDOMNESS_PROGRAM_ID: Pubkey = switchboard_on_demand::ON_DEMAND_DEVNET_PID;

/// Rejects a randomness account not owned by the Switchboard program.
pub fn require_randomness_owner(owner: &Pubkey) -> Result<()> {
    require_keys_eq!(
        *owner,
        RANDOMNESS_PROGRAM_ID,
        LotteryError::IncorrectRandomnessAccount
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switchboard_owned_account_is_accepted() {
        assert!(require_randomness_owner(&RANDOMNESS_PROGRAM_ID).is_ok());
    }

    #[test]
    fn foreign_owner_is_rejected() {
        for owner in [
            Pubkey::default(),
            crate::ID,
            anchor_lang::system_program::ID,
            Pubkey::new_unique(),
        ] {
            assert_eq!(
                require_randomness_owner(&owner).unwrap_err(),
                Error::from(LotteryError::IncorrectRandomnessAccount)
            );
        }
    }
}
