//! Deterministic addresses of the p2p-swap program.
//!
//! All three derivations are pure functions of the program id, the seller
//! and (for order accounts) the creation slot. They are recomputed wherever
//! needed and compared, never stored.

use crate::error::DerivationError;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

/// Seed tag of the per-seller wallet authority PDA.
pub const ORDER_WALLET_AUTHORITY_SEED: &[u8] = b"OrderWalletAuthority";
/// Seed tag of order account PDAs.
pub const ORDER_ACCOUNT_SEED: &[u8] = b"OrderAccount";

/// PDA that owns all of a seller's order wallets.
pub fn order_wallet_authority(
    program_id: &Pubkey,
    seller: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    Pubkey::try_find_program_address(
        &[ORDER_WALLET_AUTHORITY_SEED, seller.as_ref()],
        program_id,
    )
    .ok_or(DerivationError::BumpSeedNotFound)
}

/// Associated token account of the sell mint under the wallet authority.
/// The authority is a PDA, so the owner is deliberately off-curve.
pub fn order_wallet_address(sell_mint: &Pubkey, authority: &Pubkey) -> Pubkey {
    get_associated_token_address(authority, sell_mint)
}

/// PDA of the order account itself, keyed by seller and creation slot.
pub fn order_address(
    program_id: &Pubkey,
    seller: &Pubkey,
    creation_slot: u64,
) -> Result<(Pubkey, u8), DerivationError> {
    Pubkey::try_find_program_address(
        &[
            ORDER_ACCOUNT_SEED,
            seller.as_ref(),
            &creation_slot.to_le_bytes(),
        ],
        program_id,
    )
    .ok_or(DerivationError::BumpSeedNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_address_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let seller = Pubkey::new_unique();

        let first = order_address(&program_id, &seller, 42).unwrap();
        let second = order_address(&program_id, &seller, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn order_address_varies_with_every_input() {
        let program_id = Pubkey::new_unique();
        let seller = Pubkey::new_unique();
        let base = order_address(&program_id, &seller, 42).unwrap().0;

        let other_slot = order_address(&program_id, &seller, 43).unwrap().0;
        assert_ne!(base, other_slot);

        let other_seller = order_address(&program_id, &Pubkey::new_unique(), 42)
            .unwrap()
            .0;
        assert_ne!(base, other_seller);

        let other_program = order_address(&Pubkey::new_unique(), &seller, 42)
            .unwrap()
            .0;
        assert_ne!(base, other_program);
    }

    #[test]
    fn authority_is_deterministic_and_seller_bound() {
        let program_id = Pubkey::new_unique();
        let seller = Pubkey::new_unique();

        let first = order_wallet_authority(&program_id, &seller).unwrap();
        let second = order_wallet_authority(&program_id, &seller).unwrap();
        assert_eq!(first, second);

        let other = order_wallet_authority(&program_id, &Pubkey::new_unique()).unwrap();
        assert_ne!(first.0, other.0);
    }

    #[test]
    fn order_wallet_follows_mint_and_authority() {
        let program_id = Pubkey::new_unique();
        let seller = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let (authority, _) = order_wallet_authority(&program_id, &seller).unwrap();
        let wallet = order_wallet_address(&mint, &authority);
        assert_eq!(wallet, order_wallet_address(&mint, &authority));
        assert_ne!(wallet, order_wallet_address(&Pubkey::new_unique(), &authority));
    }
}
